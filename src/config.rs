use std::env;
use std::time::Duration;

use crate::domain::issue::MatchStrategy;
use crate::domain::ticket::TicketStatus;
use crate::error::{AppError, AppResult};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_PAGES: u32 = 100;

/// Immutable run configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub freshservice_domain: String,
    pub freshservice_api_key: String,
    pub freshservice_base_url: String,
    pub target_group_id: u64,
    pub allowed_statuses: Vec<TicketStatus>,
    pub github_token: String,
    pub github_api_url: String,
    pub repository: String,
    pub http_timeout: Duration,
    pub max_pages: u32,
    pub request_delay: Duration,
    pub match_strategy: MatchStrategy,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let required = |name: &str| {
            value(name).ok_or_else(|| AppError::Configuration(format!("{name} is not set")))
        };

        let freshservice_domain = parse_domain(&required("FS_DOMAIN")?)?;
        let freshservice_api_key = required("FS_API_KEY")?;
        let target_group_id = parse_number::<u64>("FS_GROUP_ID", &required("FS_GROUP_ID")?)?;
        let github_token = required("TOKEN_CUSTOM")?;
        let repository = required("REPO_NAME")?;
        validate_repository(&repository)?;

        let allowed_statuses = match value("FS_STATUSES") {
            Some(raw) => parse_statuses(&raw)?,
            None => TicketStatus::default_allowed(),
        };

        let freshservice_base_url = value("FS_BASE_URL")
            .unwrap_or_else(|| format!("https://{freshservice_domain}"))
            .trim_end_matches('/')
            .to_string();
        let github_api_url = value("GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = value("SYNC_HTTP_TIMEOUT_SECS")
            .map(|raw| parse_number::<u64>("SYNC_HTTP_TIMEOUT_SECS", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(AppError::Configuration(
                "SYNC_HTTP_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        let max_pages = value("SYNC_MAX_PAGES")
            .map(|raw| parse_number::<u32>("SYNC_MAX_PAGES", &raw))
            .transpose()?
            .unwrap_or(DEFAULT_MAX_PAGES);
        if max_pages == 0 {
            return Err(AppError::Configuration(
                "SYNC_MAX_PAGES must be greater than zero".to_string(),
            ));
        }

        let delay_ms = value("SYNC_REQUEST_DELAY_MS")
            .map(|raw| parse_number::<u64>("SYNC_REQUEST_DELAY_MS", &raw))
            .transpose()?
            .unwrap_or(0);

        let match_strategy = match value("SYNC_MATCH") {
            Some(raw) => MatchStrategy::from_str(&raw).ok_or_else(|| {
                AppError::Configuration(format!(
                    "SYNC_MATCH must be 'ticket-id' or 'exact-title', got '{raw}'"
                ))
            })?,
            None => MatchStrategy::default(),
        };

        Ok(Self {
            freshservice_domain,
            freshservice_api_key,
            freshservice_base_url,
            target_group_id,
            allowed_statuses,
            github_token,
            github_api_url,
            repository,
            http_timeout: Duration::from_secs(timeout_secs),
            max_pages,
            request_delay: Duration::from_millis(delay_ms),
            match_strategy,
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|_| AppError::Configuration(format!("{name} must be an integer, got '{raw}'")))
}

/// Accepts a bare hostname or one prefixed with `http://` or `https://`.
fn parse_domain(raw: &str) -> AppResult<String> {
    let host = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw)
        .trim_end_matches('/');

    if host.is_empty() || host.contains('/') {
        return Err(AppError::Configuration(format!(
            "FS_DOMAIN must be a hostname like acme.freshservice.com, got '{raw}'"
        )));
    }
    Ok(host.to_string())
}

fn parse_statuses(raw: &str) -> AppResult<Vec<TicketStatus>> {
    let statuses = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_number::<i64>("FS_STATUSES", part).map(TicketStatus::from))
        .collect::<AppResult<Vec<_>>>()?;

    if statuses.is_empty() {
        return Err(AppError::Configuration(
            "FS_STATUSES must list at least one status code".to_string(),
        ));
    }
    Ok(statuses)
}

fn validate_repository(repository: &str) -> AppResult<()> {
    match repository.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok(())
        }
        _ => Err(AppError::Configuration(format!(
            "REPO_NAME must look like owner/name, got '{repository}'"
        ))),
    }
}
