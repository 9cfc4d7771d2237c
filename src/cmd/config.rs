use std::io::{self, Write};

use crate::config::AppConfig;
use crate::error::AppResult;

/// Prints the resolved configuration with secrets masked.
pub fn run(config: &AppConfig) -> AppResult<()> {
    let mut stdout = io::stdout().lock();
    write_summary(&mut stdout, config)?;
    stdout.flush()?;
    Ok(())
}

fn write_summary(out: &mut impl Write, config: &AppConfig) -> io::Result<()> {
    let statuses = config
        .allowed_statuses
        .iter()
        .map(|status| format!("{} ({})", status.label(), status.code()))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out, "Freshservice domain: {}", config.freshservice_domain)?;
    writeln!(out, "Freshservice API: {}", config.freshservice_base_url)?;
    writeln!(
        out,
        "Freshservice API key: {}",
        mask_secret(&config.freshservice_api_key)
    )?;
    writeln!(out, "Target group: {}", config.target_group_id)?;
    writeln!(out, "Allowed statuses: {statuses}")?;
    writeln!(out, "GitHub API: {}", config.github_api_url)?;
    writeln!(out, "GitHub token: {}", mask_secret(&config.github_token))?;
    writeln!(out, "Repository: {}", config.repository)?;
    writeln!(out, "Match strategy: {}", config.match_strategy.as_str())?;
    writeln!(out, "HTTP timeout: {}s", config.http_timeout.as_secs())?;
    writeln!(out, "Page cap: {}", config.max_pages)?;
    writeln!(
        out,
        "Delay between creations: {}ms",
        config.request_delay.as_millis()
    )?;
    Ok(())
}

fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    match chars.len() {
        len if len > 6 => {
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[len - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        0 => "<not set>".to_string(),
        _ => "***".to_string(),
    }
}
