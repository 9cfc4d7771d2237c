use async_trait::async_trait;
use base64::prelude::{BASE64_STANDARD, Engine as _};
use reqwest::{
    Client, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE},
};
use serde::Deserialize;

use crate::config::AppConfig;
use crate::domain::ticket::Ticket;
use crate::error::{AppError, AppResult};
use crate::infra::http::{build_client, decode_json, expect_status};
use crate::services::TicketSourceService;

const SERVICE: &str = "Freshservice";
const PAGE_SIZE: usize = 100;

pub struct FreshserviceClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl FreshserviceClient {
    pub fn new(http: Client, base_url: String, api_key: String) -> Self {
        Self {
            http,
            base_url,
            api_key,
        }
    }

    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        Ok(Self::new(
            build_client(config.http_timeout)?,
            config.freshservice_base_url.clone(),
            config.freshservice_api_key.clone(),
        ))
    }

    /// Freshservice takes the API key as the basic-auth user with a throwaway password.
    fn auth_header(api_key: &str) -> String {
        let credentials = format!("{api_key}:X");
        let encoded = BASE64_STANDARD.encode(credentials);
        format!("Basic {encoded}")
    }

    fn tickets_endpoint(base_url: &str) -> String {
        format!("{}/api/v2/tickets", base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TicketSourceService for FreshserviceClient {
    async fn list_tickets(&self, page: u32) -> AppResult<Vec<Ticket>> {
        let response = self
            .http
            .get(Self::tickets_endpoint(&self.base_url))
            .query(&[
                ("per_page", PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ])
            .header(AUTHORIZATION, Self::auth_header(&self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|source| AppError::Transport {
                service: SERVICE,
                source,
            })?;

        let response = expect_status(SERVICE, response, StatusCode::OK).await?;
        let payload: TicketListResponse = decode_json(SERVICE, response).await?;
        Ok(payload.tickets)
    }

    fn page_size(&self) -> usize {
        PAGE_SIZE
    }
}

#[derive(Deserialize)]
struct TicketListResponse {
    #[serde(default)]
    tickets: Vec<Ticket>,
}
