use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))
}

/// Turns a response whose status is not `expected` into an upstream error carrying the body.
pub async fn expect_status(
    service: &'static str,
    response: Response,
    expected: reqwest::StatusCode,
) -> AppResult<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response>".to_string());
    Err(AppError::Upstream {
        service,
        status,
        body,
    })
}

pub async fn decode_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> AppResult<T> {
    let bytes = response
        .bytes()
        .await
        .map_err(|source| AppError::Transport { service, source })?;
    serde_json::from_slice(&bytes).map_err(|err| AppError::Decode {
        service,
        message: err.to_string(),
    })
}
