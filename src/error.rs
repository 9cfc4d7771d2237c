use std::io;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{service} responded with {status}: {body}")]
    Upstream {
        service: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("failed to call {service}: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{service} listing did not end within {max_pages} pages; raise SYNC_MAX_PAGES")]
    PageLimit {
        service: &'static str,
        max_pages: u32,
    },
    #[error("failed to parse {service} response: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// HTTP status carried by an upstream rejection, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AppError::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
