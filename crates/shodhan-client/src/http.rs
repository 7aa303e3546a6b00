//! Shared reqwest plumbing.

use std::time::Duration;

use reqwest::Response;
use serde::de::DeserializeOwned;
use shodhan_core::config::ApiConfig;

use crate::endpoints::Endpoints;
use crate::error::{ApiError, backend_message};

/// Connection settings shared by the public and admin clients.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientOptions {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&ApiConfig> for ClientOptions {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// Transport plus URL builder.
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoints: Endpoints,
}

impl Transport {
    pub(crate) fn new(options: &ClientOptions) -> Result<Self, ApiError> {
        let endpoints = Endpoints::new(&options.base_url)?;

        // reqwest is built with rustls-no-provider; Err means one is already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, endpoints })
    }
}

/// Turn a non-success response into [`ApiError::Status`], keeping any
/// message the backend put in the body.
pub(crate) async fn check_status(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: backend_message(&body),
    })
}

pub(crate) async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    Ok(check_status(resp).await?.json().await?)
}
