//! HTTP client implementation

use super::{Request, Response};
use crate::config::NetworkConfig;
use crate::utils::Result;
use crate::utils::error::NetworkError;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client backed by reqwest
#[derive(Debug, Clone)]
pub struct NetworkClient {
    client: reqwest::Client,
}

impl NetworkClient {
    /// Create a new HTTP client
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(NetworkError::from)?;
        Ok(Self { client })
    }

    /// Execute a GET request and read the body as text
    pub async fn execute(&self, request: Request) -> Result<Response> {
        let mut builder = self.client.get(request.url().clone());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(NetworkError::from)?;
        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.text().await.map_err(NetworkError::from)?;

        log::debug!("GET {} -> {}", request.url(), status);
        Ok(Response::with_headers(status, body, headers))
    }
}
