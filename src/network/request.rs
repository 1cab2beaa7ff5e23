//! Fragment request types

use crate::utils::Result;
use crate::utils::error::NetworkError;
use std::collections::HashMap;
use url::Url;

/// GET request for a resource
#[derive(Debug, Clone)]
pub struct Request {
    url: Url,
    headers: HashMap<String, String>,
}

impl Request {
    /// Create a GET request for an absolute URL
    pub fn get(url: &str) -> Result<Self> {
        let url = Url::parse(url).map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")))?;
        Ok(Self::for_url(url))
    }

    /// Create a GET request for an already parsed URL
    pub fn for_url(url: Url) -> Self {
        Self {
            url,
            headers: HashMap::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Get the URL
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Get headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}
