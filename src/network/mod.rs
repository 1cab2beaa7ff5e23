//! Resource loading for Veneer
//!
//! Fragments are fetched through the [`ResourceLoader`] trait. The default
//! [`NetworkStack`] serves `http(s)://` through reqwest and `file://` from
//! disk.

mod client;
mod file;
mod request;
mod response;

pub use client::NetworkClient;
pub use file::FileLoader;
pub use request::Request;
pub use response::Response;

use crate::config::NetworkConfig;
use crate::utils::Result;
use crate::utils::error::NetworkError;
use std::future::Future;
use url::Url;

/// Anything that can retrieve a resource by absolute URL
pub trait ResourceLoader: Send + Sync {
    /// Fetch a resource. A non-2xx status is a successful fetch; only
    /// failures to obtain any response are errors.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<Response>> + Send;
}

/// Network stack dispatching on URL scheme
#[derive(Debug, Clone)]
pub struct NetworkStack {
    client: NetworkClient,
    files: FileLoader,
}

impl NetworkStack {
    /// Create a new network stack
    pub fn new(config: &NetworkConfig) -> Result<Self> {
        Ok(Self {
            client: NetworkClient::new(config)?,
            files: FileLoader::new(),
        })
    }
}

impl ResourceLoader for NetworkStack {
    async fn fetch(&self, url: &Url) -> Result<Response> {
        match url.scheme() {
            "http" | "https" => self.client.execute(Request::for_url(url.clone())).await,
            "file" => self.files.load(url).await,
            other => Err(NetworkError::UnsupportedScheme(other.to_string()).into()),
        }
    }
}
