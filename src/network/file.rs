//! Filesystem loader for `file://` URLs

use super::Response;
use crate::utils::Result;
use crate::utils::error::NetworkError;
use std::io::ErrorKind;
use url::Url;

/// Serves `file://` URLs from disk with HTTP-like status codes
#[derive(Debug, Clone, Default)]
pub struct FileLoader;

impl FileLoader {
    pub fn new() -> Self {
        Self
    }

    /// Read a file URL. Missing files answer 404 and unreadable ones 403,
    /// so callers can treat them like a non-success HTTP response.
    pub async fn load(&self, url: &Url) -> Result<Response> {
        let path = url
            .to_file_path()
            .map_err(|_| NetworkError::InvalidUrl(url.to_string()))?;

        match tokio::fs::read_to_string(&path).await {
            Ok(body) => {
                let mut response = Response::new(200, body);
                if path.extension().is_some_and(|ext| ext == "html" || ext == "htm") {
                    response.add_header("content-type", "text/html");
                }
                Ok(response)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Response::new(404, "")),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(Response::new(403, "")),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("header.html");
        std::fs::write(&path, "<nav></nav>").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let response = FileLoader::new().load(&url).await.unwrap();
        assert!(response.is_success());
        assert_eq!(response.body(), "<nav></nav>");
        assert_eq!(response.content_type(), Some("text/html"));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let url = Url::from_file_path(dir.path().join("footer.html")).unwrap();
        let response = FileLoader::new().load(&url).await.unwrap();
        assert_eq!(response.status(), 404);
    }
}
