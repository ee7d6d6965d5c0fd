use gloo_net::http::Request;

use crate::error::GalleryError;
use crate::gallery::{FetchResponse, GalleryFetcher};

/// Browser `fetch` via gloo-net. No timeout and no cancellation.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserFetcher;

impl GalleryFetcher for BrowserFetcher {
    async fn get(&self, url: &str) -> Result<FetchResponse, GalleryError> {
        let resp = Request::get(url)
            .send()
            .await
            .map_err(|e| GalleryError::Network(e.to_string()))?;
        let status = resp.status();
        // Error bodies are never decoded.
        let body = if resp.ok() {
            resp.text()
                .await
                .map_err(|e| GalleryError::Network(e.to_string()))?
        } else {
            String::new()
        };
        Ok(FetchResponse { status, body })
    }
}
