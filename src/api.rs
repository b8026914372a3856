//! Client for the gallery's JSON API.
//!
//! - `GET {base}/sets` returns the set summaries for the grid
//! - `GET {base}/sets/{id}` returns one set with its full image list
//!
//! URL building and payload decoding are plain functions; only the transport
//! is browser-specific.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

use crate::model::{ImageSet, SetId};

/// Bytes left as-is in a path segment: the RFC 3986 unreserved set.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Errors that can occur while talking to the API.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Request to {url} failed: {message}")]
    Network {
        /// Requested URL
        url: String,
        /// Browser-provided reason
        message: String,
    },

    /// The server answered with a non-success status
    #[error("Request to {url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The body was not the expected JSON
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Builds endpoint URLs and performs fetches against one API root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base: String,
}

impl ApiClient {
    /// Create a client rooted at `base` (e.g. `/api`).
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL of the set list endpoint.
    pub fn sets_url(&self) -> String {
        format!("{}/sets", self.base)
    }

    /// URL of the detail endpoint for `id`.
    pub fn set_url(&self, id: &SetId) -> String {
        format!(
            "{}/sets/{}",
            self.base,
            utf8_percent_encode(id.as_str(), PATH_SEGMENT)
        )
    }

    /// Fetch all set summaries.
    #[cfg(target_arch = "wasm32")]
    pub async fn fetch_sets(&self) -> Result<Vec<ImageSet>, ApiError> {
        let body = transport::get_text(&self.sets_url()).await?;
        decode_sets(&body)
    }

    /// Fetch one set with its images.
    #[cfg(target_arch = "wasm32")]
    pub async fn fetch_set(&self, id: &SetId) -> Result<ImageSet, ApiError> {
        let body = transport::get_text(&self.set_url(id)).await?;
        decode_set(&body)
    }
}

/// Decode the body of `GET /sets`.
pub fn decode_sets(body: &str) -> Result<Vec<ImageSet>, ApiError> {
    Ok(serde_json::from_str(body)?)
}

/// Decode the body of `GET /sets/{id}`.
pub fn decode_set(body: &str) -> Result<ImageSet, ApiError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(target_arch = "wasm32")]
mod transport {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::Response;

    use super::ApiError;

    fn network_error(url: &str, err: wasm_bindgen::JsValue) -> ApiError {
        ApiError::Network {
            url: url.to_string(),
            message: format!("{:?}", err),
        }
    }

    /// GET `url` and return the response body as text.
    pub(super) async fn get_text(url: &str) -> Result<String, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Network {
            url: url.to_string(),
            message: "No window object available".to_string(),
        })?;

        let response = JsFuture::from(window.fetch_with_str(url))
            .await
            .map_err(|e| network_error(url, e))?;
        let response: Response = response
            .dyn_into()
            .map_err(|e| network_error(url, e))?;

        if !response.ok() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let text = response.text().map_err(|e| network_error(url, e))?;
        let text = JsFuture::from(text)
            .await
            .map_err(|e| network_error(url, e))?;

        log::debug!("GET {} ok", url);
        Ok(text.as_string().unwrap_or_default())
    }
}
