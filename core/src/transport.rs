//! Async reqwest transport for hosts that let the core drive the I/O.
//!
//! # Design
//! Each call issues exactly one network round-trip and resolves exactly
//! once; there are no retries and no timeout override beyond the platform
//! default. URL validation happens before any network work, so an
//! unparsable target never leaves the process. Completion is delivered on
//! whatever executor context reqwest uses; callers redispatch to UI-safe
//! contexts themselves.

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::client::{decode_envelope, SimilarityClient};
use crate::error::{ErrorKind, RequestError, RequestResult};
use crate::http::{HttpMethod, HttpResponse};
use crate::multipart::{self, ImagePart};
use crate::routes::Route;
use crate::types::{SimilarityReport, StoredImage};

impl SimilarityClient {
    /// Issue a plain JSON request against `url`.
    ///
    /// `body` is forwarded as-is when present; a missing body sends no
    /// `content-type`.
    pub async fn send<T: DeserializeOwned>(
        &self,
        url: &str,
        method: HttpMethod,
        body: Option<serde_json::Value>,
    ) -> RequestResult<T> {
        let url = parse_url(url)?;
        let http = reqwest::Client::new();
        let mut request = match method {
            HttpMethod::Get => http.get(url.clone()),
            HttpMethod::Post => http.post(url.clone()),
        };
        request = request.header("accept", "application/json");
        if let Some(body) = body {
            request = request
                .header("content-type", "application/json")
                .body(body.to_string());
        }
        execute(url, request).await
    }

    /// Upload a single image part to `url` as `multipart/form-data`.
    ///
    /// Empty image bytes are legal and forwarded as-is.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        url: &str,
        part: &ImagePart,
    ) -> RequestResult<T> {
        let url = parse_url(url)?;
        let boundary = multipart::generate_boundary();
        let body = multipart::encode(part, &boundary);
        let request = reqwest::Client::new()
            .post(url.clone())
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(body);
        execute(url, request).await
    }

    /// Upload `part` to the configured upload route and decode the report.
    pub async fn upload_image(&self, part: &ImagePart) -> RequestResult<SimilarityReport> {
        self.upload(&Route::Upload.url(self.base_url()), part).await
    }

    /// Fetch the stored-image listing from the configured route.
    pub async fn list_images(&self) -> RequestResult<Vec<StoredImage>> {
        self.send(&Route::ListImages.url(self.base_url()), HttpMethod::Get, None)
            .await
    }
}

/// Validate the target before any network work.
fn parse_url(url: &str) -> Result<Url, RequestError> {
    Url::parse(url).map_err(|_| RequestError::new(400, ErrorKind::InvalidUrl))
}

/// Drive the request to completion and decode the envelope.
async fn execute<T: DeserializeOwned>(
    url: Url,
    request: reqwest::RequestBuilder,
) -> RequestResult<T> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) if e.is_connect() => {
            log::warn!("{url} is unreachable");
            return Err(RequestError::new(500, ErrorKind::Unreachable(url.to_string())));
        }
        Err(e) => {
            log::warn!("request to {url} failed: {e}");
            return Err(RequestError::new(500, ErrorKind::Custom(e.to_string())));
        }
    };

    let status = response.status().as_u16();
    let body = match response.bytes().await {
        Ok(bytes) => bytes.to_vec(),
        Err(_) => return Err(RequestError::new(status, ErrorKind::InvalidResponse)),
    };
    log::debug!("{url} replied {status} ({} bytes)", body.len());

    decode_envelope(HttpResponse {
        status,
        headers: Vec::new(),
        body,
    })
}
