//! Stateless HTTP request builder and response parser for the similarity API.
//!
//! # Design
//! `SimilarityClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The host executes the actual round-trip in between.
//!
//! Parsing never gates on the transport status code: any body that decodes
//! as the service envelope is a `Reply`, and the envelope's `data` field —
//! possibly absent — is the authoritative payload. Callers must treat an
//! absent payload as a soft failure even on HTTP 200.

use serde::de::DeserializeOwned;

use crate::error::{ErrorKind, Reply, RequestError, RequestResult};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::multipart::{self, ImagePart};
use crate::routes::Route;
use crate::types::{Envelope, SimilarityReport, StoredImage};

/// Stateless client for the similarity API, bound to one base URL.
///
/// Constructed explicitly with its configuration and passed to callers;
/// there is no shared instance. `Clone` is cheap and clones share nothing
/// mutable.
#[derive(Debug, Clone)]
pub struct SimilarityClient {
    base_url: String,
}

impl SimilarityClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the multipart upload request for one image part.
    ///
    /// A fresh boundary is generated per call and appears in both the
    /// `content-type` header and the encoded body.
    pub fn build_upload_image(&self, part: &ImagePart) -> HttpRequest {
        let boundary = multipart::generate_boundary();
        HttpRequest {
            method: HttpMethod::Post,
            path: Route::Upload.url(&self.base_url),
            headers: vec![(
                "content-type".to_string(),
                format!("multipart/form-data; boundary={boundary}"),
            )],
            body: Some(multipart::encode(part, &boundary)),
        }
    }

    /// Build the stored-image listing request.
    pub fn build_list_images(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: Route::ListImages.url(&self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    /// Decode an upload response into a similarity report.
    pub fn parse_upload_image(&self, response: HttpResponse) -> RequestResult<SimilarityReport> {
        decode_envelope(response)
    }

    /// Decode a listing response into the stored images.
    pub fn parse_list_images(&self, response: HttpResponse) -> RequestResult<Vec<StoredImage>> {
        decode_envelope(response)
    }
}

/// Decode a response body through the service envelope.
///
/// An empty body and an undecodable body are terminal failures reported
/// under the transport status. A decodable body is a `Reply` regardless of
/// that status; `data` may still be absent.
pub(crate) fn decode_envelope<T: DeserializeOwned>(response: HttpResponse) -> RequestResult<T> {
    if response.body.is_empty() {
        return Err(RequestError::new(
            response.status,
            ErrorKind::Custom("no data received".to_string()),
        ));
    }
    match serde_json::from_slice::<Envelope<T>>(&response.body) {
        Ok(envelope) => Ok(Reply {
            status: response.status,
            data: envelope.data,
        }),
        Err(e) => Err(RequestError::new(
            response.status,
            ErrorKind::Custom(format!("failed to decode response: {e}")),
        )),
    }
}
