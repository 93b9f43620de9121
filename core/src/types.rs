//! Wire types for the similarity API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates. Field names
//! match the service's snake_case JSON except the envelope's `statusCode`,
//! which is renamed explicitly.

use serde::{Deserialize, Serialize};

/// The `{statusCode, message, data}` wrapper every response body must match.
///
/// A present `data` field is the authoritative success signal; the wrapper's
/// own `statusCode` is informational and may disagree with the transport
/// status. All three fields are optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    #[serde(rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Result of scoring an uploaded image against the service's gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityReport {
    pub image_name: String,
    pub similar_image: Vec<SimilarMatch>,
}

/// One gallery image that resembles the upload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarMatch {
    pub url: String,
    pub similarity_score: f32,
}

/// One entry of the stored-image listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredImage {
    pub image_name: String,
    pub url: String,
}
