//! Test double of the remote similarity service.
//!
//! Serves the same wire contract as the real service: every response body is
//! a `{statusCode, message, data}` envelope, and a missing `data` key — not
//! the HTTP status — is what signals failure to clients. Uploaded images are
//! kept in an in-memory gallery and scored against each other with a
//! deterministic byte-histogram overlap, so tests get stable similarity
//! numbers without any actual vision model.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// The upload field name the real service requires.
pub const UPLOAD_FIELD_NAME: &str = "files";

/// Response wrapper matching the real service's schema. `data` is omitted
/// from the JSON entirely when absent — clients distinguish a missing key
/// from `null`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityReport {
    pub image_name: String,
    pub similar_image: Vec<SimilarMatch>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarMatch {
    pub url: String,
    pub similarity_score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredImage {
    pub image_name: String,
    pub url: String,
}

/// One uploaded image held in memory.
#[derive(Debug, Clone)]
pub struct ImageEntry {
    pub image_name: String,
    pub bytes: Vec<u8>,
}

pub type Gallery = Arc<RwLock<Vec<ImageEntry>>>;

pub fn app() -> Router {
    let gallery: Gallery = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/upload", post(upload_image))
        .route("/images", get(list_images))
        .route("/health", get(health))
        .with_state(gallery)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Deterministic similarity of two byte buffers: histogram intersection
/// normalized by the longer buffer. Identical buffers score 1.0; buffers
/// with no byte values in common score 0.0.
pub fn histogram_similarity(a: &[u8], b: &[u8]) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let mut ha = [0u64; 256];
    let mut hb = [0u64; 256];
    for &byte in a {
        ha[byte as usize] += 1;
    }
    for &byte in b {
        hb[byte as usize] += 1;
    }
    let overlap: u64 = ha.iter().zip(hb.iter()).map(|(x, y)| (*x).min(*y)).sum();
    overlap as f32 / a.len().max(b.len()) as f32
}

async fn upload_image(
    State(gallery): State<Gallery>,
    mut multipart: Multipart,
) -> (StatusCode, Json<Envelope<SimilarityReport>>) {
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }
        let image_name = field.file_name().unwrap_or("upload.jpg").to_string();
        match field.bytes().await {
            Ok(bytes) => upload = Some((image_name, bytes.to_vec())),
            Err(_) => break,
        }
        break;
    }

    let Some((image_name, bytes)) = upload else {
        log::debug!("upload rejected: no '{UPLOAD_FIELD_NAME}' part");
        // Failure is signaled by the absent `data` key, mirroring the
        // real service.
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope {
                status_code: 400,
                message: format!("expected a '{UPLOAD_FIELD_NAME}' part"),
                data: None,
            }),
        );
    };

    let mut gallery = gallery.write().await;
    let similar_image = gallery
        .iter()
        .map(|entry| SimilarMatch {
            url: format!("/images/{}", entry.image_name),
            similarity_score: histogram_similarity(&entry.bytes, &bytes),
        })
        .collect();
    log::info!("stored {image_name} ({} bytes)", bytes.len());
    gallery.push(ImageEntry {
        image_name: image_name.clone(),
        bytes,
    });

    (
        StatusCode::OK,
        Json(Envelope {
            status_code: 200,
            message: "ok".to_string(),
            data: Some(SimilarityReport {
                image_name,
                similar_image,
            }),
        }),
    )
}

async fn list_images(State(gallery): State<Gallery>) -> Json<Envelope<Vec<StoredImage>>> {
    let gallery = gallery.read().await;
    let images = gallery
        .iter()
        .map(|entry| StoredImage {
            image_name: entry.image_name.clone(),
            url: format!("/images/{}", entry.image_name),
        })
        .collect();
    Json(Envelope {
        status_code: 200,
        message: "ok".to_string(),
        data: Some(images),
    })
}

/// Health responds with an envelope that has no `data` key at all. Clients
/// use this to exercise their soft-success path.
async fn health() -> Json<Envelope<()>> {
    Json(Envelope {
        status_code: 200,
        message: "ok".to_string(),
        data: None,
    })
}
