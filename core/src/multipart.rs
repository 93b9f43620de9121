//! Single-part `multipart/form-data` encoder for image uploads.
//!
//! # Design
//! The service accepts exactly one part, so the encoder builds the whole
//! frame in memory — no chunking, no streaming. The boundary is generated
//! fresh per call from a v4 UUID so it cannot collide with image bytes in
//! practice. Layout, byte for byte:
//!
//! ```text
//! --{boundary}\r\n
//! Content-Disposition: form-data; name="{field}"; filename="{file}"\r\n
//! Content-Type: {content_type}\r\n\r\n
//! {raw image bytes}\r\n
//! --{boundary}--\r\n
//! ```

use uuid::Uuid;

/// Field name the similarity service expects for the uploaded file.
pub const UPLOAD_FIELD_NAME: &str = "files";

/// One image destined for a multipart upload.
///
/// The bytes may be empty; they are forwarded as-is, not rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub bytes: Vec<u8>,
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
}

impl ImagePart {
    /// A JPEG part under the service's fixed upload field name.
    pub fn jpeg(bytes: Vec<u8>, file_name: &str) -> Self {
        Self {
            bytes,
            field_name: UPLOAD_FIELD_NAME.to_string(),
            file_name: file_name.to_string(),
            content_type: "image/jpeg".to_string(),
        }
    }

    /// A PNG part under the service's fixed upload field name.
    pub fn png(bytes: Vec<u8>, file_name: &str) -> Self {
        Self {
            bytes,
            field_name: UPLOAD_FIELD_NAME.to_string(),
            file_name: file_name.to_string(),
            content_type: "image/png".to_string(),
        }
    }
}

/// Generate a fresh boundary token.
pub fn generate_boundary() -> String {
    format!("Boundary-{}", Uuid::new_v4())
}

/// Encode `part` as a single-part multipart body delimited by `boundary`.
pub fn encode(part: &ImagePart, boundary: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(part.bytes.len() + 256);
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            part.field_name, part.file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
    body.extend_from_slice(&part.bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
