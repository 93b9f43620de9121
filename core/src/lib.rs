//! API client core for the image-similarity service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host app executes the
//! actual HTTP round-trip and feeds the response back, keeping the core
//! deterministic and testable. With the default `transport` feature the
//! crate also ships an async reqwest transport for hosts that want the core
//! to drive the I/O itself.
//!
//! # Design
//! - `SimilarityClient` is stateless — it holds only `base_url`. There is no
//!   shared singleton; callers construct a client with its configuration and
//!   pass it where needed.
//! - Each operation is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - Every response body is decoded through the service's
//!   `{statusCode, message, data}` envelope. A present `data` field is the
//!   sole success signal; the transport status code is carried alongside but
//!   never gates decoding.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod multipart;
pub mod permission;
pub mod routes;
#[cfg(feature = "transport")]
pub mod transport;
pub mod types;
#[cfg(feature = "transport")]
pub mod uploader;

pub use client::SimilarityClient;
pub use error::{ErrorKind, Reply, RequestError, RequestResult};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use multipart::ImagePart;
pub use permission::{PermissionStatus, PickerDirective};
pub use routes::Route;
pub use types::{Envelope, SimilarMatch, SimilarityReport, StoredImage};
#[cfg(feature = "transport")]
pub use uploader::{UploadEvent, UploadObserver, Uploader};
