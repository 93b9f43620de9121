//! Bridge between the picker collaborator and the upload transport.
//!
//! # Design
//! The picker hands the core either an image buffer or a closure signal.
//! Each call delivers exactly one `UploadEvent` to the caller-owned
//! observer; the observer is borrowed per call and never stored, so
//! ownership stays with the caller.

use crate::client::SimilarityClient;
use crate::error::{Reply, RequestError};
use crate::multipart::ImagePart;
use crate::types::SimilarityReport;

/// Outcome of one picker interaction.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// The upload finished and the envelope decoded. The reply's `data` may
    /// still be absent — a soft failure the observer must handle.
    Completed(Reply<SimilarityReport>),

    /// The upload failed before a decodable envelope was obtained.
    Failed(RequestError),

    /// The user dismissed the picker without choosing an image.
    Cancelled,
}

/// Caller-supplied sink for upload outcomes.
pub trait UploadObserver {
    fn on_event(&mut self, event: UploadEvent);
}

/// Drives image uploads on behalf of the picker collaborator.
#[derive(Debug, Clone)]
pub struct Uploader {
    client: SimilarityClient,
}

impl Uploader {
    pub fn new(client: SimilarityClient) -> Self {
        Self { client }
    }

    /// Handle an image produced by the picker: upload it as a JPEG part and
    /// report the outcome. Delivers exactly one event.
    pub async fn image_received(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
        observer: &mut dyn UploadObserver,
    ) {
        log::debug!("uploading {} bytes as {file_name}", bytes.len());
        let part = ImagePart::jpeg(bytes, file_name);
        let event = match self.client.upload_image(&part).await {
            Ok(reply) => UploadEvent::Completed(reply),
            Err(err) => {
                log::warn!("upload of {file_name} failed: {err}");
                UploadEvent::Failed(err)
            }
        };
        observer.on_event(event);
    }

    /// Handle the picker being dismissed without a selection. Delivers
    /// exactly one event.
    pub fn picker_closed(&self, observer: &mut dyn UploadObserver) {
        observer.on_event(UploadEvent::Cancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recording {
        events: Vec<UploadEvent>,
    }

    impl UploadObserver for Recording {
        fn on_event(&mut self, event: UploadEvent) {
            self.events.push(event);
        }
    }

    #[test]
    fn picker_closed_delivers_exactly_one_cancelled_event() {
        let uploader = Uploader::new(SimilarityClient::new("http://localhost:3000"));
        let mut observer = Recording { events: Vec::new() };
        uploader.picker_closed(&mut observer);
        assert_eq!(observer.events, vec![UploadEvent::Cancelled]);
    }
}
