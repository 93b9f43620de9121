//! Async transport and uploader tests against the live mock server.
#![cfg(feature = "transport")]

use artsim_core::{
    ErrorKind, HttpMethod, ImagePart, SimilarityClient, UploadEvent, UploadObserver, Uploader,
};

async fn start_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        mock_server::run(listener).await.unwrap();
    });
    format!("http://{addr}")
}

/// Reserve a port with nothing listening on it.
fn closed_port_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

struct Recording {
    events: Vec<UploadEvent>,
}

impl Recording {
    fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl UploadObserver for Recording {
    fn on_event(&mut self, event: UploadEvent) {
        self.events.push(event);
    }
}

#[tokio::test]
async fn upload_image_returns_report() {
    let client = SimilarityClient::new(&start_server().await);
    let part = ImagePart::jpeg(vec![0xFF, 0xD8, 0xFF], "a.jpg");

    let reply = client.upload_image(&part).await.unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.data.unwrap().image_name, "a.jpg");
}

#[tokio::test]
async fn identical_uploads_score_one() {
    let client = SimilarityClient::new(&start_server().await);
    let bytes = vec![1, 2, 3, 4, 5, 6, 7, 8];

    client
        .upload_image(&ImagePart::jpeg(bytes.clone(), "a.jpg"))
        .await
        .unwrap();
    let reply = client
        .upload_image(&ImagePart::jpeg(bytes, "b.jpg"))
        .await
        .unwrap();

    let report = reply.data.unwrap();
    assert_eq!(report.similar_image.len(), 1);
    assert_eq!(report.similar_image[0].similarity_score, 1.0);
}

#[tokio::test]
async fn list_images_reflects_uploads() {
    let client = SimilarityClient::new(&start_server().await);
    client
        .upload_image(&ImagePart::jpeg(vec![1], "a.jpg"))
        .await
        .unwrap();

    let reply = client.list_images().await.unwrap();
    let images = reply.data.unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].image_name, "a.jpg");
}

#[tokio::test]
async fn health_decodes_to_soft_success() {
    // The health envelope carries no `data` key at all; the transport still
    // reports success and the caller sees an absent payload.
    let base = start_server().await;
    let client = SimilarityClient::new(&base);

    let reply = client
        .send::<serde_json::Value>(&format!("{base}/health"), HttpMethod::Get, None)
        .await
        .unwrap();
    assert_eq!(reply.status, 200);
    assert!(reply.data.is_none());
}

#[tokio::test]
async fn unparsable_url_fails_without_network() {
    // No server is running anywhere; an invalid URL must short-circuit.
    let client = SimilarityClient::new("not a url");
    let part = ImagePart::jpeg(vec![1], "a.jpg");

    let err = client
        .upload::<serde_json::Value>("not a url/upload", &part)
        .await
        .unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.kind, ErrorKind::InvalidUrl);

    let err = client
        .send::<serde_json::Value>("::also bad::", HttpMethod::Get, None)
        .await
        .unwrap_err();
    assert_eq!(err.status, 400);
    assert_eq!(err.kind, ErrorKind::InvalidUrl);
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let client = SimilarityClient::new(&closed_port_base_url());
    let part = ImagePart::jpeg(vec![1], "a.jpg");

    let err = client.upload_image(&part).await.unwrap_err();
    assert_eq!(err.status, 500);
    assert!(matches!(err.kind, ErrorKind::Unreachable(_)));
}

#[tokio::test]
async fn uploader_delivers_one_completed_event() {
    let uploader = Uploader::new(SimilarityClient::new(&start_server().await));
    let mut observer = Recording::new();

    uploader
        .image_received(vec![0xFF, 0xD8], "picked.jpg", &mut observer)
        .await;

    assert_eq!(observer.events.len(), 1);
    match &observer.events[0] {
        UploadEvent::Completed(reply) => {
            assert_eq!(reply.status, 200);
            assert_eq!(reply.data.as_ref().unwrap().image_name, "picked.jpg");
        }
        other => panic!("expected Completed, got {other:?}"),
    }
}

#[tokio::test]
async fn uploader_reports_failure_as_one_event() {
    let uploader = Uploader::new(SimilarityClient::new(&closed_port_base_url()));
    let mut observer = Recording::new();

    uploader.image_received(vec![1], "a.jpg", &mut observer).await;

    assert_eq!(observer.events.len(), 1);
    assert!(matches!(observer.events[0], UploadEvent::Failed(_)));
}

#[tokio::test]
async fn uploader_cancellation_delivers_one_event() {
    let uploader = Uploader::new(SimilarityClient::new("http://localhost:3000"));
    let mut observer = Recording::new();

    uploader.picker_closed(&mut observer);

    assert_eq!(observer.events, vec![UploadEvent::Cancelled]);
}
