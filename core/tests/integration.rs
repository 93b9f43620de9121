//! Build/parse lifecycle test against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then executes every built
//! request over real HTTP using ureq. This proves the sans-IO half of the
//! core end-to-end: the multipart frames the client builds are accepted by
//! a conforming server-side parser, and the envelopes the server emits
//! decode back through the client.

use artsim_core::{HttpMethod, HttpRequest, HttpResponse, ImagePart, SimilarityClient};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let mut response = match req.method {
        HttpMethod::Get => {
            let mut builder = agent.get(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key, value);
            }
            builder.call()
        }
        HttpMethod::Post => {
            let mut builder = agent.post(&req.path);
            for (key, value) in &req.headers {
                builder = builder.header(key, value);
            }
            builder.send(req.body.as_deref().unwrap_or(&[]))
        }
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn upload_lifecycle() {
    let client = SimilarityClient::new(&start_server());

    // Step 1: list — the gallery starts empty.
    let req = client.build_list_images();
    let reply = client.parse_list_images(execute(req)).unwrap();
    assert_eq!(reply.status, 200);
    assert!(reply.data.unwrap().is_empty(), "expected empty gallery");

    // Step 2: upload an image.
    let jpeg = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
    let req = client.build_upload_image(&ImagePart::jpeg(jpeg.clone(), "sunset.jpg"));
    let reply = client.parse_upload_image(execute(req)).unwrap();
    assert_eq!(reply.status, 200);
    let report = reply.data.unwrap();
    assert_eq!(report.image_name, "sunset.jpg");
    assert!(report.similar_image.is_empty());

    // Step 3: upload the identical bytes again. A perfect score proves the
    // multipart encoding round-tripped filename and bytes exactly.
    let req = client.build_upload_image(&ImagePart::jpeg(jpeg, "sunset-copy.jpg"));
    let reply = client.parse_upload_image(execute(req)).unwrap();
    let report = reply.data.unwrap();
    assert_eq!(report.similar_image.len(), 1);
    assert_eq!(report.similar_image[0].url, "/images/sunset.jpg");
    assert_eq!(report.similar_image[0].similarity_score, 1.0);

    // Step 4: empty image bytes are forwarded, not rejected.
    let req = client.build_upload_image(&ImagePart::jpeg(Vec::new(), "empty.jpg"));
    let reply = client.parse_upload_image(execute(req)).unwrap();
    assert_eq!(reply.status, 200);
    assert_eq!(reply.data.unwrap().image_name, "empty.jpg");

    // Step 5: list — all three uploads are stored.
    let req = client.build_list_images();
    let reply = client.parse_list_images(execute(req)).unwrap();
    let images = reply.data.unwrap();
    assert_eq!(images.len(), 3);
    assert_eq!(images[0].image_name, "sunset.jpg");
}
