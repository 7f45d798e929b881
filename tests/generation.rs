use markitbrand::{
    GeminiClient, GeminiConfig, GenerationParams, Logo, MarkitError, PackageTier, Session,
    SessionState,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.5-flash-image:generateContent";

fn image_response(data: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"inlineData": {"mimeType": "image/png", "data": data}}]
            },
            "finishReason": "STOP"
        }]
    }))
}

/// Answers each variation with an image whose data names the variation.
async fn mount_variations(server: &MockServer) {
    for variation in 2..=5 {
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(body_string_contains(format!("This is variation {}.", variation)))
            .respond_with(image_response(&format!("variation-{}", variation)))
            .with_priority(2)
            .mount(server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(image_response("variation-1"))
        .with_priority(3)
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::new(
        GeminiConfig::new()
            .with_api_key("test-key")
            .with_base_url(server.uri()),
    )
    .unwrap()
}

fn quantum_leap() -> GenerationParams {
    GenerationParams::new("QuantumLeap", "Innovating Tomorrow")
        .with_style("vibrant blues")
        .with_package(PackageTier::Pro)
}

#[tokio::test]
async fn pro_package_returns_three_images_in_order() {
    let server = MockServer::start().await;
    mount_variations(&server).await;

    let result = client_for(&server)
        .generator()
        .generate(&quantum_leap())
        .await
        .unwrap();

    assert_eq!(
        result.images,
        vec![
            "data:image/png;base64,variation-1",
            "data:image/png;base64,variation-2",
            "data:image/png;base64,variation-3",
        ]
    );
    assert!(result.images.iter().all(|uri| uri.starts_with("data:")));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn failing_second_variation_fails_everything() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_string_contains("This is variation 2."))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_variations(&server).await;

    let err = client_for(&server)
        .generator()
        .generate(&quantum_leap())
        .await
        .unwrap_err();

    assert!(matches!(err, MarkitError::VariationFailed { variation: 2, .. }));
    assert!(err.to_string().contains("variation 2"));
}

#[tokio::test]
async fn logo_is_sent_before_the_prompt_text() {
    let server = MockServer::start().await;
    mount_variations(&server).await;

    let params = GenerationParams::new("QuantumLeap", "Innovating Tomorrow")
        .with_optional_logo(Logo::new("data:image/png;base64,bG9nbw==", "image/png"));

    client_for(&server)
        .generator()
        .generate(&params)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let parts = body["contents"][0]["parts"].as_array().unwrap();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[0]["inlineData"]["data"], "bG9nbw==");
    assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
    assert!(parts[1]["text"]
        .as_str()
        .unwrap()
        .contains("Incorporate the provided logo naturally into the design."));
    assert_eq!(
        requests[0].headers.get("x-goog-api-key").unwrap(),
        "test-key"
    );
}

#[tokio::test]
async fn session_reports_success_with_order_id() {
    let server = MockServer::start().await;
    mount_variations(&server).await;
    let generator = client_for(&server).generator();

    let mut session = Session::new();
    let params = quantum_leap().with_package(PackageTier::Premium);
    let state = session.run(&generator, &params).await.unwrap().clone();

    match state {
        SessionState::Success {
            order_id, images, ..
        } => {
            assert!(order_id.as_str().starts_with("MB-"));
            assert_eq!(images.len(), 5);
            assert_eq!(images[4], "data:image/png;base64,variation-5");
        }
        other => panic!("unexpected state {:?}", other),
    }
}
