mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use history_bot::api::{
    self,
    types::{ErrorResponse, HealthResponse, SummaryResponse},
    AppState,
};
use history_bot::llm::TextGenerator;
use proptest::prelude::*;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use common::{CannedGenerator, DownGenerator, RecordingGenerator};

fn app(generator: Arc<dyn TextGenerator>) -> Router {
    api::router(AppState::new(generator).expect("history template parses"))
}

fn history_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/history")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send<T: DeserializeOwned>(app: Router, request: Request<Body>) -> (StatusCode, T) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_is_ok_even_when_backend_is_down() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let (status, body): (_, HealthResponse) = send(app(Arc::new(DownGenerator)), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, HealthResponse::ok());
}

#[tokio::test]
async fn history_returns_generated_text() {
    let generator = Arc::new(CannedGenerator::default());
    let (status, body): (_, SummaryResponse) =
        send(app(generator.clone()), history_request(r#"{"place":"Jaipur"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.historical_summary.starts_with("A short history"));
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn history_prompt_is_a_human_message() {
    let generator = Arc::new(RecordingGenerator::default());
    let (status, _): (_, SummaryResponse) =
        send(app(generator.clone()), history_request(r#"{"place":"Hampi"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(
        prompts.as_slice(),
        ["Human: Write me a historical overview of this city/place: Hampi. The summary should not be too big just short summary in around 300-400 words. "]
    );
}

#[tokio::test]
async fn backend_failure_becomes_500_with_detail() {
    let (status, body): (_, ErrorResponse) =
        send(app(Arc::new(DownGenerator)), history_request(r#"{"place":"Jaipur"}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body
        .detail
        .starts_with("Error generating historical summary: backend unreachable"));
}

#[tokio::test]
async fn invalid_bodies_are_rejected_before_the_backend() {
    let generator = Arc::new(CannedGenerator::default());
    for body in [r#"{"city":"Jaipur"}"#, r#"{"place":7}"#, "not json"] {
        let (status, error): (_, ErrorResponse) =
            send(app(generator.clone()), history_request(body)).await;
        assert!(status.is_client_error(), "{body} gave {status}");
        assert!(!error.detail.is_empty());
    }
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn empty_place_is_passed_through() {
    let generator = Arc::new(CannedGenerator::default());
    let (status, _): (_, SummaryResponse) =
        send(app(generator.clone()), history_request(r#"{"place":""}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(generator.calls(), 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_place_yields_a_summary(place in "\\PC{1,40}") {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let body = serde_json::json!({ "place": place }).to_string();
        let (status, response): (_, SummaryResponse) = runtime.block_on(send(
            app(Arc::new(CannedGenerator::default())),
            history_request(&body),
        ));
        prop_assert_eq!(status, StatusCode::OK);
        prop_assert!(!response.historical_summary.is_empty());
    }
}
