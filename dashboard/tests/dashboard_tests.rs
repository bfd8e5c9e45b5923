// Router-level tests for the dashboard, run against a mock backend

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::client::ApiClient;
use common::config::Settings;
use common::poller::ExecutionsCache;
use dashboard::routes::create_router;
use dashboard::state::AppState;

fn sample_executions() -> serde_json::Value {
    serde_json::json!([
        {
            "id": "6a1f0d52-8f7e-4a3b-9c1d-2e5f6a7b8c9d",
            "trigger_id": "0b2c3d4e-5f6a-4b8c-9d0e-1f2a3b4c5d6e",
            "trigger": {
                "trigger_type": "EVENT",
                "function_name": "send-email"
            },
            "status": "COMPLETED",
            "started_at": "2024-01-01T00:00:00Z",
            "finished_at": "2024-01-01T01:02:03Z"
        }
    ])
}

/// Build an app wired to the given mock backend. The poll loop is not
/// started; tests drive the cache explicitly.
fn test_app(backend_url: &str) -> (Router, ExecutionsCache) {
    let mut settings = Settings::default();
    settings.backend.api_url = backend_url.to_string();

    let client = ApiClient::new(backend_url, 5).unwrap();
    let executions = ExecutionsCache::new(client.clone());
    let metrics = metrics_exporter_prometheus::PrometheusBuilder::new()
        .build_recorder()
        .handle();

    let state = AppState::new(client, executions.clone(), metrics, settings);
    (create_router(state), executions)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn index_page_renders_loading_state_before_first_fetch() {
    let mock_server = MockServer::start().await;
    let (app, _) = test_app(&mock_server.uri());

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Workflows"));
    assert!(body.contains("Send test trigger"));
    assert!(body.contains("Showing 0 results"));
    // No fetch has completed yet, so neither the table nor the error panel
    // renders.
    assert!(!body.contains("Execution ID"));
    assert!(!body.contains("Uh-oh! Loading failed"));
}

#[tokio::test]
async fn executions_partial_renders_table_after_fetch() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/executions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_executions()))
        .mount(&mock_server)
        .await;

    let (app, cache) = test_app(&mock_server.uri());
    cache.revalidate().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/dashboard/executions")
                .header("HX-Request", "true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Showing 1 results"));
    assert!(body.contains("send-email"));
    assert!(body.contains("COMPLETED"));
    assert!(body.contains("badge-success"));
    assert!(body.contains("1h 2m 3s"));
    assert!(body.contains("2024-01-01 00:00:00"));
    assert!(body.contains("EVENT"));
    // HTMX request gets the partial, not the page shell.
    assert!(!body.contains("<html"));
}

#[tokio::test]
async fn refresh_revalidates_and_renders_error_panel_on_backend_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/executions"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"message": "boom"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app(&mock_server.uri());

    let response = app
        .oneshot(form_request("/dashboard/refresh", ""))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Uh-oh! Loading failed"));
    assert!(body.contains("boom"));

    mock_server.verify().await;
}

#[tokio::test]
async fn empty_function_name_is_rejected_without_backend_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trigger"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app(&mock_server.uri());

    let response = app
        .oneshot(form_request("/trigger", "function_name=&payload=%7B%7D"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("Function name is required"));

    mock_server.verify().await;
}

#[tokio::test]
async fn successful_trigger_posts_once_resets_form_and_revalidates() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trigger"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    // Exactly one revalidation of the executions resource follows a success.
    Mock::given(method("GET"))
        .and(path("/executions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_executions()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app(&mock_server.uri());

    let response = app
        .oneshot(form_request(
            "/trigger",
            "function_name=send-email&payload=%7B%7D",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("executions-refreshed")
    );

    let body = body_string(response).await;
    assert!(body.contains("Triggered successfully"));
    // Form is reset to its defaults.
    assert!(!body.contains("send-email"));
    assert!(body.contains(r#"value="""#));

    mock_server.verify().await;
}

#[tokio::test]
async fn failed_trigger_shows_server_message_and_preserves_input() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/trigger"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(serde_json::json!({"message": "boom"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    // No revalidation on failure.
    Mock::given(method("GET"))
        .and(path("/executions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_executions()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (app, _) = test_app(&mock_server.uri());

    let response = app
        .oneshot(form_request(
            "/trigger",
            "function_name=send-email&payload=%7B%22a%22%3A1%7D",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("HX-Trigger").is_none());

    let body = body_string(response).await;
    assert!(body.contains("Failed to trigger"));
    assert!(body.contains("boom"));
    // Entered values survive for retry.
    assert!(body.contains("send-email"));
    assert!(body.contains("{&quot;a&quot;:1}") || body.contains(r#"{"a":1}"#));

    mock_server.verify().await;
}

#[tokio::test]
async fn health_endpoint_is_ok() {
    let mock_server = MockServer::start().await;
    let (app, _) = test_app(&mock_server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
