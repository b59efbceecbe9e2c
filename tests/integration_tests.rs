//! Integration tests for the trip planner web app and CLI

use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use httpmock::Mock;
use httpmock::prelude::*;
use serde_json::{Value, json};
use tower::ServiceExt;
use tripplanner::config::ServerConfig;
use tripplanner::web::{self, AppState};
use tripplanner::{
    LlmClient, LlmError, LlmRequest, PlanGenerator, TripPlannerService, WeatherAnnotator,
};

/// Deterministic model that counts its calls
#[derive(Default)]
struct CountingModel {
    calls: AtomicUsize,
}

#[async_trait]
impl LlmClient for CountingModel {
    async fn complete(&self, request: LlmRequest) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("Plan: {}", request.user))
    }
}

/// Model whose every call fails
struct UnavailableModel;

#[async_trait]
impl LlmClient for UnavailableModel {
    async fn complete(&self, _request: LlmRequest) -> Result<String, LlmError> {
        Err(LlmError::Response("model overloaded".to_string()))
    }
}

struct TestApp {
    router: axum::Router,
    model: Arc<CountingModel>,
    weather: MockServer,
}

fn router_with(model: Arc<dyn LlmClient>, weather: &MockServer) -> axum::Router {
    let service = TripPlannerService::new(
        PlanGenerator::new(model),
        WeatherAnnotator::with_timeout(
            &weather.base_url(),
            Some("test-key".to_string()),
            Duration::from_secs(5),
        )
        .unwrap(),
    );
    web::app(AppState::new(service).unwrap(), &ServerConfig::default())
}

async fn test_app() -> TestApp {
    let weather = MockServer::start_async().await;
    let model = Arc::new(CountingModel::default());
    let router = router_with(model.clone(), &weather);

    TestApp {
        router,
        model,
        weather,
    }
}

async fn mock_weather<'a>(server: &'a MockServer, description: &str) -> Mock<'a> {
    server
        .mock_async(|when, then| {
            when.method(GET).path("/weather");
            then.status(200)
                .json_body(json!({"weather": [{"description": description}]}));
        })
        .await
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_request(body: &str) -> Request<Body> {
    Request::post("/plan")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request(body: Value) -> Request<Body> {
    Request::post("/api/plan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_form_page_is_served() {
    let app = test_app().await;

    let response = app
        .router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("AI-Powered Travel Planner"));
    assert!(html.contains("Plan Trip"));
    assert!(html.contains("<option value=\"Mumbai\">Mumbai</option>"));
}

#[tokio::test]
async fn test_form_submission_renders_plan_and_weather() {
    let app = test_app().await;
    let weather = mock_weather(&app.weather, "scattered clouds").await;

    let response = app
        .router
        .oneshot(form_request(
            "source=Mumbai&source_other=&destination=Delhi&destination_other=\
             &start_date=2024-01-01&end_date=2024-01-05&budget=0&preferred_mode=Any",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Travel Plan:"));
    assert!(html.contains("Plan: From Mumbai to Delhi from 2024-01-01 to 2024-01-05."));
    assert!(html.contains("Weather forecast at Delhi: scattered clouds"));
    assert_eq!(app.model.calls.load(Ordering::SeqCst), 1);
    weather.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_form_submission_with_other_location() {
    let app = test_app().await;
    let weather = mock_weather(&app.weather, "light rain").await;

    let response = app
        .router
        .oneshot(form_request(
            "source=Other&source_other=Navi+Mumbai&destination=Other&destination_other=Ooty\
             &start_date=2024-05-01&end_date=2024-05-03",
        ))
        .await
        .unwrap();

    let html = body_text(response).await;
    assert!(html.contains("Plan: From Navi Mumbai to Ooty from 2024-05-01 to 2024-05-03."));
    assert!(html.contains("Weather forecast at Ooty: light rain"));
    weather.assert_async().await;
}

#[tokio::test]
async fn test_invalid_location_is_rejected_without_outbound_calls() {
    let app = test_app().await;
    let weather = mock_weather(&app.weather, "haze").await;

    let response = app
        .router
        .oneshot(form_request(
            "source=Other&source_other=123&destination=Delhi&start_date=2024-01-01&end_date=2024-01-05",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Please enter valid locations."));
    assert!(!html.contains("Travel Plan:"));
    assert_eq!(app.model.calls.load(Ordering::SeqCst), 0);
    weather.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_api_plan_returns_json_outcome() {
    let app = test_app().await;
    let weather = mock_weather(&app.weather, "mist").await;

    let response = app
        .router
        .oneshot(json_request(json!({
            "source": "Pune",
            "destination": "Jaipur",
            "start_date": "2024-02-10",
            "end_date": "2024-02-14",
            "budget": "5000",
            "preferred_mode": "Train"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "planned");
    assert_eq!(body["plan"], "Plan: From Pune to Jaipur from 2024-02-10 to 2024-02-14.");
    assert_eq!(body["weather"], "mist");
    assert_eq!(body["request"]["preferred_mode"], "Train");
    weather.assert_async().await;
}

#[tokio::test]
async fn test_api_plan_rejects_invalid_locations() {
    let app = test_app().await;
    let weather = mock_weather(&app.weather, "mist").await;

    let response = app
        .router
        .oneshot(json_request(json!({"source": "Pune!", "destination": "Jaipur"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["error"], "Please enter valid locations.");
    weather.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_api_plan_reports_generation_failure_as_bad_gateway() {
    let weather = MockServer::start_async().await;
    let weather_mock = mock_weather(&weather, "mist").await;
    let router = router_with(Arc::new(UnavailableModel), &weather);

    let response = router
        .oneshot(json_request(json!({
            "source": "Pune",
            "destination": "Jaipur",
            "start_date": "2024-02-10",
            "end_date": "2024-02-14"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["status"], "failed");
    assert_eq!(body["error"], "An error occurred: response error: model overloaded");
    weather_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_api_health_and_options() {
    let app = test_app().await;

    let response = app
        .router
        .clone()
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");

    let response = app
        .router
        .oneshot(Request::get("/api/options").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["cities"][0], "Mumbai");
    assert_eq!(body["modes"], json!(["Any", "Flight", "Train", "Bus", "Cab"]));
    assert_eq!(body["booking_links"][1]["category"], "Trains");
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_tripplanner"))
        .arg("--help")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("AI-powered travel planner"));
    assert!(stdout.contains("plan"));
    assert!(stdout.contains("weather"));
}

#[test]
fn test_cli_plan_rejects_invalid_source() {
    let output = Command::new(env!("CARGO_BIN_EXE_tripplanner"))
        .args(["plan", "--source", "123", "--destination", "Delhi"])
        .env("TRIPPLANNER_LOGGING__LEVEL", "error")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Please enter valid locations."), "got: {stderr}");
}
