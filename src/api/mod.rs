use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use crate::models::{BOOKING_LINKS, BookingCategory, MAJOR_CITIES, TravelMode};
use crate::service::TripOutcome;
use crate::{models::TripForm, web::AppState};

/// Choices the form offers, for clients rendering their own UI
#[derive(Serialize)]
pub struct ApiOptions {
    pub cities: &'static [&'static str],
    pub modes: Vec<&'static str>,
    pub booking_links: &'static [BookingCategory],
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/cities", get(get_cities))
        .route("/options", get(get_options))
        .route("/plan", post(plan_trip))
}

async fn health() -> &'static str {
    "ok"
}

async fn get_cities() -> Json<&'static [&'static str]> {
    Json(&MAJOR_CITIES)
}

async fn get_options() -> Json<ApiOptions> {
    Json(ApiOptions {
        cities: &MAJOR_CITIES,
        modes: TravelMode::ALL.iter().map(|mode| mode.as_str()).collect(),
        booking_links: &BOOKING_LINKS,
    })
}

async fn plan_trip(
    State(state): State<AppState>,
    Json(form): Json<TripForm>,
) -> (StatusCode, Json<TripOutcome>) {
    let outcome = state.service.plan_trip(&form).await;
    let status = match outcome {
        TripOutcome::Planned(_) => StatusCode::OK,
        TripOutcome::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TripOutcome::Failed { .. } => StatusCode::BAD_GATEWAY,
    };
    (status, Json(outcome))
}
