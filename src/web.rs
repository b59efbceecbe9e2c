use std::sync::Arc;

use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, instrument};

use crate::api;
use crate::config::{ServerConfig, TripPlannerConfig};
use crate::models::TripForm;
use crate::pages::Pages;
use crate::service::TripPlannerService;

const MAX_FORM_BYTES: usize = 16 * 1024;

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TripPlannerService>,
    pub pages: Arc<Pages>,
}

impl AppState {
    pub fn new(service: TripPlannerService) -> crate::Result<Self> {
        Ok(Self {
            service: Arc::new(service),
            pages: Arc::new(Pages::new()?),
        })
    }
}

pub fn app(state: AppState, config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/plan", post(submit))
        .nest("/api", api::router().layer(cors))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: &TripPlannerConfig) -> crate::Result<()> {
    let service = TripPlannerService::from_config(config)?;
    let app = app(AppState::new(service)?, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Web server running at http://localhost:{}", config.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
}

async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    state.pages.render_form().map(Html).map_err(|err| {
        error!("Failed to render form page: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

#[instrument(skip_all)]
async fn submit(
    State(state): State<AppState>,
    Form(form): Form<TripForm>,
) -> Result<Html<String>, StatusCode> {
    let outcome = state.service.plan_trip(&form).await;
    state
        .pages
        .render_outcome(&form, &outcome)
        .map(Html)
        .map_err(|err| {
            error!("Failed to render result page: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
