//! One form submission, end to end: validate, generate, annotate.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::TripPlannerError;
use crate::config::TripPlannerConfig;
use crate::llm::{GeminiClient, GeminiClientConfig, LlmClient};
use crate::models::{TripForm, TripRequest};
use crate::planner::PlanGenerator;
use crate::weather::WeatherAnnotator;

/// A generated plan with its weather annotation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripPlan {
    pub request: TripRequest,
    /// Model output, verbatim
    pub plan: String,
    /// Weather description, or the lookup's failure text
    pub weather: String,
}

impl TripPlan {
    #[must_use]
    pub fn weather_line(&self) -> String {
        format!(
            "Weather forecast at {}: {}",
            self.request.destination, self.weather
        )
    }
}

/// What the user sees after submitting the form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TripOutcome {
    Planned(TripPlan),
    /// The form failed validation; nothing was sent anywhere
    Rejected { error: String },
    /// Plan generation failed
    Failed { error: String },
}

impl TripOutcome {
    /// Plain-text rendering, as printed by the CLI
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            TripOutcome::Planned(trip) => {
                format!("Travel Plan:\n{}\n\n{}", trip.plan, trip.weather_line())
            }
            TripOutcome::Rejected { error } | TripOutcome::Failed { error } => error.clone(),
        }
    }

    #[must_use]
    pub fn is_planned(&self) -> bool {
        matches!(self, TripOutcome::Planned(_))
    }
}

pub struct TripPlannerService {
    planner: PlanGenerator,
    weather: WeatherAnnotator,
}

impl TripPlannerService {
    pub fn new(planner: PlanGenerator, weather: WeatherAnnotator) -> Self {
        Self { planner, weather }
    }

    /// Wire the Gemini and OpenWeatherMap clients from configuration
    pub fn from_config(config: &TripPlannerConfig) -> Result<Self, TripPlannerError> {
        let llm = GeminiClient::new(GeminiClientConfig::from(&config.llm))
            .map_err(|e| TripPlannerError::config(e.to_string()))?;
        let llm: Arc<dyn LlmClient> = Arc::new(llm);

        Ok(Self::new(
            PlanGenerator::from_config(llm, &config.llm),
            WeatherAnnotator::new(&config.weather)?,
        ))
    }

    #[must_use]
    pub fn weather(&self) -> &WeatherAnnotator {
        &self.weather
    }

    /// Never fails: every error becomes the outcome's message
    #[instrument(skip_all)]
    pub async fn plan_trip(&self, form: &TripForm) -> TripOutcome {
        let request = match form.into_request() {
            Ok(request) => request,
            Err(err) => {
                info!("Rejected trip form: {}", err);
                return TripOutcome::Rejected {
                    error: err.user_message(),
                };
            }
        };
        self.plan_request(request).await
    }

    #[instrument(skip_all, fields(source = %request.source, destination = %request.destination))]
    pub async fn plan_request(&self, request: TripRequest) -> TripOutcome {
        let plan = match self.planner.generate(&request).await {
            Ok(plan) => plan,
            Err(err) => {
                warn!("Plan generation failed: {}", err);
                return TripOutcome::Failed {
                    error: TripPlannerError::api(err.to_string()).user_message(),
                };
            }
        };

        let weather = self.weather.describe(&request.destination).await;

        TripOutcome::Planned(TripPlan {
            request,
            plan,
            weather,
        })
    }
}
