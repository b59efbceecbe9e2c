//! Plan generation: renders the fixed trip prompt and submits it to the
//! configured text-completion backend.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::LlmConfig;
use crate::llm::{LlmClient, LlmError, LlmRequest};
use crate::models::TripRequest;

pub const SYSTEM_PROMPT: &str = "You are an AI-powered travel planning assistant. Provide a detailed travel plan from [Source] to [Destination] for the dates [Start Date] to [End Date], including all modes of transport (flights, trains, buses, cabs), estimated costs, and any relevant travel tips.";

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

pub struct PlanGenerator {
    client: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
}

impl PlanGenerator {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn from_config(client: Arc<dyn LlmClient>, config: &LlmConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// The two-message prompt for a trip. Budget and travel mode are not part
    /// of the template.
    #[must_use]
    pub fn prompt(&self, trip: &TripRequest) -> LlmRequest {
        LlmRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "From {} to {} from {} to {}.",
                trip.source,
                trip.destination,
                trip.formatted_start_date(),
                trip.formatted_end_date()
            ),
            model: self.model.clone(),
            temperature: self.temperature,
        }
    }

    /// Returns the model's text verbatim
    #[instrument(skip(self, trip), fields(source = %trip.source, destination = %trip.destination))]
    pub async fn generate(&self, trip: &TripRequest) -> Result<String, LlmError> {
        let plan = self.client.complete(self.prompt(trip)).await?;
        info!("Received travel plan ({} chars)", plan.len());
        Ok(plan)
    }
}
