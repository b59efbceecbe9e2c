//! `tripplanner` - AI-powered travel planning
//!
//! Collects a trip (source, destination, dates) from a form, asks a
//! text-generation model for an itinerary and annotates it with the current
//! weather at the destination.

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod pages;
pub mod planner;
pub mod service;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::TripPlannerConfig;
pub use error::TripPlannerError;
pub use llm::{GeminiClient, LlmClient, LlmError, LlmRequest};
pub use models::{TravelMode, TripForm, TripRequest, validate_location};
pub use planner::PlanGenerator;
pub use service::{TripOutcome, TripPlan, TripPlannerService};
pub use weather::{WeatherAnnotator, WeatherError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlannerError>;
