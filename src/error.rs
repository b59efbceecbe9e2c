//! Error types and handling for the trip planner

use thiserror::Error;

/// Main error type for the trip planner
#[derive(Error, Debug)]
pub enum TripPlannerError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Errors talking to the completion or weather services
    #[error("API error: {message}")]
    Api { message: String },

    /// Form input rejected before any outbound call
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Template rendering errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TripPlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Message safe to show on the form page
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TripPlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            TripPlannerError::Api { message } => format!("An error occurred: {message}"),
            TripPlannerError::Validation { message } => message.clone(),
            TripPlannerError::Render { .. } => {
                "Unable to render the page. Please try again.".to_string()
            }
            TripPlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<handlebars::RenderError> for TripPlannerError {
    fn from(err: handlebars::RenderError) -> Self {
        Self::render(err.to_string())
    }
}
