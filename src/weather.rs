//! Current-weather lookup against the OpenWeatherMap API
//!
//! A lookup never fails outward: [`WeatherAnnotator::describe`] turns every
//! failure into a line of text that is shown in place of the description.

use std::time::{Duration, Instant};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::WeatherConfig;
use crate::TripPlannerError;

/// Failure categories of a weather lookup. `Display` is the text shown to the
/// user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WeatherError {
    /// The service answered with an error status
    #[error("HTTP error occurred: {0}")]
    Http(String),
    /// The service could not be reached
    #[error("Connection error occurred: {0}")]
    Connection(String),
    #[error("Timeout error occurred: {0}")]
    Timeout(String),
    /// Anything else, including an unusable response body
    #[error("An error occurred: {0}")]
    Request(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        // the URL carries the API key
        let err = err.without_url();
        let detail = err.to_string();
        if err.is_timeout() {
            WeatherError::Timeout(detail)
        } else if err.is_connect() {
            WeatherError::Connection(detail)
        } else if err.is_status() {
            WeatherError::Http(detail)
        } else {
            WeatherError::Request(detail)
        }
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

pub struct WeatherAnnotator {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherAnnotator {
    pub fn new(config: &WeatherConfig) -> Result<Self, TripPlannerError> {
        Self::with_timeout(
            &config.base_url,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_seconds.into()),
        )
    }

    pub fn with_timeout(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, TripPlannerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tripplanner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripPlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_url(&self, city: &str) -> String {
        let mut url = format!("{}/weather?q={}", self.base_url, urlencoding::encode(city));
        if let Some(key) = &self.api_key {
            url.push_str("&appid=");
            url.push_str(&urlencoding::encode(key));
        }
        url
    }

    /// Short description of the first current weather condition for `city`
    #[instrument(skip(self))]
    pub async fn fetch_description(&self, city: &str) -> Result<String, WeatherError> {
        let start_time = Instant::now();

        let response = self
            .client
            .get(self.build_url(city))
            .send()
            .await?
            .error_for_status()?;

        debug!("Weather response received: {}", response.status());

        let body: CurrentWeatherResponse = response.json().await?;
        let description = body
            .weather
            .into_iter()
            .next()
            .map(|condition| condition.description)
            .ok_or_else(|| WeatherError::Request("no weather conditions in response".to_string()))?;

        info!(
            "Retrieved current weather in {:.3}s",
            start_time.elapsed().as_secs_f64()
        );
        Ok(description)
    }

    /// Description on success, otherwise the failure text
    pub async fn describe(&self, city: &str) -> String {
        match self.fetch_description(city).await {
            Ok(description) => description,
            Err(err) => {
                warn!("Weather lookup for '{}' failed: {}", city, err);
                err.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn annotator(base_url: &str, timeout: Duration) -> WeatherAnnotator {
        WeatherAnnotator::with_timeout(base_url, Some("test-key".to_string()), timeout).unwrap()
    }

    #[test]
    fn test_build_url_encodes_city_and_key() {
        let annotator = annotator("http://api.example/data/2.5/", Duration::from_secs(1));
        assert_eq!(
            annotator.build_url("New Delhi"),
            "http://api.example/data/2.5/weather?q=New%20Delhi&appid=test-key"
        );
    }

    #[test]
    fn test_new_uses_configured_base_url() {
        let annotator = WeatherAnnotator::new(&WeatherConfig::default()).unwrap();
        assert!(annotator.build_url("Delhi").starts_with("http://api.openweathermap.org/data/2.5/weather?q=Delhi"));
    }

    #[tokio::test]
    async fn test_describe_returns_first_condition() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/weather")
                    .query_param("q", "Delhi")
                    .query_param("appid", "test-key");
                then.status(200).json_body(json!({
                    "weather": [
                        {"id": 721, "main": "Haze", "description": "haze", "icon": "50d"},
                        {"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}
                    ],
                    "name": "Delhi"
                }));
            })
            .await;

        let line = annotator(&server.base_url(), Duration::from_secs(5))
            .describe("Delhi")
            .await;

        assert_eq!(line, "haze");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_is_an_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(404)
                    .json_body(json!({"cod": "404", "message": "city not found"}));
            })
            .await;

        let annotator = annotator(&server.base_url(), Duration::from_secs(5));
        let err = annotator.fetch_description("Atlantis").await.unwrap_err();
        assert!(matches!(err, WeatherError::Http(_)));

        let line = annotator.describe("Atlantis").await;
        assert!(line.starts_with("HTTP error occurred: "), "got: {line}");
        assert!(line.contains("404"));
        assert!(!line.contains("test-key"));
    }

    #[tokio::test]
    async fn test_slow_service_is_a_timeout() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"weather": [{"description": "late"}]}));
            })
            .await;

        let line = annotator(&server.base_url(), Duration::from_millis(200))
            .describe("Delhi")
            .await;

        assert!(line.starts_with("Timeout error occurred: "), "got: {line}");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_connection_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let line = annotator(&format!("http://127.0.0.1:{port}"), Duration::from_secs(5))
            .describe("Delhi")
            .await;

        assert!(line.starts_with("Connection error occurred: "), "got: {line}");
        assert!(!line.starts_with("Timeout error occurred: "));
    }

    #[tokio::test]
    async fn test_body_without_conditions_is_a_generic_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(200).json_body(json!({"weather": []}));
            })
            .await;

        let err = annotator(&server.base_url(), Duration::from_secs(5))
            .fetch_description("Delhi")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "An error occurred: no weather conditions in response"
        );
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_generic_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/weather");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let line = annotator(&server.base_url(), Duration::from_secs(5))
            .describe("Delhi")
            .await;

        assert!(line.starts_with("An error occurred: "), "got: {line}");
    }
}
