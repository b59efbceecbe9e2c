//! Trip request record and the form it is collected from

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::TripPlannerError;

/// Select value that switches a location field to free text
pub const OTHER_LOCATION: &str = "Other";

pub const INVALID_LOCATIONS_MESSAGE: &str = "Please enter valid locations.";
pub const INVALID_DATES_MESSAGE: &str = "Please enter valid dates.";
pub const INVALID_BUDGET_MESSAGE: &str = "Please enter a valid budget.";
pub const INVALID_MODE_MESSAGE: &str = "Please choose a valid transport mode.";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Accepts non-empty strings made only of ASCII letters and whitespace.
#[must_use]
pub fn validate_location(location: &str) -> bool {
    !location.is_empty()
        && location
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}

/// Preferred mode of transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    #[default]
    Any,
    Flight,
    Train,
    Bus,
    Cab,
}

impl TravelMode {
    pub const ALL: [TravelMode; 5] = [
        TravelMode::Any,
        TravelMode::Flight,
        TravelMode::Train,
        TravelMode::Bus,
        TravelMode::Cab,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Any => "Any",
            TravelMode::Flight => "Flight",
            TravelMode::Train => "Train",
            TravelMode::Bus => "Bus",
            TravelMode::Cab => "Cab",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = TripPlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TravelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TripPlannerError::validation(INVALID_MODE_MESSAGE))
    }
}

/// One submitted trip, validated. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    pub source: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Collected but not sent to the model
    pub budget: f64,
    /// Collected but not sent to the model
    pub preferred_mode: TravelMode,
}

impl TripRequest {
    #[must_use]
    pub fn formatted_start_date(&self) -> String {
        self.start_date.format(DATE_FORMAT).to_string()
    }

    #[must_use]
    pub fn formatted_end_date(&self) -> String {
        self.end_date.format(DATE_FORMAT).to_string()
    }
}

/// Raw form submission, all fields as the browser sends them.
///
/// `source` and `destination` carry the select value; when it is
/// [`OTHER_LOCATION`] the matching `*_other` text field is used instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripForm {
    pub source: String,
    pub source_other: String,
    pub destination: String,
    pub destination_other: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: String,
    pub preferred_mode: String,
}

impl TripForm {
    /// Builds a form for a plain source/destination pair, as the CLI does
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dates(mut self, start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        self.start_date = start_date.into();
        self.end_date = end_date.into();
        self
    }

    /// Location the user picked, resolving the "Other" fallback
    #[must_use]
    pub fn resolved_source(&self) -> &str {
        resolve_location(&self.source, &self.source_other)
    }

    #[must_use]
    pub fn resolved_destination(&self) -> &str {
        resolve_location(&self.destination, &self.destination_other)
    }

    /// Validate the form using today's local date for empty date fields
    pub fn into_request(&self) -> Result<TripRequest, TripPlannerError> {
        self.into_request_on(Local::now().date_naive())
    }

    /// Validate the form. Locations are checked first; dates are parsed but
    /// never compared with each other.
    pub fn into_request_on(&self, today: NaiveDate) -> Result<TripRequest, TripPlannerError> {
        let source = self.resolved_source();
        let destination = self.resolved_destination();
        if !validate_location(source) || !validate_location(destination) {
            return Err(TripPlannerError::validation(INVALID_LOCATIONS_MESSAGE));
        }

        let start_date = parse_date(&self.start_date, today)?;
        let end_date = parse_date(&self.end_date, today)?;
        let budget = parse_budget(&self.budget)?;
        let preferred_mode = if self.preferred_mode.trim().is_empty() {
            TravelMode::Any
        } else {
            self.preferred_mode.parse()?
        };

        Ok(TripRequest {
            source: source.to_string(),
            destination: destination.to_string(),
            start_date,
            end_date,
            budget,
            preferred_mode,
        })
    }
}

fn resolve_location<'a>(choice: &'a str, other: &'a str) -> &'a str {
    if choice == OTHER_LOCATION { other } else { choice }
}

fn parse_date(value: &str, today: NaiveDate) -> Result<NaiveDate, TripPlannerError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| TripPlannerError::validation(INVALID_DATES_MESSAGE))
}

fn parse_budget(value: &str) -> Result<f64, TripPlannerError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0.0);
    }
    match value.parse::<f64>() {
        Ok(budget) if budget.is_finite() && budget >= 0.0 => Ok(budget),
        _ => Err(TripPlannerError::validation(INVALID_BUDGET_MESSAGE)),
    }
}
