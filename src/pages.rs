//! Server-rendered form and result page

use chrono::{Local, NaiveDate};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use crate::TripPlannerError;
use crate::models::{BOOKING_LINKS, BookingCategory, OTHER_LOCATION, TravelMode, TripForm, location_options};
use crate::service::TripOutcome;

pub const TITLE: &str = "AI-Powered Travel Planner";

const INDEX_TEMPLATE: &str = "index";

#[derive(Debug, Serialize)]
struct SelectOption {
    value: &'static str,
    selected: bool,
}

#[derive(Debug, Default, Serialize)]
struct ResultView {
    plan: Option<String>,
    weather_line: Option<String>,
    error: Option<String>,
}

impl From<&TripOutcome> for ResultView {
    fn from(outcome: &TripOutcome) -> Self {
        match outcome {
            TripOutcome::Planned(trip) => Self {
                plan: Some(trip.plan.clone()),
                weather_line: Some(trip.weather_line()),
                error: None,
            },
            TripOutcome::Rejected { error } | TripOutcome::Failed { error } => Self {
                error: Some(error.clone()),
                ..Self::default()
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct PageContext<'a> {
    title: &'static str,
    booking_links: &'static [BookingCategory],
    source_options: Vec<SelectOption>,
    destination_options: Vec<SelectOption>,
    mode_options: Vec<SelectOption>,
    source_other: &'a str,
    destination_other: &'a str,
    start_date: String,
    end_date: String,
    budget: &'a str,
    result: Option<ResultView>,
}

/// Handlebars registry holding the embedded page templates
pub struct Pages {
    hbs: Handlebars<'static>,
}

impl Pages {
    pub fn new() -> Result<Self, TripPlannerError> {
        let mut hbs = Handlebars::new();
        hbs.register_template_string(INDEX_TEMPLATE, include_str!("../templates/index.hbs"))
            .map_err(|e| TripPlannerError::render(e.to_string()))?;
        Ok(Self { hbs })
    }

    /// The empty form, dates preset to today
    pub fn render_form(&self) -> Result<String, TripPlannerError> {
        self.render(&TripForm::default(), None, Local::now().date_naive())
    }

    /// The form as submitted, followed by the plan or the error
    pub fn render_outcome(&self, form: &TripForm, outcome: &TripOutcome) -> Result<String, TripPlannerError> {
        self.render(form, Some(outcome), Local::now().date_naive())
    }

    fn render(
        &self,
        form: &TripForm,
        outcome: Option<&TripOutcome>,
        today: NaiveDate,
    ) -> Result<String, TripPlannerError> {
        let today = today.format("%Y-%m-%d").to_string();
        let date_or_today = |value: &str| {
            if value.trim().is_empty() {
                today.clone()
            } else {
                value.to_string()
            }
        };

        let context = PageContext {
            title: TITLE,
            booking_links: &BOOKING_LINKS,
            source_options: location_select(&form.source),
            destination_options: location_select(&form.destination),
            mode_options: mode_select(&form.preferred_mode),
            source_other: &form.source_other,
            destination_other: &form.destination_other,
            start_date: date_or_today(&form.start_date),
            end_date: date_or_today(&form.end_date),
            budget: if form.budget.is_empty() { "0" } else { form.budget.as_str() },
            result: outcome.map(ResultView::from),
        };

        debug!("Rendering page (with result: {})", context.result.is_some());
        Ok(self.hbs.render(INDEX_TEMPLATE, &context)?)
    }
}

fn location_select(current: &str) -> Vec<SelectOption> {
    let current = if current.is_empty() { OTHER_LOCATION } else { current };
    location_options()
        .into_iter()
        .map(|value| SelectOption {
            value,
            selected: value == current,
        })
        .collect()
}

fn mode_select(current: &str) -> Vec<SelectOption> {
    let current: TravelMode = current.parse().unwrap_or_default();
    TravelMode::ALL
        .into_iter()
        .map(|mode| SelectOption {
            value: mode.as_str(),
            selected: mode == current,
        })
        .collect()
}
