//! Data models for the trip planner
//!
//! - Trip: the submitted form and the validated request built from it
//! - Cities: fixed select options and booking links

pub mod cities;
pub mod trip;

pub use cities::{BOOKING_LINKS, BookingCategory, BookingLink, MAJOR_CITIES, location_options};
pub use trip::{OTHER_LOCATION, TravelMode, TripForm, TripRequest, validate_location};
