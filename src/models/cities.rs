//! Fixed choices shown on the form page

use serde::Serialize;

/// Major Indian cities offered in the source and destination selects
pub const MAJOR_CITIES: [&str; 49] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Hyderabad",
    "Ahmedabad",
    "Chennai",
    "Kolkata",
    "Pune",
    "Surat",
    "Jaipur",
    "Lucknow",
    "Kanpur",
    "Nagpur",
    "Indore",
    "Thane",
    "Agra",
    "Vadodara",
    "Visakhapatnam",
    "Bhopal",
    "Chandigarh",
    "Coimbatore",
    "Patna",
    "Mysore",
    "Ranchi",
    "Gurgaon",
    "Noida",
    "Ghaziabad",
    "Faridabad",
    "Srinagar",
    "Jammu",
    "Dehradun",
    "Amritsar",
    "Varanasi",
    "Kochi",
    "Trivandrum",
    "Guwahati",
    "Raipur",
    "Jamshedpur",
    "Bhubaneswar",
    "Cuttack",
    "Siliguri",
    "Dhanbad",
    "Asansol",
    "Allahabad",
    "Meerut",
    "Jodhpur",
    "Udaipur",
    "Ajmer",
    "Kota",
];

/// A static link to a third-party booking site
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BookingLink {
    pub name: &'static str,
    pub url: &'static str,
}

/// Booking links grouped by transport category
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BookingCategory {
    pub category: &'static str,
    pub links: &'static [BookingLink],
}

pub const BOOKING_LINKS: [BookingCategory; 3] = [
    BookingCategory {
        category: "Flights",
        links: &[
            BookingLink {
                name: "Expedia",
                url: "https://www.expedia.com/",
            },
            BookingLink {
                name: "Kayak",
                url: "https://www.kayak.com/",
            },
        ],
    },
    BookingCategory {
        category: "Trains",
        links: &[
            BookingLink {
                name: "Indian Railways",
                url: "https://www.irctc.co.in/",
            },
            BookingLink {
                name: "Amtrak",
                url: "https://www.amtrak.com/",
            },
        ],
    },
    BookingCategory {
        category: "Buses",
        links: &[
            BookingLink {
                name: "RedBus",
                url: "https://www.redbus.in/",
            },
            BookingLink {
                name: "MakeMyTrip",
                url: "https://www.makemytrip.com/bus-tickets/",
            },
        ],
    },
];

/// Options for a location select: "Other" first, then the fixed cities
#[must_use]
pub fn location_options() -> Vec<&'static str> {
    std::iter::once(super::trip::OTHER_LOCATION)
        .chain(MAJOR_CITIES)
        .collect()
}
