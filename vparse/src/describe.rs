//! Natural-language descriptions for recognized invocations.
//!
//! ```rust
//! use vparse::{DescriptionTemplates, coerce_arguments};
//!
//! let templates = DescriptionTemplates::default();
//! let args = coerce_arguments("hotel_id=123");
//!
//! assert_eq!(
//!     templates.describe("book_hotel", &args),
//!     "I'll book hotel ID 123 for you."
//! );
//! ```

use std::collections::HashMap;

use crate::{ArgMap, ArgValue};

type TemplateFn = Box<dyn Fn(&ArgMap) -> String + Send + Sync>;

/// Registry of tool-name-to-sentence templates. `describe` is total: an
/// unknown name falls back to a generic sentence, so the caller can always
/// substitute a description for bare call syntax.
pub struct DescriptionTemplates {
    templates: HashMap<String, TemplateFn>,
}

impl DescriptionTemplates {
    pub fn empty() -> Self {
        Self {
            templates: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, template: F)
    where
        F: Fn(&ArgMap) -> String + Send + Sync + 'static,
    {
        self.templates.insert(name.into(), Box::new(template));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn describe(&self, name: &str, args: &ArgMap) -> String {
        match self.templates.get(name) {
            Some(template) => template(args),
            None => format!("I'll use the {name} tool to help you."),
        }
    }
}

impl Default for DescriptionTemplates {
    fn default() -> Self {
        let mut templates = Self::empty();

        templates.register("search_flights", |args| {
            let departure = arg_text(args, "departure_airport", "your departure city");
            let arrival = arg_text(args, "arrival_airport", "your destination");
            format!("I'll search for flights from {departure} to {arrival} for you.")
        });

        templates.register("search_hotels", |args| {
            let location = args
                .get("location")
                .or_else(|| args.get("city"))
                .map(ArgValue::to_string)
                .unwrap_or_else(|| "your destination".to_string());
            format!("Let me search for hotels in {location}.")
        });

        templates.register("book_hotel", |args| {
            let hotel_id = arg_text(args, "hotel_id", "the selected hotel");
            format!("I'll book hotel ID {hotel_id} for you.")
        });

        templates.register("book_car_rental", |args| {
            let rental_id = arg_text(args, "rental_id", "the selected car");
            format!("I'll book car rental ID {rental_id} for you.")
        });

        templates.register("cancel_booking", |args| {
            let booking_type = arg_text(args, "booking_type", "booking");
            match args.get("booking_id") {
                Some(booking_id) => {
                    format!("I'll cancel your {booking_type} {booking_id} for you.")
                }
                None => format!("I'll cancel your {booking_type} for you."),
            }
        });

        templates.register("lookup_policy", |_args| {
            "Let me look up our company policies for you.".to_string()
        });

        templates.register("fetch_user_flight_information", |_args| {
            "Let me check your current flight bookings.".to_string()
        });

        templates.register("web_search_tool", |args| {
            let query = arg_text(args, "query", "your request");
            format!("I'll search the web for information about {query}.")
        });

        templates
    }
}

fn arg_text(args: &ArgMap, key: &str, fallback: &str) -> String {
    args.get(key)
        .map(ArgValue::to_string)
        .unwrap_or_else(|| fallback.to_string())
}
