//! Checks applied to create requests before anything is sent.

use std::collections::BTreeMap;
use std::fmt;

use tailboard_shared::{NewAircraft, NewCrew, NewFlight};

/// Field name to message. At most one message per field; the first rule that fails wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    fn require_text(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, format!("{} is required", field));
        }
    }

    fn require_positive(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            self.add(field, format!("{} must be greater than zero", field));
        }
    }

    fn require_nonzero(&mut self, field: &str, value: u32) {
        if value == 0 {
            self.add(field, format!("{} must be greater than zero", field));
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.fields {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

impl Validate for NewFlight {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("flight_id", &self.flight_id);
        errors.require_text("route", &self.route);
        errors.require_text("origin", &self.origin);
        errors.require_text("destination", &self.destination);
        errors.require_text("required_subtype", &self.required_subtype);
        errors.require_positive("distance", self.distance);
        errors.require_nonzero("passengers", self.passengers);
        if self.arr_time <= self.dep_time {
            errors.add("arr_time", "Arrival time must be after departure time");
        }
        errors.into_result()
    }
}

impl Validate for NewAircraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("tail_number", &self.tail_number);
        errors.require_text("subtype", &self.subtype);
        errors.require_text("current_location", &self.current_location);
        errors.require_nonzero("capacity", self.capacity);
        errors.require_positive("fuel_efficiency", self.fuel_efficiency);
        errors.into_result()
    }
}

impl Validate for NewCrew {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require_text("crew_id", &self.crew_id);
        errors.require_text("current_location", &self.current_location);
        if !self.qualifications.iter().any(|q| !q.trim().is_empty()) {
            errors.add("qualifications", "At least one qualification is required");
        }
        errors.into_result()
    }
}
