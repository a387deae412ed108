use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crew::Qualifications;

/// A scheduled flight leg.
///
/// `aircraft_details` / `crew_details` are only present on the detail endpoint, and only
/// once the flight has been assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Flight {
    pub flight_id: String,
    pub route: String,
    pub origin: String,
    pub destination: String,
    /// km
    pub distance: f64,
    #[serde(with = "crate::instant")]
    pub dep_time: DateTime<Utc>,
    #[serde(with = "crate::instant")]
    pub arr_time: DateTime<Utc>,
    pub required_subtype: String,
    pub passengers: u32,
    #[serde(default)]
    pub assigned_tail: Option<String>,
    #[serde(default)]
    pub assigned_crew: Option<String>,
    #[serde(default)]
    pub co2_emitted: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_details: Option<AircraftSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crew_details: Option<CrewSummary>,
}

impl Flight {
    pub fn is_assigned(&self) -> bool {
        self.assigned_tail.is_some()
    }

    pub fn block_hours(&self) -> f64 {
        (self.arr_time - self.dep_time).num_seconds() as f64 / 3600.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AircraftSummary {
    pub tail_number: String,
    pub subtype: String,
    pub capacity: u32,
    pub fuel_efficiency: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewSummary {
    pub crew_id: String,
    pub qualifications: Qualifications,
    pub duty_hours: f64,
}
