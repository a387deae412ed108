use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flight hours after which the backend raises a maintenance alert for a tail.
pub const MAINTENANCE_HOURS_THRESHOLD: f64 = 20.0;

/// A physical aircraft, keyed by tail number.
///
/// The list endpoint omits `trips`; the detail endpoint embeds every flight currently
/// assigned to the tail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Aircraft {
    pub tail_number: String,
    pub subtype: String,
    pub capacity: u32,
    /// kg of CO2 per km
    pub fuel_efficiency: f64,
    pub current_location: String,
    #[serde(with = "crate::instant")]
    pub available_from: DateTime<Utc>,
    #[serde(default)]
    pub needs_maintenance: bool,
    #[serde(default)]
    pub hours_flown: f64,
    #[serde(default)]
    pub total_flights: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trips: Vec<Trip>,
}

impl Aircraft {
    /// True when the backend flagged the tail or its flown hours crossed the threshold.
    pub fn requires_maintenance(&self) -> bool {
        self.needs_maintenance || self.hours_flown >= MAINTENANCE_HOURS_THRESHOLD
    }

    /// Emissions of all embedded trips, in kg.
    pub fn trips_co2_total(&self) -> f64 {
        self.trips.iter().map(|t| t.co2_emitted).sum()
    }
}

/// A flight flown (or scheduled) by a specific tail, as embedded in the aircraft detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Trip {
    pub flight_id: String,
    pub route: String,
    #[serde(with = "crate::instant")]
    pub dep_time: DateTime<Utc>,
    #[serde(with = "crate::instant")]
    pub arr_time: DateTime<Utc>,
    #[serde(default)]
    pub co2_emitted: f64,
}
