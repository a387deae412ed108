use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fleet-wide emission and utilisation figures, consumed by reporting screens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Statistics {
    #[serde(default)]
    pub total_co2: f64,
    #[serde(default)]
    pub average_co2_per_flight: f64,
    #[serde(default)]
    pub aircraft_utilization: BTreeMap<String, AircraftUtilization>,
    #[serde(default)]
    pub crew_utilization: BTreeMap<String, CrewUtilization>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AircraftUtilization {
    #[serde(default)]
    pub hours_flown: f64,
    #[serde(default)]
    pub total_flights: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CrewUtilization {
    #[serde(default)]
    pub duty_hours: f64,
    #[serde(default)]
    pub total_flights: u32,
}

impl Statistics {
    /// Tail with the most flights; ties resolve to the lexicographically first tail.
    pub fn busiest_aircraft(&self) -> Option<(&str, &AircraftUtilization)> {
        self.aircraft_utilization
            .iter()
            .fold(None, |best: Option<(&String, &AircraftUtilization)>, (tail, u)| match best {
                Some((_, b)) if b.total_flights >= u.total_flights => best,
                _ => Some((tail, u)),
            })
            .map(|(tail, u)| (tail.as_str(), u))
    }

    pub fn total_duty_hours(&self) -> f64 {
        self.crew_utilization.values().map(|c| c.duty_hours).sum()
    }
}
