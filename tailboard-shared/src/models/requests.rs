use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::crew::Qualifications;

/// Body of `POST /aircraft`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAircraft {
    pub tail_number: String,
    pub subtype: String,
    pub capacity: u32,
    pub fuel_efficiency: f64,
    pub current_location: String,
    #[serde(with = "crate::instant")]
    pub available_from: DateTime<Utc>,
}

/// Body of `POST /flights`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewFlight {
    pub flight_id: String,
    pub route: String,
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    #[serde(with = "crate::instant")]
    pub dep_time: DateTime<Utc>,
    #[serde(with = "crate::instant")]
    pub arr_time: DateTime<Utc>,
    pub required_subtype: String,
    pub passengers: u32,
}

/// Body of `POST /crews`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCrew {
    pub crew_id: String,
    pub qualifications: Qualifications,
    pub current_location: String,
    #[serde(with = "crate::instant")]
    pub available_from: DateTime<Utc>,
}

/// Success body of the aircraft and crew create endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreateAck {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body every endpoint uses on a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_flight_wire_format() {
        let body = NewFlight {
            flight_id: "AI101".to_string(),
            route: "DEL-BOM".to_string(),
            origin: "Delhi".to_string(),
            destination: "Mumbai".to_string(),
            distance: 1140.0,
            dep_time: Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap(),
            arr_time: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).unwrap(),
            required_subtype: "A320".to_string(),
            passengers: 150,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["dep_time"], "2025-03-01T08:00:00.000Z");
        assert_eq!(value["distance"], 1140.0);
        assert_eq!(value["passengers"], 150);
    }
}
