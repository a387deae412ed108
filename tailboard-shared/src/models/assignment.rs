use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::alert::Alert;

/// A flight paired with the tail (and, when the crew pass found one, the crew) operating it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assignment {
    pub flight_id: String,
    pub tail_number: String,
    #[serde(default)]
    pub crew_id: Option<String>,
    pub route: String,
    #[serde(with = "crate::instant")]
    pub dep_time: DateTime<Utc>,
    #[serde(with = "crate::instant")]
    pub arr_time: DateTime<Utc>,
    #[serde(default)]
    pub co2_emitted: f64,
}

/// Everything the assignments endpoint returns. The three lists come from one run and are
/// always replaced together.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AssignmentsBundle {
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    #[serde(default)]
    pub unassigned_flights: Vec<String>,
}
