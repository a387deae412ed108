use std::fmt;

use serde::{Deserialize, Serialize};

/// The independently polled backend resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Aircraft,
    Flights,
    Crews,
    /// `/assignments`: assignments, alerts and unassigned flight ids in one payload.
    AssignmentsBundle,
    /// Reporting only; never part of a dashboard cycle.
    Statistics,
}

impl ResourceKind {
    /// Fetch order of a dashboard cycle. Completion order is not tied to this.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::AssignmentsBundle,
        ResourceKind::Aircraft,
        ResourceKind::Flights,
        ResourceKind::Crews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Aircraft => "aircraft",
            ResourceKind::Flights => "flights",
            ResourceKind::Crews => "crews",
            ResourceKind::AssignmentsBundle => "assignments",
            ResourceKind::Statistics => "statistics",
        }
    }

    /// Collection path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        self.as_str()
    }

    /// Whether `/{path}/{key}` exists for this resource.
    pub fn has_detail(&self) -> bool {
        matches!(self, ResourceKind::Aircraft | ResourceKind::Flights)
    }

    pub fn fetch_failed_message(&self) -> &'static str {
        match self {
            ResourceKind::Aircraft => "Failed to fetch aircraft",
            ResourceKind::Flights => "Failed to fetch flights",
            ResourceKind::Crews => "Failed to fetch crews",
            ResourceKind::AssignmentsBundle => "Failed to fetch assignments",
            ResourceKind::Statistics => "Failed to fetch statistics",
        }
    }

    pub fn not_found_message(&self) -> &'static str {
        match self {
            ResourceKind::Aircraft => "Aircraft not found",
            ResourceKind::Flights => "Flight not found",
            ResourceKind::Crews => "Crew not found",
            ResourceKind::AssignmentsBundle => "Assignments not found",
            ResourceKind::Statistics => "Statistics not found",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resources that accept `POST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreateKind {
    Aircraft,
    Flight,
    Crew,
}

impl CreateKind {
    pub fn resource(&self) -> ResourceKind {
        match self {
            CreateKind::Aircraft => ResourceKind::Aircraft,
            CreateKind::Flight => ResourceKind::Flights,
            CreateKind::Crew => ResourceKind::Crews,
        }
    }

    pub fn path(&self) -> &'static str {
        self.resource().path()
    }

    pub fn failed_message(&self) -> &'static str {
        match self {
            CreateKind::Aircraft => "Failed to add aircraft",
            CreateKind::Flight => "Failed to add flight",
            CreateKind::Crew => "Failed to add crew",
        }
    }
}

impl fmt::Display for CreateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateKind::Aircraft => f.write_str("create aircraft"),
            CreateKind::Flight => f.write_str("create flight"),
            CreateKind::Crew => f.write_str("create crew"),
        }
    }
}
