pub mod aircraft;
pub mod alert;
pub mod assignment;
pub mod crew;
pub mod flight;
pub mod requests;
pub mod statistics;

pub use aircraft::{Aircraft, Trip, MAINTENANCE_HOURS_THRESHOLD};
pub use alert::{Alert, AlertKind};
pub use assignment::{Assignment, AssignmentsBundle};
pub use crew::{Crew, Qualifications};
pub use flight::{AircraftSummary, CrewSummary, Flight};
pub use requests::{ApiErrorBody, CreateAck, NewAircraft, NewCrew, NewFlight};
pub use statistics::{AircraftUtilization, CrewUtilization, Statistics};
