use std::sync::Arc;

use tailboard_core::{CreateError, CreateResult, ResourceFetcher, Validate};
use tailboard_shared::{AssignmentsBundle, CreateAck, NewAircraft, NewCrew, NewFlight};
use tracing::info;

/// Create operations. Each validates locally first and sends nothing when that fails.
///
/// None of them touch the dashboard view; callers follow a success with
/// [`DashboardSync::refresh_now`](crate::DashboardSync::refresh_now).
#[derive(Clone)]
pub struct Commands {
    fetcher: Arc<dyn ResourceFetcher>,
}

impl Commands {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>) -> Self {
        Self { fetcher }
    }

    pub async fn add_aircraft(&self, aircraft: &NewAircraft) -> CreateResult<CreateAck> {
        aircraft.validate().map_err(CreateError::Invalid)?;
        let ack = self.fetcher.create_aircraft(aircraft).await?;
        info!("Aircraft {} added", aircraft.tail_number);
        Ok(ack)
    }

    /// Returns the assignment bundle the backend recomputed after inserting the flight.
    pub async fn add_flight(&self, flight: &NewFlight) -> CreateResult<AssignmentsBundle> {
        flight.validate().map_err(CreateError::Invalid)?;
        let bundle = self.fetcher.create_flight(flight).await?;
        info!(
            "Flight {} added; {} unassigned after reassignment",
            flight.flight_id,
            bundle.unassigned_flights.len()
        );
        Ok(bundle)
    }

    pub async fn add_crew(&self, crew: &NewCrew) -> CreateResult<CreateAck> {
        crew.validate().map_err(CreateError::Invalid)?;
        let ack = self.fetcher.create_crew(crew).await?;
        info!("Crew {} added", crew.crew_id);
        Ok(ack)
    }
}
