use async_trait::async_trait;
use tailboard_shared::{
    Aircraft, AssignmentsBundle, CreateAck, Crew, Flight, NewAircraft, NewCrew, NewFlight,
    Statistics,
};

use crate::resource::ResourceKind;
use crate::{CreateResult, FetchError, FetchResult};

/// A decoded response of any resource, for callers that dispatch on [`ResourceKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Aircraft(Vec<Aircraft>),
    Flights(Vec<Flight>),
    Crews(Vec<Crew>),
    Assignments(AssignmentsBundle),
    Statistics(Statistics),
    AircraftDetail(Aircraft),
    FlightDetail(Flight),
}

impl Payload {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Payload::Aircraft(_) | Payload::AircraftDetail(_) => ResourceKind::Aircraft,
            Payload::Flights(_) | Payload::FlightDetail(_) => ResourceKind::Flights,
            Payload::Crews(_) => ResourceKind::Crews,
            Payload::Assignments(_) => ResourceKind::AssignmentsBundle,
            Payload::Statistics(_) => ResourceKind::Statistics,
        }
    }
}

/// Access to the scheduling backend.
///
/// One call is one request: implementations never retry, the next polling cycle does.
/// Non-success statuses map to [`FetchError::NotFound`] on detail fetches and
/// [`FetchError::Http`] on list fetches.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_aircraft(&self) -> FetchResult<Vec<Aircraft>>;

    async fn fetch_flights(&self) -> FetchResult<Vec<Flight>>;

    async fn fetch_crews(&self) -> FetchResult<Vec<Crew>>;

    async fn fetch_assignments(&self) -> FetchResult<AssignmentsBundle>;

    async fn fetch_aircraft_detail(&self, tail_number: &str) -> FetchResult<Aircraft>;

    async fn fetch_flight_detail(&self, flight_id: &str) -> FetchResult<Flight>;

    async fn fetch_statistics(&self) -> FetchResult<Statistics>;

    async fn create_aircraft(&self, aircraft: &NewAircraft) -> CreateResult<CreateAck>;

    /// The backend re-runs the assignment pass after inserting a flight and answers with the
    /// resulting bundle.
    async fn create_flight(&self, flight: &NewFlight) -> CreateResult<AssignmentsBundle>;

    async fn create_crew(&self, crew: &NewCrew) -> CreateResult<CreateAck>;

    /// Fetch by kind, with an entity key for detail fetches.
    async fn fetch(&self, kind: ResourceKind, key: Option<&str>) -> FetchResult<Payload> {
        match (kind, key) {
            (ResourceKind::Aircraft, None) => self.fetch_aircraft().await.map(Payload::Aircraft),
            (ResourceKind::Aircraft, Some(tail)) => self
                .fetch_aircraft_detail(tail)
                .await
                .map(Payload::AircraftDetail),
            (ResourceKind::Flights, None) => self.fetch_flights().await.map(Payload::Flights),
            (ResourceKind::Flights, Some(id)) => self
                .fetch_flight_detail(id)
                .await
                .map(Payload::FlightDetail),
            (ResourceKind::Crews, None) => self.fetch_crews().await.map(Payload::Crews),
            (ResourceKind::AssignmentsBundle, None) => {
                self.fetch_assignments().await.map(Payload::Assignments)
            }
            (ResourceKind::Statistics, None) => {
                self.fetch_statistics().await.map(Payload::Statistics)
            }
            (resource, Some(_)) => Err(FetchError::Unsupported { resource }),
        }
    }
}
