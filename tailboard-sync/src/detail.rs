//! Single-entity views (one aircraft, one flight) polled on their own schedule.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tailboard_core::{FetchError, FetchResult, Payload, ResourceFetcher, ResourceKind};
use tailboard_shared::{Aircraft, Flight};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::scheduler::{PeriodicTask, StopSignal, REFRESH_INTERVAL};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum DetailKey {
    Aircraft(String),
    Flight(String),
}

impl DetailKey {
    pub fn resource(&self) -> ResourceKind {
        match self {
            DetailKey::Aircraft(_) => ResourceKind::Aircraft,
            DetailKey::Flight(_) => ResourceKind::Flights,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            DetailKey::Aircraft(key) | DetailKey::Flight(key) => key,
        }
    }
}

impl fmt::Display for DetailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailKey::Aircraft(tail) => write!(f, "aircraft {}", tail),
            DetailKey::Flight(id) => write!(f, "flight {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetailEntity {
    Aircraft(Aircraft),
    Flight(Flight),
}

/// What a detail screen renders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailState<'a> {
    Loading,
    /// Latest good data, possibly with a newer failure on top.
    Loaded {
        entity: &'a DetailEntity,
        error: Option<&'a str>,
    },
    /// Nothing ever loaded; only the error is shown.
    Failed(&'a str),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub key: DetailKey,
    pub entity: Option<DetailEntity>,
    pub error: Option<String>,
    pub loading: bool,
    pub last_synced: Option<DateTime<Utc>>,
}

impl DetailView {
    pub fn new(key: DetailKey) -> Self {
        Self {
            key,
            entity: None,
            error: None,
            loading: true,
            last_synced: None,
        }
    }

    pub fn state(&self) -> DetailState<'_> {
        match (&self.entity, &self.error) {
            (Some(entity), error) => DetailState::Loaded {
                entity,
                error: error.as_deref(),
            },
            (None, Some(error)) => DetailState::Failed(error),
            (None, None) => DetailState::Loading,
        }
    }

    /// A failure never discards an entity that already loaded.
    pub fn apply(&mut self, result: FetchResult<DetailEntity>, at: DateTime<Utc>) {
        self.loading = false;
        match result {
            Ok(entity) => {
                self.entity = Some(entity);
                self.error = None;
                self.last_synced = Some(at);
            }
            Err(e) => {
                warn!("Failed to refresh {}: {}", self.key, e);
                self.error = Some(e.user_message());
            }
        }
    }
}

pub struct DetailPoller {
    fetcher: Arc<dyn ResourceFetcher>,
    key: DetailKey,
    tx: watch::Sender<DetailView>,
}

impl DetailPoller {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, key: DetailKey) -> (Self, watch::Receiver<DetailView>) {
        let (tx, rx) = watch::channel(DetailView::new(key.clone()));
        (Self { fetcher, key, tx }, rx)
    }

    pub fn key(&self) -> &DetailKey {
        &self.key
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailView> {
        self.tx.subscribe()
    }

    async fn fetch(&self) -> FetchResult<DetailEntity> {
        let resource = self.key.resource();
        match self.fetcher.fetch(resource, Some(self.key.key())).await? {
            Payload::AircraftDetail(aircraft) => Ok(DetailEntity::Aircraft(aircraft)),
            Payload::FlightDetail(flight) => Ok(DetailEntity::Flight(flight)),
            other => Err(FetchError::Decode {
                resource,
                message: format!("unexpected {} payload for a detail fetch", other.kind()),
            }),
        }
    }

    pub async fn refresh(&self, stop: &StopSignal) {
        let result = self.fetch().await;
        let published = stop.publish(|| self.tx.send_modify(|view| view.apply(result, Utc::now())));
        if published.is_none() {
            debug!("Discarding {} result that arrived after stop", self.key);
        }
    }

    pub fn start(self: &Arc<Self>) -> PeriodicTask {
        self.start_with_period(REFRESH_INTERVAL)
    }

    pub fn start_with_period(self: &Arc<Self>, period: Duration) -> PeriodicTask {
        let poller = Arc::clone(self);
        PeriodicTask::spawn("detail", period, move |stop| {
            let poller = Arc::clone(&poller);
            async move {
                poller.refresh(&stop).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, hour, 0, 0).unwrap()
    }

    fn aircraft() -> DetailEntity {
        DetailEntity::Aircraft(Aircraft {
            tail_number: "VT-ABC".to_string(),
            subtype: "A320".to_string(),
            capacity: 180,
            fuel_efficiency: 2.5,
            current_location: "Delhi".to_string(),
            available_from: at(5),
            needs_maintenance: false,
            hours_flown: 4.0,
            total_flights: 2,
            trips: Vec::new(),
        })
    }

    fn not_found() -> FetchError {
        FetchError::NotFound {
            resource: ResourceKind::Aircraft,
            key: "VT-ABC".to_string(),
            message: None,
        }
    }

    #[test]
    fn test_error_without_data() {
        let mut view = DetailView::new(DetailKey::Aircraft("VT-ABC".to_string()));
        assert_eq!(view.state(), DetailState::Loading);

        view.apply(Err(not_found()), at(8));
        assert_eq!(view.state(), DetailState::Failed("Aircraft not found"));
        assert!(!view.loading);
    }

    #[test]
    fn test_stale_entity_survives_failure() {
        let mut view = DetailView::new(DetailKey::Aircraft("VT-ABC".to_string()));
        view.apply(Ok(aircraft()), at(8));
        view.apply(
            Err(FetchError::Transport {
                resource: ResourceKind::Aircraft,
                message: "connection reset".to_string(),
            }),
            at(9),
        );

        let entity = aircraft();
        assert_eq!(
            view.state(),
            DetailState::Loaded {
                entity: &entity,
                error: Some("Failed to fetch aircraft"),
            }
        );
        assert_eq!(view.last_synced, Some(at(8)));

        view.apply(Ok(aircraft()), at(10));
        assert!(view.error.is_none());
    }

    #[test]
    fn test_key_routing() {
        let key = DetailKey::Flight("AI101".to_string());
        assert_eq!(key.resource(), ResourceKind::Flights);
        assert_eq!(key.key(), "AI101");
        assert_eq!(key.to_string(), "flight AI101");
    }
}
