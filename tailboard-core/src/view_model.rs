//! The merged dashboard view and the rules for folding fetch results into it.
//!
//! Each resource owns its fields. A successful fetch overwrites them with the payload as
//! decoded; a failed fetch leaves them exactly as they were and only records the error.
//! Results are applied in whatever order the fetches complete.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tailboard_shared::{Aircraft, Alert, Assignment, AssignmentsBundle, Crew, Flight};
use tracing::{debug, warn};

use crate::alerts::{attention_count, derive_alert_badge, AlertBadge};
use crate::resource::ResourceKind;
use crate::{FetchError, FetchResult};

/// One resource's outcome within a refresh cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceUpdate {
    Assignments(FetchResult<AssignmentsBundle>),
    Aircraft(FetchResult<Vec<Aircraft>>),
    Flights(FetchResult<Vec<Flight>>),
    Crews(FetchResult<Vec<Crew>>),
}

impl ResourceUpdate {
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceUpdate::Assignments(_) => ResourceKind::AssignmentsBundle,
            ResourceUpdate::Aircraft(_) => ResourceKind::Aircraft,
            ResourceUpdate::Flights(_) => ResourceKind::Flights,
            ResourceUpdate::Crews(_) => ResourceKind::Crews,
        }
    }

    pub fn is_success(&self) -> bool {
        match self {
            ResourceUpdate::Assignments(r) => r.is_ok(),
            ResourceUpdate::Aircraft(r) => r.is_ok(),
            ResourceUpdate::Flights(r) => r.is_ok(),
            ResourceUpdate::Crews(r) => r.is_ok(),
        }
    }
}

/// Bookkeeping per resource, used for staleness and error display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncStatus {
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_synced: Option<DateTime<Utc>>,
    /// Message of the latest failure; cleared by the next success.
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub assignments: Vec<Assignment>,
    pub alerts: Vec<Alert>,
    pub unassigned_flights: Vec<String>,
    pub aircraft: Vec<Aircraft>,
    pub flights: Vec<Flight>,
    pub crews: Vec<Crew>,
    pub loading: bool,
    pub sync: BTreeMap<ResourceKind, SyncStatus>,
    pub cycles_completed: u64,
    in_flight_cycles: usize,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    /// Empty collections, `loading = true`.
    pub fn new() -> Self {
        Self {
            assignments: Vec::new(),
            alerts: Vec::new(),
            unassigned_flights: Vec::new(),
            aircraft: Vec::new(),
            flights: Vec::new(),
            crews: Vec::new(),
            loading: true,
            sync: ResourceKind::ALL
                .iter()
                .map(|kind| (*kind, SyncStatus::default()))
                .collect(),
            cycles_completed: 0,
            in_flight_cycles: 0,
        }
    }

    pub fn in_flight_cycles(&self) -> usize {
        self.in_flight_cycles
    }

    pub fn begin_cycle(&mut self) {
        self.in_flight_cycles += 1;
        self.loading = true;
    }

    /// Marks one cycle as aggregated. `loading` clears once no cycle is in flight, however
    /// many fetches failed.
    pub fn finish_cycle(&mut self) {
        self.in_flight_cycles = self.in_flight_cycles.saturating_sub(1);
        self.cycles_completed += 1;
        self.loading = self.in_flight_cycles > 0;
    }

    /// A cycle that stopped before completing. Whatever it already applied stays.
    pub fn cancel_cycle(&mut self) {
        self.in_flight_cycles = self.in_flight_cycles.saturating_sub(1);
        self.loading = self.in_flight_cycles > 0;
    }

    /// Fold one resource result into the view and record the outcome in `report`.
    pub fn apply(&mut self, update: ResourceUpdate, at: DateTime<Utc>, report: &mut CycleReport) {
        let kind = update.kind();
        let status = self.sync.entry(kind).or_default();
        status.last_attempt = Some(at);

        let outcome = match update {
            ResourceUpdate::Assignments(Ok(bundle)) => {
                let violations =
                    find_exclusivity_violations(&bundle.assignments, &bundle.unassigned_flights);
                if !violations.is_empty() {
                    warn!(
                        "Flights both assigned and unassigned in one bundle: {:?}",
                        violations
                    );
                    report.exclusivity_violations.extend(violations);
                }
                self.assignments = bundle.assignments;
                self.alerts = bundle.alerts;
                self.unassigned_flights = bundle.unassigned_flights;
                Ok(())
            }
            ResourceUpdate::Aircraft(Ok(aircraft)) => {
                report.note_duplicates(kind, aircraft.iter().map(|a| a.tail_number.as_str()));
                self.aircraft = aircraft;
                Ok(())
            }
            ResourceUpdate::Flights(Ok(flights)) => {
                report.note_duplicates(kind, flights.iter().map(|f| f.flight_id.as_str()));
                self.flights = flights;
                Ok(())
            }
            ResourceUpdate::Crews(Ok(crews)) => {
                report.note_duplicates(kind, crews.iter().map(|c| c.crew_id.as_str()));
                self.crews = crews;
                Ok(())
            }
            ResourceUpdate::Assignments(Err(e))
            | ResourceUpdate::Aircraft(Err(e))
            | ResourceUpdate::Flights(Err(e))
            | ResourceUpdate::Crews(Err(e)) => Err(e),
        };

        let status = self.sync.entry(kind).or_default();
        match outcome {
            Ok(()) => {
                debug!("Applied {} update", kind);
                status.last_synced = Some(at);
                status.last_error = None;
                report.succeeded.push(kind);
            }
            Err(e) => {
                warn!("Keeping previous {} data: {}", kind, e);
                status.last_error = Some(e.user_message());
                report.failed.push(e);
            }
        }
    }

    /// Apply a complete cycle's results in one go.
    pub fn apply_cycle_result<I>(&mut self, results: I, at: DateTime<Utc>) -> CycleReport
    where
        I: IntoIterator<Item = ResourceUpdate>,
    {
        let mut report = CycleReport::default();
        self.begin_cycle();
        for update in results {
            self.apply(update, at, &mut report);
        }
        self.finish_cycle();
        report
    }

    /// Resources never synced, or whose last success is older than `stale_after`.
    pub fn stale_resources(&self, now: DateTime<Utc>, stale_after: Duration) -> Vec<ResourceKind> {
        ResourceKind::ALL
            .iter()
            .copied()
            .filter(|kind| match self.sync.get(kind).and_then(|s| s.last_synced) {
                Some(synced) => now - synced > stale_after,
                None => true,
            })
            .collect()
    }

    pub fn signals(&self, now: DateTime<Utc>, stale_after: Duration) -> DashboardSignals {
        DashboardSignals {
            alert_badge: derive_alert_badge(&self.alerts),
            attention_count: attention_count(&self.alerts),
            unassigned_count: self.unassigned_flights.len(),
            assigned_count: self.assignments.len(),
            total_flights: self.flights.len(),
            maintenance_due: self
                .aircraft
                .iter()
                .filter(|a| a.requires_maintenance())
                .map(|a| a.tail_number.clone())
                .collect(),
            stale: self.stale_resources(now, stale_after),
            loading: self.loading,
        }
    }
}

/// What happened to each resource during one cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub succeeded: Vec<ResourceKind>,
    pub failed: Vec<FetchError>,
    /// Flight ids present both in `assignments` and `unassigned_flights`. Reported, never
    /// repaired: both lists are stored as delivered.
    pub exclusivity_violations: Vec<String>,
    pub duplicate_keys: Vec<(ResourceKind, String)>,
}

impl CycleReport {
    pub fn failed_kinds(&self) -> Vec<ResourceKind> {
        self.failed.iter().map(FetchError::resource).collect()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
            && self.exclusivity_violations.is_empty()
            && self.duplicate_keys.is_empty()
    }

    fn note_duplicates<'a>(&mut self, kind: ResourceKind, keys: impl Iterator<Item = &'a str>) {
        let mut seen = HashSet::new();
        for key in keys {
            if !seen.insert(key) {
                warn!("Duplicate {} key in payload: {}", kind, key);
                self.duplicate_keys.push((kind, key.to_string()));
            }
        }
    }
}

/// Flight ids the producer reported as both assigned and unassigned, in unassigned order.
pub fn find_exclusivity_violations(assignments: &[Assignment], unassigned: &[String]) -> Vec<String> {
    let assigned: HashSet<&str> = assignments.iter().map(|a| a.flight_id.as_str()).collect();
    let mut reported = HashSet::new();
    unassigned
        .iter()
        .filter(|id| assigned.contains(id.as_str()) && reported.insert(id.as_str()))
        .cloned()
        .collect()
}

/// Cross-cutting figures every screen shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSignals {
    pub alert_badge: AlertBadge,
    pub attention_count: usize,
    pub unassigned_count: usize,
    pub assigned_count: usize,
    pub total_flights: usize,
    pub maintenance_due: Vec<String>,
    pub stale: Vec<ResourceKind>,
    pub loading: bool,
}
