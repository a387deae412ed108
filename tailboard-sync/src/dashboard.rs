use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::BoxFuture;
use futures_util::stream::{FuturesUnordered, StreamExt};
use futures_util::FutureExt;
use tailboard_core::{CycleReport, ResourceFetcher, ResourceUpdate};
use tailboard_store::{Aggregator, ViewModelReader};
use tracing::debug;

use crate::scheduler::{PeriodicTask, StopSignal, REFRESH_INTERVAL};

/// Keeps the shared dashboard view in step with the backend.
pub struct DashboardSync {
    fetcher: Arc<dyn ResourceFetcher>,
    aggregator: Aggregator,
}

impl DashboardSync {
    pub fn new(fetcher: Arc<dyn ResourceFetcher>, aggregator: Aggregator) -> Self {
        Self {
            fetcher,
            aggregator,
        }
    }

    pub fn reader(&self) -> ViewModelReader {
        self.aggregator.reader()
    }

    /// One full refresh: the four dashboard resources are requested together and each
    /// result is applied as soon as it arrives.
    ///
    /// Once `stop` is raised nothing more is applied and no cycle begins; the returned
    /// report then covers only what made it in.
    pub async fn run_cycle(&self, stop: &StopSignal) -> CycleReport {
        let Some(mut cycle) = stop.publish(|| self.aggregator.begin_cycle()) else {
            debug!("Polling stopped; skipping refresh");
            return CycleReport::default();
        };

        let fetcher = &self.fetcher;
        let mut pending: FuturesUnordered<BoxFuture<'_, ResourceUpdate>> = FuturesUnordered::new();
        pending.push(
            async move { ResourceUpdate::Assignments(fetcher.fetch_assignments().await) }.boxed(),
        );
        pending.push(async move { ResourceUpdate::Aircraft(fetcher.fetch_aircraft().await) }.boxed());
        pending.push(async move { ResourceUpdate::Flights(fetcher.fetch_flights().await) }.boxed());
        pending.push(async move { ResourceUpdate::Crews(fetcher.fetch_crews().await) }.boxed());

        while let Some(update) = pending.next().await {
            let kind = update.kind();
            if stop.publish(|| cycle.apply(update, Utc::now())).is_none() {
                debug!("Discarding {} result that arrived after stop", kind);
                return cycle.cancel();
            }
        }
        cycle.finish()
    }

    /// Out-of-band cycle, e.g. right after a successful create.
    pub async fn refresh_now(&self) -> CycleReport {
        self.run_cycle(&StopSignal::new()).await
    }

    pub fn start(self: &Arc<Self>) -> PeriodicTask {
        self.start_with_period(REFRESH_INTERVAL)
    }

    pub fn start_with_period(self: &Arc<Self>, period: Duration) -> PeriodicTask {
        let sync = Arc::clone(self);
        PeriodicTask::spawn("dashboard", period, move |stop| {
            let sync = Arc::clone(&sync);
            async move {
                sync.run_cycle(&stop).await;
            }
        })
    }
}
