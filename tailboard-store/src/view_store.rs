//! Owned home of the [`ViewModel`].
//!
//! One writer, many readers: the store splits into an [`Aggregator`], which sync loops use
//! to fold results in, and cloneable [`ViewModelReader`]s for presentation.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tailboard_core::{CycleReport, DashboardSignals, ResourceUpdate, ViewModel};
use tokio::sync::watch;
use tracing::{debug, info};

pub struct ViewModelStore {
    tx: watch::Sender<ViewModel>,
    rx: watch::Receiver<ViewModel>,
}

impl Default for ViewModelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModelStore {
    pub fn new() -> Self {
        Self::with_initial(ViewModel::new())
    }

    pub fn with_initial(view: ViewModel) -> Self {
        let (tx, rx) = watch::channel(view);
        Self { tx, rx }
    }

    pub fn split(self) -> (Aggregator, ViewModelReader) {
        (
            Aggregator {
                tx: Arc::new(self.tx),
            },
            ViewModelReader { rx: self.rx },
        )
    }
}

/// Write side. Clones share the same view.
#[derive(Clone)]
pub struct Aggregator {
    tx: Arc<watch::Sender<ViewModel>>,
}

impl Aggregator {
    /// Marks the view as loading until the returned cycle is finished or dropped.
    pub fn begin_cycle(&self) -> Cycle {
        self.tx.send_modify(ViewModel::begin_cycle);
        Cycle {
            tx: Arc::clone(&self.tx),
            report: CycleReport::default(),
            done: false,
        }
    }

    pub fn reader(&self) -> ViewModelReader {
        ViewModelReader {
            rx: self.tx.subscribe(),
        }
    }
}

/// One refresh cycle in progress.
///
/// Dropping it unfinished (for instance when its task is aborted) counts it as cancelled.
pub struct Cycle {
    tx: Arc<watch::Sender<ViewModel>>,
    report: CycleReport,
    done: bool,
}

impl Cycle {
    pub fn apply(&mut self, update: ResourceUpdate, at: DateTime<Utc>) {
        let report = &mut self.report;
        self.tx.send_modify(|view| view.apply(update, at, report));
    }

    pub fn report(&self) -> &CycleReport {
        &self.report
    }

    pub fn finish(mut self) -> CycleReport {
        self.done = true;
        self.tx.send_modify(ViewModel::finish_cycle);
        info!(
            "Refresh cycle finished: {} ok, {} failed",
            self.report.succeeded.len(),
            self.report.failed.len()
        );
        std::mem::take(&mut self.report)
    }

    pub fn cancel(mut self) -> CycleReport {
        self.done = true;
        self.tx.send_modify(ViewModel::cancel_cycle);
        debug!("Refresh cycle cancelled");
        std::mem::take(&mut self.report)
    }
}

impl Drop for Cycle {
    fn drop(&mut self) {
        if !self.done {
            self.tx.send_modify(ViewModel::cancel_cycle);
        }
    }
}

/// Read side. Snapshots are clones of the current view.
#[derive(Clone)]
pub struct ViewModelReader {
    rx: watch::Receiver<ViewModel>,
}

impl ViewModelReader {
    pub fn snapshot(&self) -> ViewModel {
        self.rx.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&ViewModel) -> R) -> R {
        f(&self.rx.borrow())
    }

    pub fn signals(&self, now: DateTime<Utc>, stale_after: Duration) -> DashboardSignals {
        self.rx.borrow().signals(now, stale_after)
    }

    /// Waits for the next write. Errors once every aggregator is gone.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }

    pub fn into_receiver(self) -> watch::Receiver<ViewModel> {
        self.rx
    }
}
