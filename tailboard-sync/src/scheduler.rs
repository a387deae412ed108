//! Fixed-period background work with an explicit stop.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Period of both the dashboard and the detail pollers.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Shared stop flag.
///
/// Cycles publish through [`StopSignal::publish`], which holds a read lock across the
/// check and the write. [`StopSignal::stop`] takes the write lock, so once it returns no
/// publish is in progress and none will run.
#[derive(Debug, Clone, Default)]
pub struct StopSignal {
    stopped: Arc<RwLock<bool>>,
}

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for any publish already in progress.
    pub fn stop(&self) {
        *self.stopped.write().unwrap_or_else(PoisonError::into_inner) = true;
    }

    pub fn is_stopped(&self) -> bool {
        *self.stopped.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` unless stopped. `f` must not await or call [`StopSignal::stop`].
    pub fn publish<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let stopped = self.stopped.read().unwrap_or_else(PoisonError::into_inner);
        if *stopped {
            None
        } else {
            Some(f())
        }
    }
}

/// Handle to a task that starts a cycle immediately and then once per period.
///
/// Cycles run as their own tasks, so a slow cycle never delays the next tick and several
/// may be in flight. Stopping raises the [`StopSignal`] handed to every cycle and aborts
/// the ones still running. Dropping the handle stops it.
pub struct PeriodicTask {
    name: &'static str,
    signal: StopSignal,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, cycle: F) -> Self
    where
        F: Fn(StopSignal) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let signal = StopSignal::new();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let cycle_signal = signal.clone();

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut cycles = JoinSet::new();
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        if cycle_signal.is_stopped() {
                            break;
                        }
                        debug!("{} cycle starting ({} in flight)", name, cycles.len());
                        cycles.spawn(cycle(cycle_signal.clone()));
                    }
                    Some(joined) = cycles.join_next(), if !cycles.is_empty() => {
                        if let Err(e) = joined {
                            if e.is_panic() {
                                error!("{} cycle panicked: {}", name, e);
                            }
                        }
                    }
                }
            }
            if !cycles.is_empty() {
                debug!("{}: aborting {} in-flight cycles", name, cycles.len());
            }
            cycles.shutdown().await;
        });

        info!("{} polling every {:?}", name, period);
        Self {
            name,
            signal,
            stop_tx: Some(stop_tx),
            task: Some(task),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.signal.is_stopped()
    }

    /// No cycle starts and no result is published after this returns. Idempotent.
    pub fn stop(&mut self) {
        if self.signal.is_stopped() {
            return;
        }
        self.signal.stop();
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        info!("{} polling stopped", self.name);
    }

    /// Stops and waits until every cycle task is gone.
    pub async fn shutdown(mut self) -> Result<(), JoinError> {
        self.stop();
        match self.task.take() {
            Some(task) => task.await,
            None => Ok(()),
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Barrier;

    fn counting_task(period: Duration) -> (PeriodicTask, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let task = PeriodicTask::spawn("test", period, move |_| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (task, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_immediately_then_every_period() {
        let (task, count) = counting_task(REFRESH_INTERVAL);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        task.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_cycles_after_stop() {
        let (mut task, count) = counting_task(REFRESH_INTERVAL);
        tokio::time::sleep(Duration::from_secs(1)).await;

        task.stop();
        task.stop();
        assert!(!task.is_running());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        task.shutdown().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_cycles_overlap_and_are_aborted() {
        let started = Arc::new(AtomicUsize::new(0));
        let finished = Arc::new(AtomicUsize::new(0));
        let (s, f) = (Arc::clone(&started), Arc::clone(&finished));
        let task = PeriodicTask::spawn("slow", Duration::from_secs(30), move |_| {
            let (s, f) = (Arc::clone(&s), Arc::clone(&f));
            async move {
                s.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(45)).await;
                f.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_secs(40)).await;
        assert_eq!(started.load(Ordering::SeqCst), 2);
        assert_eq!(finished.load(Ordering::SeqCst), 0);

        task.shutdown().await.unwrap();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(finished.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stop_signal_is_shared() {
        let signal = StopSignal::new();
        let clone = signal.clone();
        assert!(!clone.is_stopped());
        assert_eq!(clone.publish(|| 7), Some(7));

        signal.stop();
        assert!(clone.is_stopped());
        assert_eq!(clone.publish(|| 7), None);
    }

    #[test]
    fn test_stop_waits_for_publish_in_progress() {
        let signal = StopSignal::new();
        let entered = Arc::new(Barrier::new(2));
        let published = Arc::new(AtomicBool::new(false));

        let writer = {
            let (signal, entered, published) =
                (signal.clone(), Arc::clone(&entered), Arc::clone(&published));
            std::thread::spawn(move || {
                signal.publish(|| {
                    entered.wait();
                    std::thread::sleep(Duration::from_millis(50));
                    published.store(true, Ordering::SeqCst);
                })
            })
        };

        entered.wait();
        signal.stop();
        assert!(published.load(Ordering::SeqCst));
        assert_eq!(writer.join().unwrap(), Some(()));
        assert_eq!(signal.publish(|| ()), None);
    }
}
