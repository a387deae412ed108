use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tailboard_core::ResourceFetcher;
use tailboard_store::{app_config::Config, HttpResourceFetcher, ViewModelStore};
use tailboard_sync::{DashboardSync, DetailKey, DetailPoller, DetailState, PeriodicTask, REFRESH_INTERVAL};
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter_or_default().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Syncing dashboard from {}", config.api.base_url);

    let fetcher: Arc<dyn ResourceFetcher> = Arc::new(
        HttpResourceFetcher::from_config(&config.api).context("Failed to build HTTP client")?,
    );

    let (aggregator, reader) = ViewModelStore::new().split();
    let sync = Arc::new(DashboardSync::new(Arc::clone(&fetcher), aggregator));
    let dashboard = sync.start();

    let stale_after = config
        .dashboard
        .stale_after_or(REFRESH_INTERVAL * 2)
        .context("Invalid dashboard config")?;

    let detail_keys = config
        .detail
        .aircraft
        .clone()
        .map(DetailKey::Aircraft)
        .into_iter()
        .chain(config.detail.flight.clone().map(DetailKey::Flight));

    let mut detail_tasks: Vec<PeriodicTask> = Vec::new();
    for key in detail_keys {
        let (poller, rx) = DetailPoller::new(Arc::clone(&fetcher), key);
        let poller = Arc::new(poller);
        detail_tasks.push(poller.start());
        tokio::spawn(async move {
            let mut views = WatchStream::from_changes(rx);
            while let Some(view) = views.next().await {
                match view.state() {
                    DetailState::Loading => {}
                    DetailState::Loaded { error: None, .. } => info!("{} refreshed", view.key),
                    DetailState::Loaded { error: Some(e), .. } => {
                        warn!("{} showing stale data: {}", view.key, e)
                    }
                    DetailState::Failed(e) => warn!("{}: {}", view.key, e),
                }
            }
        });
    }

    let mut views = WatchStream::from_changes(reader.into_receiver());
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = &mut shutdown => {
                result.context("Failed to listen for shutdown signal")?;
                info!("Shutting down");
                break;
            }
            Some(view) = views.next() => {
                if view.loading {
                    continue;
                }
                let signals = view.signals(Utc::now(), stale_after);
                info!(
                    "alerts={} attention={} assigned={} unassigned={} flights={} maintenance_due={:?} stale={:?}",
                    signals.alert_badge.count,
                    signals.attention_count,
                    signals.assigned_count,
                    signals.unassigned_count,
                    signals.total_flights,
                    signals.maintenance_due,
                    signals.stale,
                );
            }
        }
    }

    dashboard.shutdown().await?;
    for task in detail_tasks {
        task.shutdown().await?;
    }
    Ok(())
}
