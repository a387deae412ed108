use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_FILTER: &str = "tailboard_sync=debug,tailboard_store=info,tailboard_core=info";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub detail: DetailConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    pub stale_after_secs: Option<u64>,
}

impl DashboardConfig {
    /// `stale_after_secs`, or `fallback` when unset.
    pub fn stale_after_or(&self, fallback: Duration) -> Result<chrono::Duration, config::ConfigError> {
        let secs = self.stale_after_secs.unwrap_or(fallback.as_secs());
        i64::try_from(secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| {
                config::ConfigError::Message(format!(
                    "dashboard.stale_after_secs out of range: {}",
                    secs
                ))
            })
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LoggingConfig {
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn filter_or_default(&self) -> &str {
        self.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}

/// Entities to keep a detail view open on.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DetailConfig {
    pub aircraft: Option<String>,
    pub flight: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Self::defaults()?
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `TAILBOARD__API__BASE_URL=http://ops:5000`
            .add_source(config::Environment::with_prefix("TAILBOARD").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Built-in values every other source overrides.
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
        config::Config::builder().set_default("api.base_url", DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    #[test]
    fn test_defaults_only() {
        let cfg: Config = Config::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert!(cfg.api.request_timeout().is_none());
        assert!(cfg.dashboard.stale_after_secs.is_none());
        assert_eq!(cfg.logging.filter_or_default(), DEFAULT_LOG_FILTER);
        assert!(cfg.detail.aircraft.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            [api]
            base_url = "http://ops.internal:5000"
            request_timeout_secs = 10

            [dashboard]
            stale_after_secs = 120

            [detail]
            flight = "AI101"
        "#;
        let cfg: Config = Config::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.api.base_url, "http://ops.internal:5000");
        assert_eq!(cfg.api.request_timeout(), Some(Duration::from_secs(10)));
        assert_eq!(cfg.dashboard.stale_after_secs, Some(120));
        assert_eq!(cfg.detail.flight.as_deref(), Some("AI101"));
        assert_eq!(
            cfg.dashboard.stale_after_or(Duration::from_secs(60)).unwrap(),
            chrono::Duration::seconds(120)
        );
    }

    #[test]
    fn test_stale_after_fallback_and_range() {
        let unset = DashboardConfig::default();
        assert_eq!(
            unset.stale_after_or(Duration::from_secs(60)).unwrap(),
            chrono::Duration::seconds(60)
        );

        let huge = DashboardConfig {
            stale_after_secs: Some(u64::MAX),
        };
        assert!(huge.stale_after_or(Duration::from_secs(60)).is_err());

        let past_timedelta = DashboardConfig {
            stale_after_secs: Some(i64::MAX as u64),
        };
        assert!(past_timedelta.stale_after_or(Duration::from_secs(60)).is_err());
    }
}
