pub mod commands;
pub mod dashboard;
pub mod detail;
pub mod scheduler;

pub use commands::Commands;
pub use dashboard::DashboardSync;
pub use detail::{DetailEntity, DetailKey, DetailPoller, DetailState, DetailView};
pub use scheduler::{PeriodicTask, StopSignal, REFRESH_INTERVAL};
