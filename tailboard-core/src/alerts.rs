//! Alert badge and presentation rules.

use serde::Serialize;
use tailboard_shared::{Alert, AlertKind};

/// Navigation badge for the alerts screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertBadge {
    pub count: usize,
    pub has_alerts: bool,
}

pub fn derive_alert_badge(alerts: &[Alert]) -> AlertBadge {
    AlertBadge {
        count: alerts.len(),
        has_alerts: !alerts.is_empty(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertIcon {
    Tool,
    People,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn requires_attention(&self) -> bool {
        *self >= Severity::Warning
    }
}

/// How an alert of a given type is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertPresentation {
    pub icon: AlertIcon,
    pub severity: Severity,
    pub title: &'static str,
}

pub fn classify(kind: &AlertKind) -> AlertPresentation {
    match kind {
        AlertKind::Maintenance => AlertPresentation {
            icon: AlertIcon::Tool,
            severity: Severity::Error,
            title: "Maintenance Alert",
        },
        AlertKind::Crew => AlertPresentation {
            icon: AlertIcon::People,
            severity: Severity::Warning,
            title: "Crew Availability",
        },
        AlertKind::Other(_) => AlertPresentation {
            icon: AlertIcon::Triangle,
            severity: Severity::Info,
            title: "System Alert",
        },
    }
}

/// Classify a raw `type` string, e.g. straight from a payload.
pub fn classify_type(raw: &str) -> AlertPresentation {
    classify(&AlertKind::from(raw))
}

/// Alerts whose severity is warning or worse.
pub fn attention_count(alerts: &[Alert]) -> usize {
    alerts
        .iter()
        .filter(|a| classify(&a.kind).severity.requires_attention())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_badge() {
        assert_eq!(
            derive_alert_badge(&[]),
            AlertBadge {
                count: 0,
                has_alerts: false
            }
        );
    }

    #[test]
    fn test_badge_counts_every_alert() {
        let alerts = vec![
            Alert::new("maintenance", "VT-ABC needs maintenance"),
            Alert::new("crew", "No crew available for AI101"),
        ];
        assert_eq!(
            derive_alert_badge(&alerts),
            AlertBadge {
                count: 2,
                has_alerts: true
            }
        );
    }

    #[test]
    fn test_classification_table() {
        let maintenance = classify_type("maintenance");
        assert_eq!(maintenance.icon, AlertIcon::Tool);
        assert_eq!(maintenance.severity, Severity::Error);
        assert_eq!(maintenance.title, "Maintenance Alert");

        let crew = classify_type("crew");
        assert_eq!(crew.icon, AlertIcon::People);
        assert_eq!(crew.severity, Severity::Warning);
        assert_eq!(crew.title, "Crew Availability");

        for unknown in ["", "weather", "MAINTENANCE"] {
            let other = classify_type(unknown);
            assert_eq!(other.icon, AlertIcon::Triangle);
            assert_eq!(other.severity, Severity::Info);
            assert_eq!(other.title, "System Alert");
        }
    }

    #[test]
    fn test_attention_count_skips_info() {
        let alerts = vec![
            Alert::new("maintenance", "a"),
            Alert::new("crew", "b"),
            Alert::new("other", "c"),
        ];
        assert_eq!(attention_count(&alerts), 2);
    }
}
