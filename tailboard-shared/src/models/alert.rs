use serde::{Deserialize, Deserializer, Serialize};

/// Category of an alert raised by the assignment run. Unknown categories are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AlertKind {
    Maintenance,
    Crew,
    Other(String),
}

impl AlertKind {
    pub fn as_str(&self) -> &str {
        match self {
            AlertKind::Maintenance => "maintenance",
            AlertKind::Crew => "crew",
            AlertKind::Other(raw) => raw,
        }
    }
}

impl From<String> for AlertKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "maintenance" => AlertKind::Maintenance,
            "crew" => AlertKind::Crew,
            _ => AlertKind::Other(raw),
        }
    }
}

impl From<&str> for AlertKind {
    fn from(raw: &str) -> Self {
        AlertKind::from(raw.to_string())
    }
}

impl From<AlertKind> for String {
    fn from(kind: AlertKind) -> Self {
        match kind {
            AlertKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// An operational alert. Alerts carry no identity; each refresh replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn new(kind: impl Into<AlertKind>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

// The backend emits a bare string when there is nothing to optimise.
#[derive(Deserialize)]
#[serde(untagged)]
enum AlertRepr {
    Structured {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        message: String,
    },
    Bare(String),
}

impl<'de> Deserialize<'de> for Alert {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match AlertRepr::deserialize(deserializer)? {
            AlertRepr::Structured { kind, message } => Alert {
                kind: AlertKind::from(kind.unwrap_or_default()),
                message,
            },
            AlertRepr::Bare(message) => Alert {
                kind: AlertKind::Other(String::new()),
                message,
            },
        })
    }
}
