pub mod alerts;
pub mod fetcher;
pub mod resource;
pub mod validation;
pub mod view_model;

pub use alerts::{derive_alert_badge, AlertBadge};
pub use fetcher::{Payload, ResourceFetcher};
pub use resource::{CreateKind, ResourceKind};
pub use validation::{Validate, ValidationErrors};
pub use view_model::{CycleReport, DashboardSignals, ResourceUpdate, ViewModel};

/// Why a single fetch against one resource failed.
///
/// Every variant names the resource so the aggregator can attribute the failure without
/// further context.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("{resource} request failed: {message}")]
    Transport {
        resource: ResourceKind,
        message: String,
    },
    #[error("{resource} request returned HTTP {status}")]
    Http {
        resource: ResourceKind,
        status: u16,
        message: Option<String>,
    },
    #[error("{resource} payload could not be decoded: {message}")]
    Decode {
        resource: ResourceKind,
        message: String,
    },
    #[error("{resource} '{key}' not found")]
    NotFound {
        resource: ResourceKind,
        key: String,
        message: Option<String>,
    },
    #[error("{resource} has no detail endpoint")]
    Unsupported { resource: ResourceKind },
}

impl FetchError {
    pub fn resource(&self) -> ResourceKind {
        match self {
            FetchError::Transport { resource, .. }
            | FetchError::Http { resource, .. }
            | FetchError::Decode { resource, .. }
            | FetchError::NotFound { resource, .. }
            | FetchError::Unsupported { resource } => *resource,
        }
    }

    /// Message suitable for showing to an operator: the server's `error` string when it
    /// sent one, otherwise the default for the resource.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Http {
                message: Some(msg), ..
            }
            | FetchError::NotFound {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            FetchError::NotFound { resource, .. } => resource.not_found_message().to_string(),
            other => other.resource().fetch_failed_message().to_string(),
        }
    }
}

pub type FetchResult<T> = Result<T, FetchError>;

/// Why a create operation did not go through.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CreateError {
    /// Rejected client-side; nothing was sent.
    #[error("Validation failed: {0}")]
    Invalid(ValidationErrors),
    #[error("{message}")]
    Rejected {
        kind: CreateKind,
        status: u16,
        message: String,
    },
    #[error("{kind} request failed: {message}")]
    Transport { kind: CreateKind, message: String },
    #[error("{kind} response could not be decoded: {message}")]
    Decode { kind: CreateKind, message: String },
}

impl CreateError {
    /// Field-level errors when the failure happened before any request.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            CreateError::Invalid(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            CreateError::Invalid(errors) => errors.to_string(),
            CreateError::Rejected { message, .. } => message.clone(),
            CreateError::Transport { kind, .. } | CreateError::Decode { kind, .. } => {
                kind.failed_message().to_string()
            }
        }
    }
}

pub type CreateResult<T> = Result<T, CreateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = FetchError::Http {
            resource: ResourceKind::AssignmentsBundle,
            status: 500,
            message: Some("Solver crashed".to_string()),
        };
        assert_eq!(err.user_message(), "Solver crashed");
    }

    #[test]
    fn test_user_message_defaults_per_resource() {
        let err = FetchError::Transport {
            resource: ResourceKind::Crews,
            message: "connection refused".to_string(),
        };
        assert_eq!(err.user_message(), "Failed to fetch crews");

        let missing = FetchError::NotFound {
            resource: ResourceKind::Aircraft,
            key: "VT-NOPE".to_string(),
            message: None,
        };
        assert_eq!(missing.user_message(), "Aircraft not found");
        assert_eq!(missing.resource(), ResourceKind::Aircraft);
    }

    #[test]
    fn test_blank_server_message_falls_back() {
        let err = FetchError::Http {
            resource: ResourceKind::Flights,
            status: 502,
            message: Some("  ".to_string()),
        };
        assert_eq!(err.user_message(), "Failed to fetch flights");
    }
}
