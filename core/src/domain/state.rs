//! Scan lifecycle state.

use serde::{Deserialize, Serialize};

/// Lifecycle of a single scan.
///
/// `Idle -> Running -> Completed`, or `Running -> Failed` when the local
/// subnet cannot be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ScanState {
    /// No scan has run yet.
    #[default]
    Idle,
    /// A scan is in flight.
    Running,
    /// The last scan finished and found `hosts` live hosts.
    Completed { hosts: usize },
    /// The last scan aborted before probing.
    Failed { reason: String },
}

impl ScanState {
    pub fn is_running(&self) -> bool {
        matches!(self, ScanState::Running)
    }

    /// Whether the state is terminal for the last scan.
    pub fn is_finished(&self) -> bool {
        matches!(self, ScanState::Completed { .. } | ScanState::Failed { .. })
    }
}

impl std::fmt::Display for ScanState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanState::Idle => write!(f, "idle"),
            ScanState::Running => write!(f, "running"),
            ScanState::Completed { hosts } => write!(f, "completed ({} hosts)", hosts),
            ScanState::Failed { reason } => write!(f, "failed: {}", reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(ScanState::default(), ScanState::Idle);
        assert!(!ScanState::Idle.is_finished());
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_string(&ScanState::Completed { hosts: 3 }).unwrap();
        assert_eq!(json, r#"{"state":"completed","hosts":3}"#);
    }
}
