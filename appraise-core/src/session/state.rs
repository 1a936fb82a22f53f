//! Assessment session phases

use serde::{Deserialize, Serialize};

/// Lifecycle of an assessment session.
///
/// An engine only exists once loading succeeded, so the phase starts at
/// `InProgress` and a load failure surfaces as the loader's error
/// instead. `Failed` is reachable from `Submitting` only; a transient
/// auto-save failure while `InProgress` never changes phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// The user is answering questions
    InProgress,
    /// Finalize is running; the submit control stays disabled
    Submitting,
    /// The response has been completed server-side
    Completed,
    /// Load or finalize failed; local progress is retained
    Failed { message: String },
}

impl SessionPhase {
    /// Short name for state-mismatch errors
    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::InProgress => "InProgress",
            SessionPhase::Submitting => "Submitting",
            SessionPhase::Completed => "Completed",
            SessionPhase::Failed { .. } => "Failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_names_match_variants() {
        assert_eq!(SessionPhase::InProgress.name(), "InProgress");
        assert_eq!(SessionPhase::Submitting.name(), "Submitting");
        assert_eq!(SessionPhase::Completed.name(), "Completed");
        assert_eq!(
            SessionPhase::Failed {
                message: "x".to_string()
            }
            .name(),
            "Failed"
        );
    }

    #[test]
    fn phase_serialization_roundtrip() {
        let phases = vec![
            SessionPhase::InProgress,
            SessionPhase::Submitting,
            SessionPhase::Completed,
            SessionPhase::Failed {
                message: "network error".to_string(),
            },
        ];

        for phase in phases {
            let json = serde_json::to_string(&phase).unwrap();
            let parsed: SessionPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(phase, parsed);
        }
    }
}
