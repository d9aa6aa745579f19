//! Submission status of an admission enquiry.

use serde::{Deserialize, Serialize};

/// Where an enquiry is in its submission lifecycle.
///
/// `Idle -> Submitting -> {Success | Error}`, and `Error -> Submitting` on
/// retry. `Success` has no outgoing transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    /// Failed submission; the message is never empty.
    Error(String),
}

impl SubmissionStatus {
    /// Short lowercase name, used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Success => "success",
            Self::Error(_) => "error",
        }
    }

    /// `true` once the enquiry has been accepted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// `true` while a request is outstanding; the submit control should be
    /// disabled.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Message of a failed submission.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_idle() {
        assert_eq!(SubmissionStatus::default(), SubmissionStatus::Idle);
    }

    #[test]
    fn only_success_is_terminal() {
        assert!(SubmissionStatus::Success.is_terminal());
        assert!(!SubmissionStatus::Error("x".into()).is_terminal());
        assert!(!SubmissionStatus::Submitting.is_terminal());
    }

    #[test]
    fn error_message_only_for_error() {
        assert_eq!(
            SubmissionStatus::Error("Network error: Not Found".into()).error_message(),
            Some("Network error: Not Found")
        );
        assert_eq!(SubmissionStatus::Idle.error_message(), None);
    }

    #[test]
    fn serializes_as_tagged_state() {
        let json = serde_json::to_value(SubmissionStatus::Error("boom".into())).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["message"], "boom");

        let json = serde_json::to_value(SubmissionStatus::Submitting).unwrap();
        assert_eq!(json["state"], "submitting");
    }
}
