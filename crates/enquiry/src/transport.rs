//! Delivery seam between the submitter and the intake endpoint.
//!
//! The submitter only needs "deliver this record, tell me if it was
//! accepted". [`IntakeApi`] is the production implementation; tests plug in
//! scripted transports.

use admissions_core::enquiry::EnquiryRecord;
use admissions_core::messages::{non_empty_or_generic, SCRIPT_FAILURE};
use admissions_intake::{IntakeApi, IntakeError};

/// Why a delivery failed. Both kinds are retryable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The request did not complete or returned a non-success status.
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The endpoint was reached but reported a logical failure.
    #[error("Rejected by intake: {}", .0.as_deref().unwrap_or("<no message>"))]
    Application(Option<String>),
}

impl DeliveryError {
    /// Message shown to the visitor. Never empty.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(message) => non_empty_or_generic(message),
            Self::Application(message) => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .map(non_empty_or_generic)
                .unwrap_or_else(|| SCRIPT_FAILURE.to_string()),
        }
    }
}

impl From<IntakeError> for DeliveryError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Rejected { message } => Self::Application(message),
            other => Self::Transport(other.user_message()),
        }
    }
}

/// Sends one enquiry to wherever enquiries are collected.
pub trait EnquiryTransport: Send + Sync {
    /// Deliver `record`. Exactly one outbound request per call.
    fn deliver(
        &self,
        record: &EnquiryRecord,
    ) -> impl std::future::Future<Output = Result<(), DeliveryError>> + Send;
}

impl EnquiryTransport for IntakeApi {
    async fn deliver(&self, record: &EnquiryRecord) -> Result<(), DeliveryError> {
        self.submit_enquiry(record).await.map_err(DeliveryError::from)
    }
}
