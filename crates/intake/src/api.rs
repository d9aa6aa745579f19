//! REST client for the enquiry intake endpoint.
//!
//! Posts one [`EnquiryRecord`] per call to the configured intake script
//! using [`reqwest`], then interprets the reply according to the
//! configured [`ResponseMode`].

use admissions_core::enquiry::EnquiryRecord;
use admissions_core::messages::{non_empty_or_generic, NETWORK_ERROR_PREFIX, SCRIPT_FAILURE};
use serde::Deserialize;

use crate::config::{FieldEncoding, IntakeConfig, ResponseMode};

/// `result` value the intake script uses to acknowledge an enquiry.
pub const RESULT_SUCCESS: &str = "success";

/// HTTP client for the intake endpoint.
pub struct IntakeApi {
    client: reqwest::Client,
    config: IntakeConfig,
}

/// JSON body returned by the intake script.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeAck {
    /// `"success"` on acceptance; anything else is a logical failure.
    pub result: String,
    /// Optional explanation supplied by the script.
    #[serde(default)]
    pub message: Option<String>,
}

impl IntakeAck {
    pub fn is_success(&self) -> bool {
        self.result == RESULT_SUCCESS
    }
}

/// Broad class of an [`IntakeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeErrorKind {
    /// The request did not complete or the reply could not be read.
    Transport,
    /// The endpoint was reached and reported failure.
    Application,
}

/// Errors from the intake client.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Intake endpoint returned {status}: {reason}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
    },

    /// A 2xx reply whose body is not a valid acknowledgment.
    #[error("Unreadable acknowledgment: {0}")]
    Acknowledgment(String),

    /// The script acknowledged the request but reported failure.
    #[error("Enquiry rejected by intake script: {}", .message.as_deref().unwrap_or("<no message>"))]
    Rejected { message: Option<String> },
}

impl IntakeError {
    pub fn kind(&self) -> IntakeErrorKind {
        match self {
            Self::Rejected { .. } => IntakeErrorKind::Application,
            Self::Request(_) | Self::Status { .. } | Self::Acknowledgment(_) => {
                IntakeErrorKind::Transport
            }
        }
    }

    /// Message suitable for showing to the visitor. Never empty.
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Request(e) if e.is_connect() => {
                format!("{NETWORK_ERROR_PREFIX}: could not reach the admissions server")
            }
            Self::Request(e) if e.is_timeout() => {
                format!("{NETWORK_ERROR_PREFIX}: the request timed out")
            }
            Self::Request(e) => format!("{NETWORK_ERROR_PREFIX}: {e}"),
            Self::Status { reason, .. } => format!("{NETWORK_ERROR_PREFIX}: {reason}"),
            Self::Acknowledgment(detail) => {
                format!("{NETWORK_ERROR_PREFIX}: unreadable response ({detail})")
            }
            Self::Rejected { message } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(SCRIPT_FAILURE)
                .to_string(),
        };
        non_empty_or_generic(&message)
    }
}

impl IntakeApi {
    /// Create a client for the configured endpoint.
    pub fn new(config: IntakeConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: IntakeConfig) -> Self {
        Self { client, config }
    }

    /// Endpoint, encoding and response mode this client posts with.
    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Deliver one enquiry.
    ///
    /// Sends a single `POST` to the intake URL. Returns `Ok(())` when the
    /// endpoint accepted the enquiry.
    pub async fn submit_enquiry(&self, record: &EnquiryRecord) -> Result<(), IntakeError> {
        tracing::debug!(
            url = %self.config.url,
            encoding = self.config.encoding.as_str(),
            mode = self.config.mode.as_str(),
            "Posting enquiry to intake endpoint",
        );

        let response = self.build_request(record).send().await?;

        match self.config.mode {
            ResponseMode::Opaque => {
                tracing::debug!(
                    status = response.status().as_u16(),
                    "Opaque intake response, assuming acceptance",
                );
                Ok(())
            }
            ResponseMode::Acknowledged => Self::read_ack(response).await,
        }
    }

    // ---- private helpers ----

    fn build_request(&self, record: &EnquiryRecord) -> reqwest::RequestBuilder {
        let request = self.client.post(self.config.url.clone());
        match self.config.encoding {
            FieldEncoding::Multipart => {
                let form = record
                    .wire_pairs()
                    .into_iter()
                    .fold(reqwest::multipart::Form::new(), |form, (name, value)| {
                        form.text(name, value.to_string())
                    });
                request.multipart(form)
            }
            FieldEncoding::UrlEncoded => request.form(&record.wire_pairs()),
        }
    }

    /// Check the status, then parse and judge the JSON acknowledgment.
    async fn read_ack(response: reqwest::Response) -> Result<(), IntakeError> {
        let status = response.status();
        if !status.is_success() {
            return Err(IntakeError::Status {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        let body = response.text().await?;
        let ack: IntakeAck = serde_json::from_str(&body)
            .map_err(|e| IntakeError::Acknowledgment(e.to_string()))?;

        if ack.is_success() {
            Ok(())
        } else {
            tracing::warn!(
                result = %ack.result,
                message = ?ack.message,
                "Intake script reported failure",
            );
            Err(IntakeError::Rejected {
                message: ack.message,
            })
        }
    }
}
