//! Admission enquiry submitter.
//!
//! [`EnquirySubmitter`] owns the in-progress [`EnquiryRecord`] and its
//! [`SubmissionStatus`]. It is the only writer of both. Front-ends edit the
//! record through [`update_field`](EnquirySubmitter::update_field), start a
//! submission with [`submit`](EnquirySubmitter::submit), and either poll
//! [`status`](EnquirySubmitter::status) or follow every transition through
//! [`subscribe`](EnquirySubmitter::subscribe).
//!
//! The network call runs on a spawned task guarded by a
//! [`CancellationToken`]. Cancelling, or dropping the submitter, tears the
//! task down so a stale completion is never applied.

use std::sync::Arc;

use admissions_core::enquiry::{EnquiryField, EnquiryRecord};
use admissions_core::error::CoreError;
use admissions_core::messages::GENERIC_FAILURE;
use admissions_core::status::SubmissionStatus;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::transport::{DeliveryError, EnquiryTransport};

/// Outcome of a spawned delivery; `None` when it was cancelled.
type DeliveryOutcome = Option<Result<(), DeliveryError>>;

/// Bookkeeping for the submission currently on the wire.
struct InFlight {
    attempt: u32,
    /// Status to restore if this submission is cancelled.
    previous: SubmissionStatus,
    cancel: CancellationToken,
    handle: JoinHandle<DeliveryOutcome>,
}

/// Collects one enquiry and delivers it through `T`.
pub struct EnquirySubmitter<T> {
    transport: Arc<T>,
    record: EnquiryRecord,
    status: SubmissionStatus,
    status_tx: watch::Sender<SubmissionStatus>,
    in_flight: Option<InFlight>,
    attempts: u32,
}

impl<T> EnquirySubmitter<T>
where
    T: EnquiryTransport + 'static,
{
    /// Create a submitter with an empty record in the `Idle` state.
    pub fn new(transport: Arc<T>) -> Self {
        let (status_tx, _) = watch::channel(SubmissionStatus::Idle);
        Self {
            transport,
            record: EnquiryRecord::default(),
            status: SubmissionStatus::Idle,
            status_tx,
            in_flight: None,
            attempts: 0,
        }
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn record(&self) -> &EnquiryRecord {
        &self.record
    }

    /// Number of submissions started so far, retries included.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Receiver that observes every status transition.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionStatus> {
        self.status_tx.subscribe()
    }

    /// Set one field of the record. The status is never touched.
    ///
    /// Refused once the enquiry has been accepted.
    pub fn update_field(
        &mut self,
        field: EnquiryField,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::Conflict(
                "Enquiry has already been submitted".to_string(),
            ));
        }
        self.record.set(field, value);
        tracing::trace!(field = field.wire_name(), "Enquiry field updated");
        Ok(())
    }

    /// Set one field addressed by its wire name (e.g. `parentName`).
    pub fn update_field_by_name(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), CoreError> {
        let field = EnquiryField::from_wire_name(name)?;
        self.update_field(field, value)
    }

    /// Start delivering the current record.
    ///
    /// The status is `Submitting` by the time this returns; the outcome is
    /// applied by [`settle`](Self::settle). Required-field checks are the
    /// caller's job. A submit issued while another is in flight supersedes
    /// it: the older request runs to completion but its outcome is dropped.
    ///
    /// Fails with [`CoreError::Internal`] outside a tokio runtime.
    pub fn submit(&mut self) -> Result<(), CoreError> {
        if self.status.is_terminal() {
            return Err(CoreError::Conflict(
                "Enquiry has already been submitted".to_string(),
            ));
        }

        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| CoreError::Internal(format!("no async runtime to submit on: {e}")))?;

        let previous = match self.in_flight.take() {
            Some(stale) => {
                tracing::warn!(
                    attempt = stale.attempt,
                    "Submission superseded while in flight; its outcome will be ignored",
                );
                stale.previous
            }
            None => self.status.clone(),
        };

        self.attempts += 1;
        let attempt = self.attempts;
        self.set_status(SubmissionStatus::Submitting);

        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let transport = Arc::clone(&self.transport);
        let record = self.record.clone();

        let handle = runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => None,
                result = transport.deliver(&record) => Some(result),
            }
        });

        tracing::info!(attempt, "Enquiry submission started");

        self.in_flight = Some(InFlight {
            attempt,
            previous,
            cancel,
            handle,
        });
        Ok(())
    }

    /// Retry a failed submission with the record as it stands.
    pub fn retry(&mut self) -> Result<(), CoreError> {
        if self.status.error_message().is_none() {
            return Err(CoreError::Conflict(format!(
                "Nothing to retry while {}",
                self.status.label()
            )));
        }
        self.submit()
    }

    /// Wait for the in-flight submission, if any, and apply its outcome.
    pub async fn settle(&mut self) -> &SubmissionStatus {
        let Some(in_flight) = self.in_flight.as_mut() else {
            return &self.status;
        };

        let attempt = in_flight.attempt;
        let previous = in_flight.previous.clone();
        let joined = (&mut in_flight.handle).await;
        self.in_flight = None;

        let next = match joined {
            Ok(Some(Ok(()))) => {
                tracing::info!(attempt, "Enquiry accepted");
                SubmissionStatus::Success
            }
            Ok(Some(Err(e))) => {
                tracing::error!(attempt, error = %e, "Enquiry submission failed");
                SubmissionStatus::Error(e.user_message())
            }
            Ok(None) => {
                tracing::debug!(attempt, "Cancelled submission settled");
                previous
            }
            Err(e) => {
                let err = CoreError::Internal(format!("submission task failed: {e}"));
                tracing::error!(attempt, error = %err, "Enquiry submission task aborted");
                SubmissionStatus::Error(GENERIC_FAILURE.to_string())
            }
        };

        self.set_status(next);
        &self.status
    }

    /// Submit and wait for the outcome.
    pub async fn submit_and_settle(&mut self) -> Result<&SubmissionStatus, CoreError> {
        self.submit()?;
        Ok(self.settle().await)
    }

    /// Abandon the in-flight submission and restore the prior status.
    ///
    /// Returns `false` when nothing was in flight, or when the delivery has
    /// already finished; its outcome is then left for
    /// [`settle`](Self::settle), since the endpoint may have accepted it.
    pub fn cancel(&mut self) -> bool {
        if let Some(in_flight) = self.in_flight.as_ref().filter(|f| f.handle.is_finished()) {
            tracing::debug!(
                attempt = in_flight.attempt,
                "Delivery already finished; not cancelling",
            );
            return false;
        }
        let Some(in_flight) = self.in_flight.take() else {
            return false;
        };
        in_flight.cancel.cancel();
        tracing::info!(attempt = in_flight.attempt, "Enquiry submission cancelled");
        self.set_status(in_flight.previous);
        true
    }

    fn set_status(&mut self, next: SubmissionStatus) {
        tracing::debug!(from = self.status.label(), to = next.label(), "Submission status changed");
        self.status = next.clone();
        self.status_tx.send_replace(next);
    }
}

impl<T> Drop for EnquirySubmitter<T> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.cancel.cancel();
        }
    }
}
