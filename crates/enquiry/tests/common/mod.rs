use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;

use admissions_core::enquiry::{EnquiryField, EnquiryRecord};
use admissions_enquiry::submitter::EnquirySubmitter;
use admissions_enquiry::transport::{DeliveryError, EnquiryTransport};

/// Upper bound for waiting on background tasks in tests.
pub const WAIT: Duration = Duration::from_secs(5);

/// The enquiry used throughout the submitter tests.
pub fn sample_record() -> EnquiryRecord {
    EnquiryRecord {
        parent_name: "A".into(),
        student_name: "B".into(),
        class_seeking: "5".into(),
        mobile_number: "9999999999".into(),
        email: "a@b.com".into(),
        locality: "X".into(),
    }
}

/// Type `record` into `submitter` one field at a time.
pub fn fill<T>(submitter: &mut EnquirySubmitter<T>, record: &EnquiryRecord)
where
    T: EnquiryTransport + 'static,
{
    for field in EnquiryField::ALL {
        submitter.update_field(field, record.get(field)).unwrap();
    }
}

/// A connection failure as the intake client reports it.
pub fn connection_error() -> DeliveryError {
    DeliveryError::Transport("Network error: could not reach the admissions server".into())
}

/// Transport that replays scripted results in order and records every
/// record it was asked to deliver. Once the script runs out it accepts.
///
/// A gated transport parks each delivery until the gate is notified.
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<(), DeliveryError>>>,
    seen: Mutex<Vec<EnquiryRecord>>,
    gate: Option<Arc<Notify>>,
    abandoned: AtomicBool,
}

impl ScriptedTransport {
    pub fn new(responses: impl IntoIterator<Item = Result<(), DeliveryError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
            gate: None,
            abandoned: AtomicBool::new(false),
        })
    }

    pub fn gated(
        responses: impl IntoIterator<Item = Result<(), DeliveryError>>,
        gate: Arc<Notify>,
    ) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().collect()),
            seen: Mutex::new(Vec::new()),
            gate: Some(gate),
            abandoned: AtomicBool::new(false),
        })
    }

    /// Records handed to the transport, in call order.
    pub fn seen(&self) -> Vec<EnquiryRecord> {
        self.seen.lock().unwrap().clone()
    }

    /// `true` once a delivery was dropped before it finished.
    pub fn abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }

    /// Wait until `n` deliveries have started.
    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(WAIT, async {
            while self.seen.lock().unwrap().len() < n {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("deliveries did not start in time");
    }

    /// Wait until an in-flight delivery has been torn down.
    pub async fn wait_for_abandon(&self) {
        tokio::time::timeout(WAIT, async {
            while !self.abandoned() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("delivery was not torn down in time");
    }
}

/// Flags the transport when a delivery future is dropped mid-flight.
struct AbandonGuard<'a> {
    flag: &'a AtomicBool,
    finished: bool,
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.flag.store(true, Ordering::SeqCst);
        }
    }
}

impl EnquiryTransport for ScriptedTransport {
    async fn deliver(&self, record: &EnquiryRecord) -> Result<(), DeliveryError> {
        self.seen.lock().unwrap().push(record.clone());
        let mut guard = AbandonGuard {
            flag: &self.abandoned,
            finished: false,
        };
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        guard.finished = true;
        self.responses.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}
