//! HTTP client for the admission enquiry intake endpoint.
//!
//! The intake endpoint is a third-party script that stores or forwards
//! enquiries. [`api::IntakeApi`] posts one enquiry per call and reports
//! whether it was accepted; [`config::IntakeConfig`] selects the endpoint,
//! the body encoding, and how far the reply can be trusted.

pub mod api;
pub mod config;

pub use api::{IntakeAck, IntakeApi, IntakeError, IntakeErrorKind};
pub use config::{FieldEncoding, IntakeConfig, IntakeConfigError, ResponseMode};
