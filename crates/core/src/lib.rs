//! Domain types for the admission enquiry workflow.
//!
//! Holds the enquiry record a visitor fills in, the submission status the
//! front-end renders, and the user-facing message constants shared by the
//! intake client and the submitter. Nothing in this crate performs I/O.

pub mod enquiry;
pub mod error;
pub mod messages;
pub mod status;
