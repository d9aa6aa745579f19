//! `admissions-enquiry` library crate.
//!
//! The enquiry submitter component, its delivery seam, and the terminal
//! front-end. The binary entrypoint lives in `main.rs`.

pub mod submitter;
pub mod terminal;
pub mod transport;
