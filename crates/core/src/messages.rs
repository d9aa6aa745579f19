//! Well-known user-facing message constants.
//!
//! These are shown verbatim by the front-end, so keep them in sync with the
//! copy on the admissions page.

/// Fallback when a failure carries no readable message at all.
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Fallback when the intake script reports failure without a message.
pub const SCRIPT_FAILURE: &str = "An error occurred in the script.";

/// Prefix for transport-level failures (unreachable endpoint, non-2xx).
pub const NETWORK_ERROR_PREFIX: &str = "Network error";

/// Heading of the success view.
pub const SUCCESS_HEADING: &str = "Thank You!";

/// Body of the success view.
pub const SUCCESS_BODY: &str =
    "Your enquiry has been submitted. Our team will contact you shortly.";

/// Heading of the failure view.
pub const FAILURE_HEADING: &str = "Submission Failed";

/// Admissions office address offered when submissions keep failing.
pub const ADMISSIONS_CONTACT_EMAIL: &str = "admissions@dalimss.com";

/// Build the "contact the office" note shown under a failed submission.
pub fn contact_note() -> String {
    format!(
        "If this problem continues, please contact the admissions office \
         at {ADMISSIONS_CONTACT_EMAIL} for assistance."
    )
}

/// Return `message` trimmed, or [`GENERIC_FAILURE`] when it is blank.
///
/// Every `Error` status must carry a non-empty message.
pub fn non_empty_or_generic(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        GENERIC_FAILURE.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_message_falls_back_to_generic() {
        assert_eq!(non_empty_or_generic(""), GENERIC_FAILURE);
        assert_eq!(non_empty_or_generic("   \n"), GENERIC_FAILURE);
    }

    #[test]
    fn message_is_trimmed() {
        assert_eq!(non_empty_or_generic("  Sheet locked "), "Sheet locked");
    }

    #[test]
    fn contact_note_mentions_office_email() {
        assert!(contact_note().contains(ADMISSIONS_CONTACT_EMAIL));
    }
}
