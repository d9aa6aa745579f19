//! Admission enquiry record and its field catalogue.
//!
//! An [`EnquiryRecord`] is created empty, edited one field at a time as the
//! visitor types, and handed wholesale to the intake client on submission.
//! The wire names below are the keys the intake script reads, so they must
//! not change without updating the script.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// The six fields of the admission enquiry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnquiryField {
    ParentName,
    StudentName,
    ClassSeeking,
    MobileNumber,
    Email,
    Locality,
}

impl EnquiryField {
    /// All fields, in the order the form presents them.
    pub const ALL: [EnquiryField; 6] = [
        Self::ParentName,
        Self::StudentName,
        Self::ClassSeeking,
        Self::MobileNumber,
        Self::Email,
        Self::Locality,
    ];

    /// Parse a wire name (the form input's `name` attribute).
    pub fn from_wire_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "parentName" => Ok(Self::ParentName),
            "studentName" => Ok(Self::StudentName),
            "classSeeking" => Ok(Self::ClassSeeking),
            "mobileNumber" => Ok(Self::MobileNumber),
            "email" => Ok(Self::Email),
            "locality" => Ok(Self::Locality),
            _ => Err(CoreError::Validation(format!(
                "Unknown enquiry field '{name}'. Must be one of: parentName, studentName, \
                 classSeeking, mobileNumber, email, locality"
            ))),
        }
    }

    /// Key used when encoding the field for the intake endpoint.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::ParentName => "parentName",
            Self::StudentName => "studentName",
            Self::ClassSeeking => "classSeeking",
            Self::MobileNumber => "mobileNumber",
            Self::Email => "email",
            Self::Locality => "locality",
        }
    }

    /// Human-readable label for the field.
    pub fn label(self) -> &'static str {
        match self {
            Self::ParentName => "Parent Name",
            Self::StudentName => "Student Name",
            Self::ClassSeeking => "Class seeking admission",
            Self::MobileNumber => "Mobile Number",
            Self::Email => "Email Address",
            Self::Locality => "Area / Locality",
        }
    }

    /// Hint text shown in an empty input.
    pub fn placeholder(self) -> &'static str {
        match self {
            Self::ParentName => "Enter parent's full name",
            Self::StudentName => "Enter student's full name",
            Self::ClassSeeking => "e.g., Nursery, Class 5",
            Self::MobileNumber => "Enter your 10-digit mobile number",
            Self::Email => "you@example.com",
            Self::Locality => "Enter your area or locality",
        }
    }
}

// ---------------------------------------------------------------------------
// Record
// ---------------------------------------------------------------------------

/// In-memory enquiry as entered by the visitor.
///
/// Mobile number and email format are deliberately not checked; the intake
/// side owns any further validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRecord {
    pub parent_name: String,
    pub student_name: String,
    pub class_seeking: String,
    pub mobile_number: String,
    pub email: String,
    pub locality: String,
}

impl EnquiryRecord {
    /// Current value of one field.
    pub fn get(&self, field: EnquiryField) -> &str {
        match field {
            EnquiryField::ParentName => &self.parent_name,
            EnquiryField::StudentName => &self.student_name,
            EnquiryField::ClassSeeking => &self.class_seeking,
            EnquiryField::MobileNumber => &self.mobile_number,
            EnquiryField::Email => &self.email,
            EnquiryField::Locality => &self.locality,
        }
    }

    /// Replace one field's value.
    pub fn set(&mut self, field: EnquiryField, value: impl Into<String>) {
        let slot = match field {
            EnquiryField::ParentName => &mut self.parent_name,
            EnquiryField::StudentName => &mut self.student_name,
            EnquiryField::ClassSeeking => &mut self.class_seeking,
            EnquiryField::MobileNumber => &mut self.mobile_number,
            EnquiryField::Email => &mut self.email,
            EnquiryField::Locality => &mut self.locality,
        };
        *slot = value.into();
    }

    /// `(wire name, value)` pairs in form order, ready for encoding.
    pub fn wire_pairs(&self) -> Vec<(&'static str, &str)> {
        EnquiryField::ALL
            .iter()
            .map(|f| (f.wire_name(), self.get(*f)))
            .collect()
    }

    /// Fields that are empty or whitespace-only.
    pub fn missing_fields(&self) -> Vec<EnquiryField> {
        EnquiryField::ALL
            .into_iter()
            .filter(|f| self.get(*f).trim().is_empty())
            .collect()
    }

    /// Check that every required field has a value.
    pub fn ensure_complete(&self) -> Result<(), CoreError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            return Ok(());
        }
        let labels: Vec<&str> = missing.iter().map(|f| f.label()).collect();
        Err(CoreError::Validation(format!(
            "Required fields are empty: {}",
            labels.join(", ")
        )))
    }
}
