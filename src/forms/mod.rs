//! Form models backing the console's edit screens.
//!
//! Every record form derives [`Validate`] for its per-field validators and
//! declares its conditionally required fields as a [`ConditionalRule`] table.

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::Resource;
use crate::domain::types::RecordId;
use crate::forms::rules::{ConditionalRule, FormFields};

pub mod job_board;
pub mod login;
pub mod rules;
pub mod uic;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("required fields missing: {}", .0.join(", "))]
    Required(Vec<&'static str>),

    #[error("invalid email address in {0}")]
    InvalidEmail(&'static str),

    #[error("invalid phone number in {0}")]
    InvalidPhoneNumber(&'static str),

    #[error("invalid username")]
    InvalidUsername,

    #[error("invalid device name")]
    InvalidDeviceName,
}

impl FormError {
    /// Names of the offending fields, for marking inputs in the UI.
    pub fn fields(&self) -> Vec<String> {
        match self {
            FormError::Validation(errors) => {
                let mut fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                fields.sort();
                fields
            }
            FormError::Required(fields) => fields.iter().map(|f| f.to_string()).collect(),
            FormError::InvalidEmail(field) | FormError::InvalidPhoneNumber(field) => {
                vec![field.to_string()]
            }
            FormError::InvalidUsername => vec!["username".to_string()],
            FormError::InvalidDeviceName => vec!["device_name".to_string()],
        }
    }
}

/// A form editing one record type.
pub trait RecordForm: Validate + FormFields + Default + Clone + Send + Sync + 'static {
    type Record: Resource;

    /// Fields whose required-ness depends on a sibling boolean.
    const RULES: &'static [ConditionalRule] = &[];

    /// Identifier of the record being edited; `None` for a new record.
    fn id(&self) -> Option<RecordId>;

    /// Fills a form from a record fetched from the backend.
    fn load(record: &Self::Record) -> Self;

    /// Builds the record to submit.
    fn to_record(&self) -> Result<Self::Record, FormError>;

    /// Runs the field validators and the conditional rule table.
    fn check(&self) -> Result<(), FormError> {
        self.validate()?;
        let missing = rules::evaluate(Self::RULES, self).missing(self);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::Required(missing))
        }
    }
}

/// Trims a text input, mapping blank values to `None`.
pub(crate) fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
