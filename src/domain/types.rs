//! Strongly-typed value objects used by records and forms.
//!
//! These wrappers enforce basic invariants (positive identifiers, normalized
//! email, E.164 phone numbers) so that once a value reaches a record it can be
//! sent to the backend as-is.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
}

/// Normalizes and validates an email string.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_lowercase();
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i64) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i64` backing this identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(RecordId, "Backend identifier of a persisted record.");

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = value.into().trim().to_string();
                if trimmed.is_empty() {
                    return Err(TypeConstraintError::EmptyString);
                }
                Ok(Self(trimmed))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(Username, "Login name wrapper enforcing non-empty values.");

non_empty_string_newtype!(
    DeviceName,
    "Name the backend attaches to the issued access token."
);

/// Normalizes a phone number string to E.164 format.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(None, trimmed).map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}
