use thiserror::Error;

use crate::dto::envelope::{ApiMessage, ErrorEnvelope, field_errors};

/// Database code the backend forwards on unique-constraint violations.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record already exists: {}", .0.summary)]
    Conflict(ApiMessage),

    #[error("Record not found: {}", .0.summary)]
    NotFound(ApiMessage),

    #[error("Validation failed: {}", .message.summary)]
    Validation {
        message: ApiMessage,
        fields: Vec<(String, Vec<String>)>,
    },

    #[error("Unauthorized: {}", .0.summary)]
    Unauthorized(ApiMessage),

    #[error("Server error {status}: {}", .message.summary)]
    Server { status: u16, message: ApiMessage },

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Request could not be built: {0}")]
    InvalidRequest(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Classifies a non-success response by status code and error envelope.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let envelope: ErrorEnvelope = serde_json::from_slice(body).unwrap_or_default();
        let message = envelope.msg.unwrap_or_default();

        match status {
            400 if message.code_str().as_deref() == Some(UNIQUE_VIOLATION_CODE) => {
                RepositoryError::Conflict(message)
            }
            401 => RepositoryError::Unauthorized(message),
            404 => RepositoryError::NotFound(message),
            422 => {
                let mut fields = message.field_errors();
                if fields.is_empty() {
                    if let Some(errors) = &envelope.errors {
                        fields = field_errors(errors);
                    }
                }
                RepositoryError::Validation { message, fields }
            }
            _ => RepositoryError::Server { status, message },
        }
    }

    /// Server-supplied message, when the failure came with one.
    pub fn message(&self) -> Option<&ApiMessage> {
        match self {
            RepositoryError::Conflict(message)
            | RepositoryError::NotFound(message)
            | RepositoryError::Unauthorized(message)
            | RepositoryError::Validation { message, .. }
            | RepositoryError::Server { message, .. } => Some(message),
            RepositoryError::Connection(_)
            | RepositoryError::Decode(_)
            | RepositoryError::InvalidRequest(_) => None,
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            RepositoryError::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            RepositoryError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            RepositoryError::Server {
                status: status.as_u16(),
                message: ApiMessage::default(),
            }
        } else {
            RepositoryError::Connection(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Decode(err.to_string())
    }
}
