//! Turns backend failures and messages into user-facing dialogs.

use crate::dto::dialog::{Dialog, DialogBody, DialogKind};
use crate::dto::envelope::ApiMessage;
use crate::repository::errors::RepositoryError;
use crate::services::ServiceError;

pub const CONFLICT_TITLE: &str = "Record already exists";
pub const VALIDATION_TITLE: &str = "The data sent is not valid";
pub const UNREACHABLE_TITLE: &str = "Server unreachable";
const GENERIC_TITLE: &str = "Something went wrong";
const GENERIC_TEXT: &str = "The server could not complete the request. Try again later.";

fn title_or(message: &ApiMessage, fallback: &str) -> String {
    match message.summary.trim() {
        "" => fallback.to_string(),
        summary => summary.to_string(),
    }
}

fn with_period(text: &str) -> String {
    let text = text.trim();
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// Dialog for a failed backend call.
pub fn translate(err: &RepositoryError) -> Dialog {
    match err {
        RepositoryError::Conflict(message) => {
            Dialog::text(DialogKind::Error, CONFLICT_TITLE, message.detail_text())
        }
        RepositoryError::NotFound(message) => Dialog::text(
            DialogKind::Warning,
            title_or(message, "Record not found"),
            message.detail_text(),
        ),
        RepositoryError::Validation { message, fields } => {
            let items: Vec<String> = fields
                .iter()
                .flat_map(|(_, messages)| messages.iter().map(|m| with_period(m)))
                .collect();
            if items.is_empty() {
                Dialog::text(
                    DialogKind::Error,
                    title_or(message, VALIDATION_TITLE),
                    message.detail_text(),
                )
            } else {
                Dialog::new(
                    DialogKind::Error,
                    title_or(message, VALIDATION_TITLE),
                    DialogBody::Items(items),
                )
            }
        }
        RepositoryError::Unauthorized(message) | RepositoryError::Server { message, .. } => {
            Dialog::text(
                DialogKind::Error,
                title_or(message, GENERIC_TITLE),
                message
                    .detail_text()
                    .or_else(|| Some(GENERIC_TEXT.to_string())),
            )
        }
        RepositoryError::Connection(detail) => Dialog::text(
            DialogKind::Error,
            UNREACHABLE_TITLE,
            Some(format!("The server could not be reached: {detail}")),
        ),
        RepositoryError::Decode(_) => Dialog::text(
            DialogKind::Error,
            GENERIC_TITLE,
            Some(GENERIC_TEXT.to_string()),
        ),
        RepositoryError::InvalidRequest(detail) => Dialog::text(
            DialogKind::Error,
            GENERIC_TITLE,
            Some(format!("The request could not be prepared: {detail}")),
        ),
    }
}

/// Dialog for a server message accompanying a successful mutation.
pub fn success(message: &ApiMessage) -> Dialog {
    Dialog::text(
        DialogKind::Success,
        title_or(message, "Done"),
        message.detail_text(),
    )
}

/// Dialog for any service failure.
pub fn from_service_error(err: &ServiceError) -> Dialog {
    match err {
        ServiceError::Repository(err) => translate(err),
        ServiceError::Form(err) => Dialog::new(
            DialogKind::Error,
            VALIDATION_TITLE,
            DialogBody::Items(vec![with_period(&err.to_string())]),
        ),
        ServiceError::Session(err) => {
            Dialog::text(DialogKind::Error, GENERIC_TITLE, Some(err.to_string()))
        }
    }
}
