//! Controllers and workflows driving the console screens.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::session::SessionError;

pub mod auth;
pub mod catalogues;
pub mod dialogs;
pub mod form;
pub mod list;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// How a controller operation ended. Failures have already been shown to the
/// user as a dialog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    /// Declined at the confirmation gate, or nothing to act on.
    Cancelled,
    Failed,
    /// A newer load superseded this one.
    Stale,
}
