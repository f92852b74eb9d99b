//! Administrative console for a job-board / academic-records REST backend.
//!
//! The `data` feature exposes the record shapes, envelopes, pagination and
//! form models. The `client` feature adds the HTTP resource client, the
//! list and form controllers, session handling and the CLI front end.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod pagination;

#[cfg(feature = "client")]
pub mod models;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;
#[cfg(feature = "client")]
pub mod ui;
