//! Record shapes mirroring the backend resources.
//!
//! Records carry no behaviour beyond their wire shape. Every record type
//! implements [`Resource`], which is all the generic client and controllers
//! need to list, load, save and delete it.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::types::RecordId;

pub mod catalogue;
pub mod job_board;
pub mod license_work;
pub mod types;
pub mod uic;
pub mod user;

/// A backend-exposed collection of records of one type.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Base REST path without leading slash, e.g. `courses`.
    const PATH: &'static str;

    /// Query fields that receive the list filter text.
    const FILTER_FIELDS: &'static [&'static str];

    /// Identifier of the record; `None` until the backend has persisted it.
    fn id(&self) -> Option<RecordId>;

    /// Console route of the resource's list screen.
    fn list_route() -> String {
        format!("/{}", Self::PATH)
    }
}

/// Implements [`Resource`] for records exposing an `id: Option<RecordId>` field.
macro_rules! resource {
    ($name:ty, $path:expr, [$($field:expr),* $(,)?]) => {
        impl $crate::domain::Resource for $name {
            const PATH: &'static str = $path;
            const FILTER_FIELDS: &'static [&'static str] = &[$($field),*];

            fn id(&self) -> Option<$crate::domain::types::RecordId> {
                self.id
            }
        }
    };
}

pub(crate) use resource;
