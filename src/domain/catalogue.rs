//! Backend-managed lookup entries used to populate dropdowns.

use serde::{Deserialize, Serialize};

use crate::domain::resource;
use crate::domain::types::RecordId;

/// A lookup/reference entry (identification types, levels, areas, ...).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Catalogue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub parent_id: Option<RecordId>,
    pub code: Option<String>,
    pub name: String,
    /// Catalogue family, e.g. `IDENTIFICATION_TYPE`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub icon: Option<String>,
}

impl Catalogue {
    /// Reference to an existing entry, as sent inside other records.
    pub fn reference(id: RecordId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

resource!(Catalogue, "catalogues", ["name"]);
