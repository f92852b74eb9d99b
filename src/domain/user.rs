use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalogue::Catalogue;
use crate::domain::resource;
use crate::domain::types::{DeviceName, RecordId, Username};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct User {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub identification_type: Option<Catalogue>,
    pub identification: String,
    pub username: String,
    pub names: String,
    pub first_lastname: String,
    pub second_lastname: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub sex: Option<Catalogue>,
    pub gender: Option<Catalogue>,
    pub ethnic_origin: Option<Catalogue>,
    pub blood_type: Option<Catalogue>,
}

impl User {
    /// Full display name assembled from the name parts.
    pub fn full_name(&self) -> String {
        [
            Some(self.names.as_str()),
            Some(self.first_lastname.as_str()),
            self.second_lastname.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Role {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Permission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub actions: Vec<String>,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: Username,
    pub password: String,
    pub device_name: DeviceName,
}

resource!(User, "users", ["username", "identification", "names"]);
resource!(Role, "roles", ["name"]);
