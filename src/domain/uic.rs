//! Records of the UIC (degree work) academic module.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalogue::Catalogue;
use crate::domain::resource;
use crate::domain::types::RecordId;
use crate::domain::user::User;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProjectPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub description: String,
    pub approved: bool,
    pub act_code: Option<String>,
    pub approved_at: Option<NaiveDate>,
    pub observations: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Enrollment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub student: Option<User>,
    pub modality: Option<Catalogue>,
    pub code: String,
    pub date: Option<NaiveDate>,
    pub state: Option<Catalogue>,
    pub observations: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Requirement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description: Option<String>,
    pub required: bool,
    pub solicited: bool,
}

resource!(ProjectPlan, "uic/project-plans", ["title", "act_code"]);
resource!(Enrollment, "uic/enrollments", ["code"]);
resource!(Requirement, "uic/requirements", ["name"]);
