//! Records of the job-board module: professional profiles and their
//! curriculum sections, companies, offers and applications.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalogue::Catalogue;
use crate::domain::resource;
use crate::domain::types::RecordId;
use crate::domain::user::User;

/// A person's employment profile, the primary subject of the job board.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Professional {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: Option<User>,
    pub about_me: String,
    pub catastrophic_diseased: bool,
    pub disabled: bool,
    pub familiar_disabled: bool,
    pub familiar_catastrophic_diseased: bool,
    pub traveled: bool,
    pub has_vehicle: bool,
}

impl Professional {
    /// Reference to an existing professional, as sent inside other records.
    pub fn reference(id: RecordId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Course {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub professional: Option<Professional>,
    pub event_type: Option<Catalogue>,
    pub institution: Option<Catalogue>,
    pub certification_type: Option<Catalogue>,
    pub area: Option<Catalogue>,
    pub name: String,
    pub description: String,
    pub started_at: Option<NaiveDate>,
    pub ended_at: Option<NaiveDate>,
    pub hours: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AcademicFormation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub professional: Option<Professional>,
    pub professional_degree: Option<Catalogue>,
    pub certificated: bool,
    pub senescyt_code: Option<String>,
    pub registered_at: Option<NaiveDate>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Experience {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub professional: Option<Professional>,
    pub area: Option<Catalogue>,
    pub employer: String,
    pub position: String,
    pub started_at: Option<NaiveDate>,
    pub ended_at: Option<NaiveDate>,
    pub activities: Vec<String>,
    pub reason_leave: Option<String>,
    /// Still working there; a current job has no end date.
    pub worked: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Language {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub professional: Option<Professional>,
    pub idiom: Option<Catalogue>,
    pub written_level: Option<Catalogue>,
    pub spoken_level: Option<Catalogue>,
    pub read_level: Option<Catalogue>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Skill {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub professional: Option<Professional>,
    #[serde(rename = "type")]
    pub kind: Option<Catalogue>,
    pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub professional: Option<Professional>,
    pub institution: String,
    pub position: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Category {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub parent_id: Option<RecordId>,
    pub code: String,
    pub name: String,
    pub icon: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Company {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: Option<User>,
    pub trade_name: String,
    pub commercial_activities: Vec<String>,
    pub web: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<Catalogue>,
    pub activity_type: Option<Catalogue>,
    pub person_type: Option<Catalogue>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Offer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub company: Option<Company>,
    pub code: String,
    pub position: Option<Catalogue>,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub contact_cellphone: Option<String>,
    pub remuneration: Option<String>,
    pub vacancies: Option<u32>,
    pub started_at: Option<NaiveDate>,
    pub ended_at: Option<NaiveDate>,
    pub activities: Vec<String>,
    pub requirements: Vec<String>,
    pub state: Option<Catalogue>,
}

/// A professional's application to an offer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Application {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub offer: Option<Offer>,
    pub professional: Option<Professional>,
    pub state: Option<Catalogue>,
}

resource!(Professional, "professionals", ["about_me"]);
resource!(Course, "courses", ["name", "description"]);
resource!(AcademicFormation, "academic-formations", ["senescyt_code"]);
resource!(Experience, "experiences", ["employer", "position"]);
resource!(Language, "languages", []);
resource!(Skill, "skills", ["description"]);
resource!(Reference, "references", ["institution", "contact_name"]);
resource!(Category, "categories", ["code", "name"]);
resource!(Company, "companies", ["trade_name"]);
resource!(Offer, "offers", ["code", "contact_name"]);
resource!(Application, "applications", []);
