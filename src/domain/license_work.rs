//! Records of the license-work (staff leave) module.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::catalogue::Catalogue;
use crate::domain::resource;
use crate::domain::types::RecordId;
use crate::domain::user::User;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Employer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub logo: Option<String>,
    pub name: String,
    pub approval_name: String,
    pub register_name: String,
    pub coordination_name: Option<String>,
    pub unit_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Employee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub user: Option<User>,
    pub employer: Option<Employer>,
}

/// Leave request form template an employer publishes ("Form" in the backend).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LicenseForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub employer: Option<Employer>,
    pub code: String,
    pub description: String,
    pub regime: String,
    pub days_const: Option<u32>,
    pub approved_at: Option<NaiveDate>,
    pub state: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Holiday {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub employee: Option<Employee>,
    pub year: Option<i32>,
    pub number_days: Option<u32>,
}

/// Leave reason with the bounds the backend enforces on requested days.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Reason {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub description_one: String,
    pub description_two: Option<String>,
    pub discountable_holidays: bool,
    pub days_min: Option<u32>,
    pub days_max: Option<u32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct State {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub code: String,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Dependence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub employer: Option<Employer>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct LicenseApplication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub employee: Option<Employee>,
    pub reason: Option<Reason>,
    pub location: Option<Catalogue>,
    #[serde(rename = "type")]
    pub kind: bool,
    pub date_started_at: Option<NaiveDate>,
    pub date_ended_at: Option<NaiveDate>,
    pub time_started_at: Option<NaiveTime>,
    pub time_ended_at: Option<NaiveTime>,
    pub observations: Vec<String>,
}

resource!(Employer, "license-work/employers", ["name"]);
resource!(Employee, "license-work/employees", []);
resource!(LicenseForm, "license-work/forms", ["code", "description"]);
resource!(Holiday, "license-work/holidays", []);
resource!(Reason, "license-work/reasons", ["name"]);
resource!(State, "license-work/states", ["code", "name"]);
resource!(Dependence, "license-work/dependences", ["name"]);
resource!(LicenseApplication, "license-work/applications", []);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tests::assert_filter_fields_exist;

    #[test]
    fn filter_fields_exist() {
        assert_filter_fields_exist::<Employer>();
        assert_filter_fields_exist::<Employee>();
        assert_filter_fields_exist::<LicenseForm>();
        assert_filter_fields_exist::<Holiday>();
        assert_filter_fields_exist::<Reason>();
        assert_filter_fields_exist::<State>();
        assert_filter_fields_exist::<Dependence>();
        assert_filter_fields_exist::<LicenseApplication>();
    }

    #[test]
    fn application_parses_times() {
        let application: LicenseApplication = serde_json::from_str(
            r#"{"id":1,"type":true,"time_started_at":"08:30:00","observations":["half day"]}"#,
        )
        .unwrap();
        assert!(application.kind);
        assert_eq!(
            application.time_started_at,
            NaiveTime::from_hms_opt(8, 30, 0)
        );
        assert_eq!(application.observations, vec!["half day".to_string()]);
    }
}
