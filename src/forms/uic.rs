//! Forms of the UIC degree-work module.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::types::RecordId;
use crate::domain::uic::ProjectPlan;
use crate::forms::rules::{ConditionalRule, FieldRule, FormFields};
use crate::forms::{FormError, RecordForm, non_blank};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ProjectPlanForm {
    pub id: Option<RecordId>,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    /// Approved by the degree committee.
    pub approved: bool,
    #[validate(length(min = 1, max = 100))]
    pub act_code: Option<String>,
    pub approved_at: Option<NaiveDate>,
    #[serde(default)]
    pub observations: Vec<String>,
}

impl FormFields for ProjectPlanForm {
    fn flag(&self, field: &str) -> Option<bool> {
        match field {
            "approved" => Some(self.approved),
            _ => None,
        }
    }

    fn is_blank(&self, field: &str) -> bool {
        match field {
            "act_code" => non_blank(&self.act_code).is_none(),
            "approved_at" => self.approved_at.is_none(),
            _ => false,
        }
    }

    fn clear(&mut self, field: &str) {
        match field {
            "act_code" => self.act_code = None,
            "approved_at" => self.approved_at = None,
            _ => {}
        }
    }
}

impl RecordForm for ProjectPlanForm {
    type Record = ProjectPlan;

    const RULES: &'static [ConditionalRule] = &[ConditionalRule {
        controlling: "approved",
        dependents: &["act_code", "approved_at"],
        when_true: FieldRule::Required,
        when_false: FieldRule::Cleared,
    }];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn load(record: &ProjectPlan) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            description: record.description.clone(),
            approved: record.approved,
            act_code: record.act_code.clone(),
            approved_at: record.approved_at,
            observations: record.observations.clone(),
        }
    }

    fn to_record(&self) -> Result<ProjectPlan, FormError> {
        Ok(ProjectPlan {
            id: self.id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            approved: self.approved,
            act_code: non_blank(&self.act_code),
            approved_at: self.approved_at,
            observations: self
                .observations
                .iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_plan_needs_act_code_and_date() {
        let form = ProjectPlanForm {
            title: "Inventory system".to_string(),
            description: "Stock control for the lab".to_string(),
            approved: true,
            act_code: Some("   ".to_string()),
            ..ProjectPlanForm::default()
        };

        let err = form.check().unwrap_err();

        assert_eq!(
            err.fields(),
            vec!["act_code".to_string(), "approved_at".to_string()]
        );
    }

    #[test]
    fn observations_are_trimmed_on_submit() {
        let form = ProjectPlanForm {
            title: "Plan".to_string(),
            description: "Desc".to_string(),
            observations: vec!["  fix scope ".to_string(), " ".to_string()],
            ..ProjectPlanForm::default()
        };

        let record = form.to_record().unwrap();

        assert_eq!(record.observations, vec!["fix scope".to_string()]);
        assert_eq!(record.act_code, None);
    }
}
