//! Forms editing a professional's curriculum sections.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::catalogue::Catalogue;
use crate::domain::job_board::{AcademicFormation, Course, Experience, Professional, Reference};
use crate::domain::types::{Email, PhoneNumber, RecordId};
use crate::forms::rules::{ConditionalRule, FieldRule, FormFields};
use crate::forms::{FormError, RecordForm, non_blank};

fn catalogue_id(catalogue: &Option<Catalogue>) -> Option<RecordId> {
    catalogue.as_ref().and_then(|c| c.id)
}

fn catalogue(id: Option<RecordId>) -> Option<Catalogue> {
    id.map(Catalogue::reference)
}

fn professional_id(professional: &Option<Professional>) -> Option<RecordId> {
    professional.as_ref().and_then(|p| p.id)
}

fn professional(id: Option<RecordId>) -> Option<Professional> {
    id.map(Professional::reference)
}

fn validate_date_range(
    started_at: Option<NaiveDate>,
    ended_at: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (started_at, ended_at) {
        (Some(start), Some(end)) if end < start => Err(ValidationError::new("date_range")),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_course_dates"))]
pub struct CourseForm {
    pub id: Option<RecordId>,
    /// Owner of the course; taken from the session for new records.
    pub professional_id: Option<RecordId>,
    #[validate(required)]
    pub event_type_id: Option<RecordId>,
    #[validate(required)]
    pub institution_id: Option<RecordId>,
    #[validate(required)]
    pub certification_type_id: Option<RecordId>,
    pub area_id: Option<RecordId>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    #[validate(required)]
    pub started_at: Option<NaiveDate>,
    #[validate(required)]
    pub ended_at: Option<NaiveDate>,
    #[validate(range(min = 1, max = 10000))]
    pub hours: Option<u32>,
}

fn validate_course_dates(form: &CourseForm) -> Result<(), ValidationError> {
    validate_date_range(form.started_at, form.ended_at)
}

impl CourseForm {
    pub fn for_professional(professional_id: RecordId) -> Self {
        Self {
            professional_id: Some(professional_id),
            ..Self::default()
        }
    }
}

impl FormFields for CourseForm {}

impl RecordForm for CourseForm {
    type Record = Course;

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn load(record: &Course) -> Self {
        Self {
            id: record.id,
            professional_id: professional_id(&record.professional),
            event_type_id: catalogue_id(&record.event_type),
            institution_id: catalogue_id(&record.institution),
            certification_type_id: catalogue_id(&record.certification_type),
            area_id: catalogue_id(&record.area),
            name: record.name.clone(),
            description: record.description.clone(),
            started_at: record.started_at,
            ended_at: record.ended_at,
            hours: record.hours,
        }
    }

    fn to_record(&self) -> Result<Course, FormError> {
        Ok(Course {
            id: self.id,
            professional: professional(self.professional_id),
            event_type: catalogue(self.event_type_id),
            institution: catalogue(self.institution_id),
            certification_type: catalogue(self.certification_type_id),
            area: catalogue(self.area_id),
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            started_at: self.started_at,
            ended_at: self.ended_at,
            hours: self.hours,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AcademicFormationForm {
    pub id: Option<RecordId>,
    pub professional_id: Option<RecordId>,
    #[validate(required)]
    pub professional_degree_id: Option<RecordId>,
    /// Registered with the national degree registry.
    pub certificated: bool,
    #[validate(length(min = 1, max = 50))]
    pub senescyt_code: Option<String>,
    pub registered_at: Option<NaiveDate>,
}

impl AcademicFormationForm {
    pub fn for_professional(professional_id: RecordId) -> Self {
        Self {
            professional_id: Some(professional_id),
            ..Self::default()
        }
    }
}

impl FormFields for AcademicFormationForm {
    fn flag(&self, field: &str) -> Option<bool> {
        match field {
            "certificated" => Some(self.certificated),
            _ => None,
        }
    }

    fn is_blank(&self, field: &str) -> bool {
        match field {
            "senescyt_code" => non_blank(&self.senescyt_code).is_none(),
            "registered_at" => self.registered_at.is_none(),
            _ => false,
        }
    }

    fn clear(&mut self, field: &str) {
        match field {
            "senescyt_code" => self.senescyt_code = None,
            "registered_at" => self.registered_at = None,
            _ => {}
        }
    }
}

impl RecordForm for AcademicFormationForm {
    type Record = AcademicFormation;

    const RULES: &'static [ConditionalRule] = &[ConditionalRule {
        controlling: "certificated",
        dependents: &["senescyt_code", "registered_at"],
        when_true: FieldRule::Required,
        when_false: FieldRule::Cleared,
    }];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn load(record: &AcademicFormation) -> Self {
        Self {
            id: record.id,
            professional_id: professional_id(&record.professional),
            professional_degree_id: catalogue_id(&record.professional_degree),
            certificated: record.certificated,
            senescyt_code: record.senescyt_code.clone(),
            registered_at: record.registered_at,
        }
    }

    fn to_record(&self) -> Result<AcademicFormation, FormError> {
        Ok(AcademicFormation {
            id: self.id,
            professional: professional(self.professional_id),
            professional_degree: catalogue(self.professional_degree_id),
            certificated: self.certificated,
            senescyt_code: non_blank(&self.senescyt_code),
            registered_at: self.registered_at,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "validate_experience_dates"))]
pub struct ExperienceForm {
    pub id: Option<RecordId>,
    pub professional_id: Option<RecordId>,
    #[validate(required)]
    pub area_id: Option<RecordId>,
    #[validate(length(min = 1, max = 200))]
    pub employer: String,
    #[validate(length(min = 1, max = 200))]
    pub position: String,
    #[validate(required)]
    pub started_at: Option<NaiveDate>,
    pub ended_at: Option<NaiveDate>,
    #[validate(length(min = 1))]
    pub activities: Vec<String>,
    #[validate(length(max = 500))]
    pub reason_leave: Option<String>,
    /// Still working there.
    pub worked: bool,
}

fn validate_experience_dates(form: &ExperienceForm) -> Result<(), ValidationError> {
    validate_date_range(form.started_at, form.ended_at)
}

impl ExperienceForm {
    pub fn for_professional(professional_id: RecordId) -> Self {
        Self {
            professional_id: Some(professional_id),
            ..Self::default()
        }
    }
}

impl FormFields for ExperienceForm {
    fn flag(&self, field: &str) -> Option<bool> {
        match field {
            "worked" => Some(self.worked),
            _ => None,
        }
    }

    fn is_blank(&self, field: &str) -> bool {
        match field {
            "ended_at" => self.ended_at.is_none(),
            "reason_leave" => non_blank(&self.reason_leave).is_none(),
            _ => false,
        }
    }

    fn clear(&mut self, field: &str) {
        match field {
            "ended_at" => self.ended_at = None,
            "reason_leave" => self.reason_leave = None,
            _ => {}
        }
    }
}

impl RecordForm for ExperienceForm {
    type Record = Experience;

    const RULES: &'static [ConditionalRule] = &[ConditionalRule {
        controlling: "worked",
        dependents: &["ended_at", "reason_leave"],
        when_true: FieldRule::Cleared,
        when_false: FieldRule::Required,
    }];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn load(record: &Experience) -> Self {
        Self {
            id: record.id,
            professional_id: professional_id(&record.professional),
            area_id: catalogue_id(&record.area),
            employer: record.employer.clone(),
            position: record.position.clone(),
            started_at: record.started_at,
            ended_at: record.ended_at,
            activities: record.activities.clone(),
            reason_leave: record.reason_leave.clone(),
            worked: record.worked,
        }
    }

    fn to_record(&self) -> Result<Experience, FormError> {
        Ok(Experience {
            id: self.id,
            professional: professional(self.professional_id),
            area: catalogue(self.area_id),
            employer: self.employer.trim().to_string(),
            position: self.position.trim().to_string(),
            started_at: self.started_at,
            ended_at: self.ended_at,
            activities: self
                .activities
                .iter()
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty())
                .collect(),
            reason_leave: non_blank(&self.reason_leave),
            worked: self.worked,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReferenceForm {
    pub id: Option<RecordId>,
    pub professional_id: Option<RecordId>,
    #[validate(length(min = 1, max = 200))]
    pub institution: String,
    #[validate(length(min = 1, max = 200))]
    pub position: String,
    #[validate(length(min = 1, max = 200))]
    pub contact_name: String,
    #[validate(length(min = 1), custom(function = "validate_phone"))]
    pub contact_phone: String,
    #[validate(email)]
    pub contact_email: String,
}

fn validate_phone(value: &str) -> Result<(), ValidationError> {
    PhoneNumber::new(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("phone"))
}

impl FormFields for ReferenceForm {}

impl RecordForm for ReferenceForm {
    type Record = Reference;

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn load(record: &Reference) -> Self {
        Self {
            id: record.id,
            professional_id: professional_id(&record.professional),
            institution: record.institution.clone(),
            position: record.position.clone(),
            contact_name: record.contact_name.clone(),
            contact_phone: record.contact_phone.clone(),
            contact_email: record.contact_email.clone(),
        }
    }

    fn to_record(&self) -> Result<Reference, FormError> {
        let phone = PhoneNumber::new(self.contact_phone.as_str())
            .map_err(|_| FormError::InvalidPhoneNumber("contact_phone"))?;
        let email = Email::new(self.contact_email.as_str())
            .map_err(|_| FormError::InvalidEmail("contact_email"))?;

        Ok(Reference {
            id: self.id,
            professional: professional(self.professional_id),
            institution: self.institution.trim().to_string(),
            position: self.position.trim().to_string(),
            contact_name: self.contact_name.trim().to_string(),
            contact_phone: phone.into_inner(),
            contact_email: email.into_inner(),
        })
    }
}
