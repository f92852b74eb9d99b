//! Create/edit screen for a single record.

use std::sync::Arc;

use crate::domain::Resource;
use crate::domain::types::RecordId;
use crate::forms::rules::{self, Evaluation};
use crate::forms::{FormError, RecordForm};
use crate::repository::{ResourceReader, ResourceWriter};
use crate::services::Outcome;
use crate::services::dialogs::{success, translate};
use crate::ui::{Confirmation, Ui};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    New,
    Loading,
    Editing,
    Submitting,
    Saved,
}

#[derive(Debug)]
pub enum SubmitOutcome<T> {
    Saved(T),
    /// The form did not pass validation; nothing was sent.
    Invalid(FormError),
    Failed,
}

fn path<F: RecordForm>() -> &'static str {
    <F::Record as Resource>::PATH
}

pub struct FormController<F, R>
where
    F: RecordForm,
{
    repo: Arc<R>,
    ui: Ui,
    form: F,
    evaluation: Evaluation,
    state: FormState,
    dirty: bool,
    touched: bool,
}

impl<F, R> FormController<F, R>
where
    F: RecordForm,
    R: ResourceReader<F::Record> + ResourceWriter<F::Record>,
{
    /// Starts from `form`, usually a default form or one pre-filled with
    /// the owning professional.
    pub fn new(repo: Arc<R>, ui: Ui, mut form: F) -> Self {
        let evaluation = rules::apply(F::RULES, &mut form);

        Self {
            repo,
            ui,
            form,
            evaluation,
            state: FormState::New,
            dirty: false,
            touched: false,
        }
    }

    /// Current field values.
    pub fn form(&self) -> &F {
        &self.form
    }

    /// Where the form is in its load/edit/save cycle.
    pub fn state(&self) -> FormState {
        self.state
    }

    /// Whether any value changed since the form was opened or saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Whether the user interacted with the form or a submit was refused.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// Whether a conditional rule currently requires `field`.
    pub fn is_required(&self, field: &str) -> bool {
        self.evaluation.is_required(field)
    }

    /// Loads the record to edit; `None` keeps the blank form.
    pub async fn open(&mut self, id: Option<RecordId>) -> Outcome {
        let Some(id) = id else {
            self.state = FormState::New;
            return Outcome::Done;
        };

        self.state = FormState::Loading;
        match self.repo.get(id).await {
            Ok(record) => {
                self.form = F::load(&record);
                self.evaluation = rules::apply(F::RULES, &mut self.form);
                self.dirty = false;
                self.touched = false;
                self.state = FormState::Editing;
                Outcome::Done
            }
            Err(err) => {
                log::error!("Failed to load {} {id}: {err}", path::<F>());
                self.ui.dialogs.present(translate(&err));
                self.reset();
                self.state = FormState::New;
                Outcome::Failed
            }
        }
    }

    /// Changes field values and re-applies the conditional rules.
    pub fn edit(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.form);
        self.evaluation = rules::apply(F::RULES, &mut self.form);
        self.dirty = true;
    }

    /// Marks the form as interacted with.
    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// Runs the field validators and the conditional rules.
    pub fn validate(&self) -> Result<(), FormError> {
        self.form.check()
    }

    /// Whether [`Self::submit`] would send a request.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Creates or updates the record depending on whether the form carries
    /// an id, then returns to the resource's list.
    pub async fn submit(&mut self) -> SubmitOutcome<F::Record> {
        let record = match self.validate().and_then(|_| self.form.to_record()) {
            Ok(record) => record,
            Err(err) => {
                self.touched = true;
                log::warn!("Refusing to submit invalid {} form: {err}", path::<F>());
                return SubmitOutcome::Invalid(err);
            }
        };

        self.state = FormState::Submitting;
        let result = match self.form.id() {
            Some(id) => self.repo.update(id, &record).await,
            None => self.repo.create(&record).await,
        };

        match result {
            Ok(saved) => {
                log::info!("Saved {} {:?}", path::<F>(), saved.data.id());
                if let Some(message) = &saved.msg {
                    self.ui.dialogs.present(success(message));
                }
                self.reset();
                self.state = FormState::Saved;
                self.ui.navigator.navigate(&<F::Record as Resource>::list_route());
                SubmitOutcome::Saved(saved.data)
            }
            Err(err) => {
                log::error!("Failed to save {}: {err}", path::<F>());
                self.ui.dialogs.present(translate(&err));
                self.state = FormState::Editing;
                SubmitOutcome::Failed
            }
        }
    }

    /// Drops the edited values, including the record id.
    fn reset(&mut self) {
        self.form = F::default();
        self.evaluation = rules::apply(F::RULES, &mut self.form);
        self.dirty = false;
        self.touched = false;
    }

    /// Navigates away, asking first when there are unsaved changes.
    /// Returns whether navigation happened.
    pub async fn leave(&mut self, route: &str) -> bool {
        if (self.dirty || self.touched)
            && !self.ui.gate.confirm(Confirmation::DiscardChanges).await
        {
            log::warn!("Navigation to {route} blocked by unsaved changes");
            return false;
        }

        self.ui.navigator.navigate(route);
        true
    }
}
