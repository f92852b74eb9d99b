//! Presentation seam: whatever renders dialogs, asks for confirmation and
//! changes the current screen.

use std::sync::Arc;

use async_trait::async_trait;

use crate::dto::dialog::Dialog;

/// Prompt shown before a destructive or discarding action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Delete { count: usize },
    DiscardChanges,
}

impl Confirmation {
    pub fn title(&self) -> &'static str {
        match self {
            Confirmation::Delete { .. } => "Are you sure you want to delete?",
            Confirmation::DiscardChanges => "Discard unsaved changes?",
        }
    }

    pub fn text(&self) -> String {
        match self {
            Confirmation::Delete { count: 1 } => "The record will be deleted.".to_string(),
            Confirmation::Delete { count } => format!("{count} records will be deleted."),
            Confirmation::DiscardChanges => {
                "The changes made to this form will be lost.".to_string()
            }
        }
    }
}

pub trait DialogPresenter: Send + Sync {
    fn present(&self, dialog: Dialog);
}

#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    /// Resolves to `true` only when the user accepts.
    async fn confirm(&self, confirmation: Confirmation) -> bool;
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// The three presentation services a controller needs.
#[derive(Clone)]
pub struct Ui {
    pub dialogs: Arc<dyn DialogPresenter>,
    pub gate: Arc<dyn ConfirmationGate>,
    pub navigator: Arc<dyn Navigator>,
}

impl Ui {
    pub fn new(
        dialogs: Arc<dyn DialogPresenter>,
        gate: Arc<dyn ConfirmationGate>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            dialogs,
            gate,
            navigator,
        }
    }

    /// Uses one value for all three services.
    pub fn from_shared<U>(ui: Arc<U>) -> Self
    where
        U: DialogPresenter + ConfirmationGate + Navigator + 'static,
    {
        Self {
            dialogs: ui.clone(),
            gate: ui.clone(),
            navigator: ui,
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Records everything shown and answers confirmations from a script.
    #[derive(Default)]
    pub(crate) struct RecordingUi {
        pub(crate) dialogs: Mutex<Vec<Dialog>>,
        pub(crate) confirmations: Mutex<Vec<Confirmation>>,
        pub(crate) answers: Mutex<VecDeque<bool>>,
        pub(crate) routes: Mutex<Vec<String>>,
    }

    impl RecordingUi {
        pub(crate) fn answering(answers: &[bool]) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers.iter().copied().collect()),
                ..Self::default()
            })
        }

        pub(crate) fn dialogs(&self) -> Vec<Dialog> {
            self.dialogs.lock().unwrap().clone()
        }

        pub(crate) fn routes(&self) -> Vec<String> {
            self.routes.lock().unwrap().clone()
        }

        pub(crate) fn confirmations(&self) -> Vec<Confirmation> {
            self.confirmations.lock().unwrap().clone()
        }
    }

    impl DialogPresenter for RecordingUi {
        fn present(&self, dialog: Dialog) {
            self.dialogs.lock().unwrap().push(dialog);
        }
    }

    #[async_trait]
    impl ConfirmationGate for RecordingUi {
        async fn confirm(&self, confirmation: Confirmation) -> bool {
            self.confirmations.lock().unwrap().push(confirmation);
            self.answers.lock().unwrap().pop_front().unwrap_or(false)
        }
    }

    impl Navigator for RecordingUi {
        fn navigate(&self, route: &str) {
            self.routes.lock().unwrap().push(route.to_string());
        }
    }
}
