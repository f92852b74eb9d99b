//! Paginated list screen: filter, page through, select and delete records.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::domain::Resource;
use crate::domain::types::RecordId;
use crate::pagination::{Page, Paginator};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ListQuery, ResourceReader, ResourceWriter};
use crate::services::Outcome;
use crate::services::dialogs::{success, translate};
use crate::ui::{Confirmation, Ui};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListState {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Row actions offered for the current selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionMenu {
    pub edit: bool,
    pub delete: bool,
}

/// Identifies one issued load; only the newest ticket's result is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    query: ListQuery,
}

impl LoadTicket {
    /// The request this ticket was issued for.
    pub fn query(&self) -> &ListQuery {
        &self.query
    }
}

pub struct ListController<T, R> {
    repo: Arc<R>,
    ui: Ui,
    records: Vec<T>,
    paginator: Paginator,
    filter: String,
    selected: BTreeSet<RecordId>,
    state: ListState,
    generation: u64,
}

impl<T, R> ListController<T, R>
where
    T: Resource,
    R: ResourceReader<T> + ResourceWriter<T>,
{
    /// An idle list; nothing is fetched until [`Self::mount`].
    pub fn new(repo: Arc<R>, ui: Ui, per_page: usize) -> Self {
        Self {
            repo,
            ui,
            records: vec![],
            paginator: Paginator::new(per_page),
            filter: String::new(),
            selected: BTreeSet::new(),
            state: ListState::Idle,
            generation: 0,
        }
    }

    /// Records of the current page.
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Page, page size and total reported by the last successful load.
    pub fn paginator(&self) -> &Paginator {
        &self.paginator
    }

    /// The filter applied to the current page, empty when unfiltered.
    pub fn filter_text(&self) -> &str {
        &self.filter
    }

    /// Where the list is in its load cycle.
    pub fn state(&self) -> ListState {
        self.state
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state == ListState::Loading
    }

    /// Initial load with the current paginator and no filter.
    pub async fn mount(&mut self) -> Outcome {
        self.filter.clear();
        self.load().await
    }

    /// Applies a filter text and returns to the first page.
    pub async fn filter(&mut self, text: &str) -> Outcome {
        self.filter = text.trim().to_string();
        self.paginator.go_to(1);
        self.load().await
    }

    /// Moves to `page`, keeping the filter.
    pub async fn change_page(&mut self, page: usize) -> Outcome {
        self.paginator.go_to(page);
        self.load().await
    }

    /// Changes the page size and returns to the first page.
    pub async fn change_page_size(&mut self, per_page: usize) -> Outcome {
        self.paginator.per_page = per_page.max(1);
        self.paginator.go_to(1);
        self.load().await
    }

    /// Loads `page` of the records matching `filter` in one request.
    pub async fn open_page(&mut self, filter: Option<&str>, page: usize) -> Outcome {
        self.filter = filter.map(str::trim).unwrap_or_default().to_string();
        self.paginator.go_to(page);
        self.load().await
    }

    /// Reloads the current page.
    pub async fn load(&mut self) -> Outcome {
        let ticket = self.begin_load();
        let result = self.repo.list(ticket.query()).await;
        self.finish_load(ticket, result)
    }

    /// Starts a load for the current page and filter, superseding any
    /// load still in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = ListState::Loading;

        LoadTicket {
            generation: self.generation,
            query: ListQuery::new()
                .paginate(self.paginator.current_page, self.paginator.per_page)
                .filter(self.filter.as_str()),
        }
    }

    /// Applies the result of the load `ticket` was issued for, unless a
    /// newer load has started since.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: RepositoryResult<Page<T>>,
    ) -> Outcome {
        if ticket.generation != self.generation {
            log::warn!(
                "Discarding stale {} page {} (load {} superseded by {})",
                T::PATH,
                ticket.query.pagination.page,
                ticket.generation,
                self.generation
            );
            return Outcome::Stale;
        }

        match result {
            Ok(page) => {
                self.records = page.records;
                self.paginator = page.paginator;
                self.state = ListState::Loaded;
                Outcome::Done
            }
            Err(err) => {
                log::error!("Failed to load {}: {err}", T::PATH);
                self.ui.dialogs.present(translate(&err));
                self.state = ListState::Failed;
                Outcome::Failed
            }
        }
    }

    /// Ids of the selected rows.
    pub fn selected(&self) -> &BTreeSet<RecordId> {
        &self.selected
    }

    /// Adds a row to the selection.
    pub fn select(&mut self, id: RecordId) {
        self.selected.insert(id);
    }

    /// Removes a row from the selection.
    pub fn deselect(&mut self, id: RecordId) {
        self.selected.remove(&id);
    }

    /// Selects the row if unselected, deselects it otherwise.
    pub fn toggle(&mut self, id: RecordId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Empties the selection.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Edit is offered for exactly one selected row, delete for any.
    pub fn action_menu(&self) -> ActionMenu {
        ActionMenu {
            edit: self.selected.len() == 1,
            delete: !self.selected.is_empty(),
        }
    }

    /// Deletes one record after confirmation. The list is updated in place
    /// without reloading.
    pub async fn delete_one(&mut self, id: RecordId) -> Outcome {
        if !self.ui.gate.confirm(Confirmation::Delete { count: 1 }).await {
            return Outcome::Cancelled;
        }

        match self.repo.delete(id).await {
            Ok(message) => {
                log::info!("Deleted {} {id}", T::PATH);
                self.records.retain(|record| record.id() != Some(id));
                self.paginator.decrement_total(1);
                self.selected.remove(&id);
                if let Some(message) = message {
                    self.ui.dialogs.present(success(&message));
                }
                Outcome::Done
            }
            Err(err) => {
                log::error!("Failed to delete {} {id}: {err}", T::PATH);
                self.ui.dialogs.present(translate(&err));
                Outcome::Failed
            }
        }
    }

    /// Deletes every selected record in one request after confirmation.
    pub async fn delete_selected(&mut self) -> Outcome {
        if self.selected.is_empty() {
            return Outcome::Cancelled;
        }

        let ids: Vec<RecordId> = self.selected.iter().copied().collect();
        let confirmation = Confirmation::Delete { count: ids.len() };
        if !self.ui.gate.confirm(confirmation).await {
            return Outcome::Cancelled;
        }

        match self.repo.delete_many(&ids).await {
            Ok(message) => {
                log::info!("Deleted {} {} records", ids.len(), T::PATH);
                self.records
                    .retain(|record| !record.id().is_some_and(|id| ids.contains(&id)));
                self.paginator.decrement_total(ids.len());
                self.selected.clear();
                if let Some(message) = message {
                    self.ui.dialogs.present(success(&message));
                }
                Outcome::Done
            }
            Err(err) => {
                log::error!("Failed to delete {} records: {err}", T::PATH);
                self.ui.dialogs.present(translate(&err));
                Outcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job_board::Course;
    use crate::dto::dialog::DialogKind;
    use crate::dto::envelope::ApiMessage;
    use crate::repository::errors::RepositoryError;
    use crate::repository::test::{Call, TestRepository};
    use crate::ui::testing::RecordingUi;

    fn id(value: i64) -> RecordId {
        RecordId::new(value).unwrap()
    }

    fn courses(count: i64) -> Vec<Course> {
        (1..=count)
            .map(|n| Course {
                id: Some(id(n)),
                name: format!("Course {n}"),
                description: if n % 2 == 0 { "rust".into() } else { "go".into() },
                ..Course::default()
            })
            .collect()
    }

    fn controller(
        count: i64,
        answers: &[bool],
    ) -> (
        ListController<Course, TestRepository<Course>>,
        Arc<TestRepository<Course>>,
        Arc<RecordingUi>,
    ) {
        let repo = Arc::new(TestRepository::new(courses(count)));
        let ui = RecordingUi::answering(answers);
        let list = ListController::new(repo.clone(), Ui::from_shared(ui.clone()), 10);
        (list, repo, ui)
    }

    #[tokio::test]
    async fn mount_loads_first_page() {
        let (mut list, repo, _) = controller(25, &[]);

        assert_eq!(list.state(), ListState::Idle);
        assert_eq!(list.mount().await, Outcome::Done);

        assert_eq!(list.state(), ListState::Loaded);
        assert_eq!(list.records().len(), 10);
        assert_eq!(list.paginator().total, 25);
        assert_eq!(
            repo.calls(),
            vec![Call::List(ListQuery::new().paginate(1, 10))]
        );
    }

    #[tokio::test]
    async fn change_page_requests_that_page() {
        let (mut list, repo, _) = controller(25, &[]);
        list.mount().await;

        list.change_page(3).await;

        assert_eq!(list.paginator().current_page, 3);
        assert_eq!(list.records().len(), 5);
        assert_eq!(
            repo.calls().last(),
            Some(&Call::List(ListQuery::new().paginate(3, 10)))
        );
    }

    #[tokio::test]
    async fn filter_returns_to_first_page() {
        let (mut list, repo, _) = controller(25, &[]);
        list.mount().await;
        list.change_page(2).await;

        list.filter(" rust ").await;

        assert_eq!(list.filter_text(), "rust");
        assert_eq!(list.paginator().current_page, 1);
        assert_eq!(list.paginator().total, 12);
        assert_eq!(
            repo.calls().last(),
            Some(&Call::List(ListQuery::new().paginate(1, 10).filter("rust")))
        );
    }

    #[tokio::test]
    async fn open_page_keeps_filter_and_requested_page() {
        let (mut list, repo, _) = controller(25, &[]);

        assert_eq!(list.open_page(Some(" rust "), 2).await, Outcome::Done);

        assert_eq!(list.filter_text(), "rust");
        assert_eq!(list.paginator().current_page, 2);
        assert_eq!(list.records().len(), 2);
        assert_eq!(
            repo.calls(),
            vec![Call::List(ListQuery::new().paginate(2, 10).filter("rust"))]
        );
    }

    #[tokio::test]
    async fn change_page_size_resets_page() {
        let (mut list, _, _) = controller(25, &[]);
        list.mount().await;
        list.change_page(2).await;

        list.change_page_size(20).await;

        assert_eq!(list.paginator().current_page, 1);
        assert_eq!(list.paginator().per_page, 20);
        assert_eq!(list.records().len(), 20);
    }

    #[tokio::test]
    async fn failed_load_keeps_stale_records() {
        let (mut list, repo, ui) = controller(25, &[]);
        list.mount().await;
        repo.fail_next(RepositoryError::Connection("refused".to_string()));

        assert_eq!(list.change_page(2).await, Outcome::Failed);

        assert_eq!(list.state(), ListState::Failed);
        assert!(!list.is_loading());
        assert_eq!(list.records().len(), 10);
        assert_eq!(list.records()[0].name, "Course 1");
        assert_eq!(ui.dialogs().len(), 1);
        assert_eq!(ui.dialogs()[0].kind, DialogKind::Error);
    }

    #[test]
    fn stale_result_is_ignored() {
        let (mut list, _, _) = controller(0, &[]);
        let first = list.begin_load();
        let second = list.begin_load();

        let stale = Page::new(courses(3), 1, 10, 3);
        assert_eq!(list.finish_load(first, Ok(stale)), Outcome::Stale);
        assert!(list.is_loading());
        assert!(list.records().is_empty());

        let fresh = Page::new(courses(1), 1, 10, 1);
        assert_eq!(list.finish_load(second, Ok(fresh)), Outcome::Done);
        assert_eq!(list.records().len(), 1);
    }

    #[tokio::test]
    async fn delete_one_removes_row_and_decrements_total() {
        let (mut list, repo, ui) = controller(25, &[true]);
        list.mount().await;
        list.select(id(2));

        assert_eq!(list.delete_one(id(2)).await, Outcome::Done);

        assert_eq!(list.records().len(), 9);
        assert!(list.records().iter().all(|c| c.id != Some(id(2))));
        assert_eq!(list.paginator().total, 24);
        assert!(list.selected().is_empty());
        assert_eq!(repo.calls().last(), Some(&Call::Delete(id(2))));
        assert_eq!(ui.confirmations(), vec![Confirmation::Delete { count: 1 }]);
        assert_eq!(ui.dialogs()[0].kind, DialogKind::Success);
    }

    #[tokio::test]
    async fn declined_delete_sends_nothing() {
        let (mut list, repo, _) = controller(25, &[false]);
        list.mount().await;
        let calls_before = repo.calls().len();

        assert_eq!(list.delete_one(id(1)).await, Outcome::Cancelled);

        assert_eq!(repo.calls().len(), calls_before);
        assert_eq!(list.records().len(), 10);
        assert_eq!(list.paginator().total, 25);
    }

    #[tokio::test]
    async fn failed_delete_keeps_row() {
        let (mut list, repo, ui) = controller(25, &[true]);
        list.mount().await;
        repo.fail_next(RepositoryError::NotFound(ApiMessage::new("Missing", "Gone")));

        assert_eq!(list.delete_one(id(1)).await, Outcome::Failed);

        assert_eq!(list.records().len(), 10);
        assert_eq!(list.paginator().total, 25);
        assert_eq!(ui.dialogs()[0].kind, DialogKind::Warning);
    }

    #[tokio::test]
    async fn delete_selected_removes_every_selected_row() {
        let (mut list, repo, _) = controller(25, &[true]);
        list.mount().await;
        list.select(id(1));
        list.select(id(3));
        list.select(id(4));

        assert_eq!(list.delete_selected().await, Outcome::Done);

        assert_eq!(list.records().len(), 7);
        assert_eq!(list.paginator().total, 22);
        assert!(list.selected().is_empty());
        assert_eq!(
            repo.calls().last(),
            Some(&Call::DeleteMany(vec![id(1), id(3), id(4)]))
        );
    }

    #[tokio::test]
    async fn empty_selection_does_not_prompt() {
        let (mut list, _, ui) = controller(5, &[true]);
        list.mount().await;

        assert_eq!(list.delete_selected().await, Outcome::Cancelled);
        assert!(ui.confirmations().is_empty());
    }

    #[test]
    fn action_menu_follows_selection() {
        let (mut list, _, _) = controller(0, &[]);
        assert_eq!(list.action_menu(), ActionMenu::default());

        list.toggle(id(1));
        assert_eq!(list.action_menu(), ActionMenu { edit: true, delete: true });

        list.select(id(2));
        assert_eq!(list.action_menu(), ActionMenu { edit: false, delete: true });

        list.toggle(id(1));
        list.deselect(id(2));
        assert!(list.selected().is_empty());

        list.select(id(5));
        list.clear_selection();
        assert_eq!(list.action_menu(), ActionMenu::default());
    }
}
