use tracing::{debug, info};

use crate::error::NetworkError;
use crate::task::{Task, TaskId};

/// Handed out by [`TaskStore::begin_refresh`]; proves which request a
/// response belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied { count: usize },
    /// A newer refresh was issued before this one came back.
    Stale,
    Failed(NetworkError),
}

/// Local edits made ahead of the server under the optimistic policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalPatch {
    SetStatus { id: TaskId, status: bool },
    Remove { id: TaskId },
}

/// What the list view should draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListState<'a> {
    Loading,
    Empty,
    Populated(&'a [Task]),
}

/// Client-side copy of the full task list. Replaced wholesale on every
/// applied refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
    loading: bool,
    generation: u64,
    revision: u64,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Bumped on every observable change; cheap to compare in view props.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn view(&self) -> ListState<'_> {
        if self.loading {
            ListState::Loading
        } else if self.tasks.is_empty() {
            ListState::Empty
        } else {
            ListState::Populated(&self.tasks)
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.generation = self.generation.wrapping_add(1);
        self.loading = true;
        self.touch();
        debug!(generation = self.generation, "refresh started");
        RefreshTicket {
            generation: self.generation,
        }
    }

    /// Settles a refresh. Only the latest issued ticket may replace the list
    /// or clear the loading flag; a failed read leaves the list untouched.
    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Task>, NetworkError>,
    ) -> RefreshOutcome {
        let latest = ticket.generation == self.generation;
        if latest {
            self.loading = false;
            self.touch();
        }

        match result {
            Ok(tasks) if latest => {
                let count = tasks.len();
                self.tasks = tasks;
                info!(generation = ticket.generation, count, "task list replaced");
                RefreshOutcome::Applied { count }
            }
            Ok(_) => {
                debug!(
                    generation = ticket.generation,
                    latest = self.generation,
                    "discarding stale refresh"
                );
                RefreshOutcome::Stale
            }
            Err(err) => RefreshOutcome::Failed(err),
        }
    }

    pub fn apply_local(&mut self, patch: LocalPatch) {
        match patch {
            LocalPatch::SetStatus { id, status } => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    task.status = status;
                }
            }
            LocalPatch::Remove { id } => {
                self.tasks.retain(|task| task.id != id);
            }
        }
        self.touch();
        debug!(?patch, "applied local patch");
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod store_tests {
    use super::*;

    fn task(id: TaskId, status: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            description: None,
            status,
        }
    }

    #[test]
    fn view_states_are_exclusive() {
        let mut store = TaskStore::new();
        assert_eq!(store.view(), ListState::Empty);

        let ticket = store.begin_refresh();
        assert_eq!(store.view(), ListState::Loading);

        store.finish_refresh(ticket, Ok(vec![task(1, false)]));
        assert!(matches!(
            store.view(),
            ListState::Populated(tasks) if tasks.len() == 1
        ));

        let ticket = store.begin_refresh();
        assert_eq!(store.view(), ListState::Loading);
        store.finish_refresh(ticket, Ok(vec![]));
        assert_eq!(store.view(), ListState::Empty);
    }

    #[test]
    fn failed_refresh_keeps_previous_list_and_clears_loading() {
        let mut store = TaskStore::new();
        let ticket = store.begin_refresh();
        store.finish_refresh(ticket, Ok(vec![task(1, true), task(2, false)]));

        let ticket = store.begin_refresh();
        let outcome = store.finish_refresh(
            ticket,
            Err(NetworkError::Connect("offline".to_string())),
        );

        assert!(matches!(outcome, RefreshOutcome::Failed(_)));
        assert!(!store.is_loading());
        assert_eq!(store.tasks().len(), 2);
    }

    #[test]
    fn stale_response_never_overwrites_newer_one() {
        let mut store = TaskStore::new();
        let first = store.begin_refresh();
        let second = store.begin_refresh();

        let outcome = store.finish_refresh(second, Ok(vec![task(1, false)]));
        assert_eq!(outcome, RefreshOutcome::Applied { count: 1 });

        let outcome = store.finish_refresh(first, Ok(vec![task(1, true), task(2, true)]));
        assert_eq!(outcome, RefreshOutcome::Stale);
        assert_eq!(store.tasks(), &[task(1, false)]);
        assert!(!store.is_loading());
    }

    #[test]
    fn older_ticket_settling_first_keeps_loading() {
        let mut store = TaskStore::new();
        let first = store.begin_refresh();
        let second = store.begin_refresh();

        store.finish_refresh(first, Ok(vec![]));
        assert!(store.is_loading());

        store.finish_refresh(second, Ok(vec![task(5, false)]));
        assert!(!store.is_loading());
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn local_patches_edit_the_copy() {
        let mut store = TaskStore::new();
        let ticket = store.begin_refresh();
        store.finish_refresh(ticket, Ok(vec![task(1, false), task(2, false)]));
        let before = store.revision();

        store.apply_local(LocalPatch::SetStatus { id: 1, status: true });
        store.apply_local(LocalPatch::Remove { id: 2 });

        assert_eq!(store.tasks(), &[task(1, true)]);
        assert!(store.revision() > before);
        assert!(store.find(2).is_none());
    }
}
