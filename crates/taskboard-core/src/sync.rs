//! Keeps the local task list in step with the server.
//!
//! Every mutation goes to the server first and is followed by a full
//! refresh. Under [`SyncPolicy::Optimistic`] toggle and delete also patch the
//! local copy before the request, and a failed request triggers a refresh so
//! the patch is rolled back by the server's answer.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info, warn};

use crate::config::{ClientConfig, SyncPolicy};
use crate::error::NetworkError;
use crate::form::{CreationForm, SubmitRejected, SubmitResolution};
use crate::gateway::TaskGateway;
use crate::notify::{self, NoticeId, NoticeKind, Notifier};
use crate::store::{LocalPatch, RefreshOutcome, TaskStore};
use crate::task::{TaskDraft, TaskId};

/// Shared handle over the store, the gateway and the notifier. Clones point
/// at the same store.
pub struct TaskSync<G, N> {
    store: Rc<RefCell<TaskStore>>,
    gateway: Rc<G>,
    notifier: Rc<N>,
    policy: SyncPolicy,
    default_status: bool,
    on_change: Option<Rc<dyn Fn()>>,
}

impl<G, N> Clone for TaskSync<G, N> {
    fn clone(&self) -> Self {
        Self {
            store: Rc::clone(&self.store),
            gateway: Rc::clone(&self.gateway),
            notifier: Rc::clone(&self.notifier),
            policy: self.policy,
            default_status: self.default_status,
            on_change: self.on_change.clone(),
        }
    }
}

impl<G, N> PartialEq for TaskSync<G, N> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.store, &other.store)
    }
}

impl<G, N> TaskSync<G, N>
where
    G: TaskGateway,
    N: Notifier,
{
    pub fn new(gateway: G, notifier: N, config: &ClientConfig) -> Self {
        info!(
            policy = %config.sync_policy,
            default_status = config.default_status_on_create,
            "task sync initialized"
        );
        Self {
            store: Rc::new(RefCell::new(TaskStore::new())),
            gateway: Rc::new(gateway),
            notifier: Rc::new(notifier),
            policy: config.sync_policy,
            default_status: config.default_status_on_create,
            on_change: None,
        }
    }

    /// Runs after every store change, typically to schedule a redraw.
    pub fn with_on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn with_store<R>(&self, read: impl FnOnce(&TaskStore) -> R) -> R {
        read(&self.store.borrow())
    }

    pub fn revision(&self) -> u64 {
        self.store.borrow().revision()
    }

    fn changed(&self) {
        if let Some(on_change) = &self.on_change {
            on_change();
        }
    }

    /// Re-reads the whole list. Failures surface as a notification and leave
    /// the current list in place.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.store.borrow_mut().begin_refresh();
        self.changed();

        let result = self.gateway.list_tasks().await;

        let outcome = self.store.borrow_mut().finish_refresh(ticket, result);
        self.changed();

        if let RefreshOutcome::Failed(err) = &outcome {
            error!(error = %err, "failed to fetch tasks");
            self.notifier.notify(NoticeKind::Error, notify::FETCH_FAILED);
        }
        outcome
    }

    /// Flips `current` on the server, then refreshes.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_status(&self, id: TaskId, current: bool) -> Result<(), NetworkError> {
        let next = !current;
        self.patch_ahead(LocalPatch::SetStatus { id, status: next });

        match self.gateway.update_status(id, next).await {
            Ok(()) => {
                info!(id, status = next, "status updated");
                self.notifier.notify(NoticeKind::Success, notify::STATUS_UPDATED);
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                warn!(id, error = %err, "status update failed");
                self.notifier.notify(NoticeKind::Error, notify::STATUS_UPDATE_FAILED);
                self.reconcile_after_failure().await;
                Err(err)
            }
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: TaskId) -> Result<(), NetworkError> {
        self.patch_ahead(LocalPatch::Remove { id });

        match self.gateway.delete_task(id).await {
            Ok(()) => {
                info!(id, "task deleted");
                self.notifier.notify(NoticeKind::Success, notify::TASK_DELETED);
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                warn!(id, error = %err, "delete failed");
                self.notifier.notify(NoticeKind::Error, notify::TASK_DELETE_FAILED);
                self.reconcile_after_failure().await;
                Err(err)
            }
        }
    }

    /// Posts a validated draft with the configured default status. Does not
    /// refresh: the form's success callback owns that.
    #[tracing::instrument(skip(self, draft), fields(title_len = draft.title().len()))]
    pub async fn create_task(&self, draft: TaskDraft) -> Result<NoticeId, NetworkError> {
        let new_task = draft.with_status(self.default_status);

        match self.gateway.create_task(&new_task).await {
            Ok(()) => {
                info!(status = new_task.status(), "task created");
                Ok(self.notifier.notify(NoticeKind::Success, notify::TASK_CREATED))
            }
            Err(err) => {
                warn!(error = %err, "task create failed");
                self.notifier.notify(NoticeKind::Error, notify::TASK_CREATE_FAILED);
                Err(err)
            }
        }
    }

    /// Drives one submission of `form`: validate and lock, post, then settle.
    /// `locked` runs once the inputs are disabled, before the request goes
    /// out. `on_created` runs once, only after a successful create, and is
    /// where the host schedules its refresh. Validation failures never reach
    /// the gateway.
    pub async fn submit_form(
        &self,
        form: &RefCell<CreationForm>,
        locked: impl FnOnce(),
        on_created: impl FnOnce(),
    ) -> Result<SubmitResolution, SubmitRejected> {
        let draft = form.borrow_mut().begin_submit()?;
        locked();

        let result = self.create_task(draft).await;

        let resolution = form.borrow_mut().finish_submit(result);
        if let SubmitResolution::Created(_) = resolution {
            on_created();
        }
        Ok(resolution)
    }

    fn patch_ahead(&self, patch: LocalPatch) {
        if self.policy == SyncPolicy::Optimistic {
            self.store.borrow_mut().apply_local(patch);
            self.changed();
        }
    }

    async fn reconcile_after_failure(&self) {
        if self.policy == SyncPolicy::Optimistic {
            self.refresh().await;
        }
    }
}
