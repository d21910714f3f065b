//! In-memory stand-ins for the task API and the notification surface, used by
//! the unit and integration tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::NetworkError;
use crate::gateway::TaskGateway;
use crate::notify::{Notice, NoticeId, NoticeKind, Notifier};
use crate::task::{NewTask, Task, TaskId};

/// Installs a fmt subscriber honouring `RUST_LOG`. Safe to call from every
/// test.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    List,
    Create,
    UpdateStatus,
    Delete,
}

/// One call as the gateway received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    List,
    Create {
        title: String,
        description: Option<String>,
        status: bool,
    },
    UpdateStatus {
        id: TaskId,
        status: bool,
    },
    Delete {
        id: TaskId,
    },
}

impl Request {
    pub fn operation(&self) -> Operation {
        match self {
            Request::List => Operation::List,
            Request::Create { .. } => Operation::Create,
            Request::UpdateStatus { .. } => Operation::UpdateStatus,
            Request::Delete { .. } => Operation::Delete,
        }
    }
}

/// A list response captured when the call arrived and handed back only once
/// released.
#[derive(Debug)]
struct HeldList {
    tasks: Vec<Task>,
    released: bool,
    waker: Option<Waker>,
}

struct HeldListResponse(Rc<RefCell<HeldList>>);

impl Future for HeldListResponse {
    type Output = Vec<Task>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut held = self.0.borrow_mut();
        if held.released {
            Poll::Ready(held.tasks.clone())
        } else {
            held.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

#[derive(Debug, Default)]
struct ServerState {
    tasks: Vec<Task>,
    next_id: TaskId,
    failures: BTreeMap<Operation, NetworkError>,
    requests: Vec<Request>,
    hold_lists: bool,
    held: Vec<Rc<RefCell<HeldList>>>,
}

/// Behaves like the task API: assigns ids, keeps insertion order, answers 404
/// for unknown ids. Failures can be injected per operation, and list
/// responses can be held back to control the order they arrive in.
#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    state: Rc<RefCell<ServerState>>,
}

impl MemoryGateway {
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or_default();
        Self {
            state: Rc::new(RefCell::new(ServerState {
                tasks,
                next_id,
                ..ServerState::default()
            })),
        }
    }

    pub fn fail(&self, operation: Operation, err: NetworkError) {
        self.state.borrow_mut().failures.insert(operation, err);
    }

    /// While on, every list call snapshots the server's tasks and waits for
    /// [`MemoryGateway::release_list`] before answering.
    pub fn hold_lists(&self, hold: bool) {
        self.state.borrow_mut().hold_lists = hold;
    }

    /// Number of list calls held so far, in arrival order.
    pub fn held_lists(&self) -> usize {
        self.state.borrow().held.len()
    }

    /// Lets the `index`-th held list call answer.
    pub fn release_list(&self, index: usize) {
        let held = self.state.borrow().held.get(index).cloned();
        let Some(held) = held else {
            return;
        };
        let waker = {
            let mut held = held.borrow_mut();
            held.released = true;
            held.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.state.borrow().tasks.clone()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.state.borrow().requests.clone()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|request| request.operation() == operation)
            .count()
    }

    fn record(&self, request: Request) -> Result<(), NetworkError> {
        let mut state = self.state.borrow_mut();
        let operation = request.operation();
        debug!(?request, "memory gateway call");
        state.requests.push(request);
        match state.failures.get(&operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn not_found(id: TaskId) -> NetworkError {
        NetworkError::Status {
            status: 404,
            body: format!("task {id} not found"),
        }
    }
}

impl TaskGateway for MemoryGateway {
    async fn list_tasks(&self) -> Result<Vec<Task>, NetworkError> {
        self.record(Request::List)?;

        let held = {
            let mut state = self.state.borrow_mut();
            if !state.hold_lists {
                return Ok(state.tasks.clone());
            }
            let held = Rc::new(RefCell::new(HeldList {
                tasks: state.tasks.clone(),
                released: false,
                waker: None,
            }));
            state.held.push(Rc::clone(&held));
            held
        };
        Ok(HeldListResponse(held).await)
    }

    async fn create_task(&self, task: &NewTask) -> Result<(), NetworkError> {
        self.record(Request::Create {
            title: task.title().to_string(),
            description: task.description().map(str::to_string),
            status: task.status(),
        })?;

        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.tasks.push(Task {
            id,
            title: task.title().to_string(),
            description: task.description().map(str::to_string),
            status: task.status(),
        });
        Ok(())
    }

    async fn update_status(&self, id: TaskId, status: bool) -> Result<(), NetworkError> {
        self.record(Request::UpdateStatus { id, status })?;

        let mut state = self.state.borrow_mut();
        let task = state
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        task.status = status;
        Ok(())
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), NetworkError> {
        self.record(Request::Delete { id })?;

        let mut state = self.state.borrow_mut();
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id != id);
        if state.tasks.len() == before {
            return Err(Self::not_found(id));
        }
        Ok(())
    }
}

/// Keeps every notice it is given.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    next_id: Rc<Cell<u64>>,
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn messages(&self, kind: NoticeKind) -> Vec<String> {
        self.notices
            .borrow()
            .iter()
            .filter(|notice| notice.kind == kind)
            .map(|notice| notice.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, message: &str) -> NoticeId {
        let id = NoticeId(self.next_id.get().wrapping_add(1));
        self.next_id.set(id.0);
        self.notices.borrow_mut().push(Notice {
            id,
            kind,
            message: message.to_string(),
        });
        id
    }
}
