//! User-visible notifications.
//!
//! Business logic only calls [`Notifier::notify`]; how a notice is drawn and
//! when it goes away is up to the UI layer.

use std::fmt;

pub const TASK_CREATED: &str = "Task created successfully";
pub const TASK_CREATE_FAILED: &str = "Failed to create task";
pub const STATUS_UPDATED: &str = "Status updated";
pub const STATUS_UPDATE_FAILED: &str = "Status update failed";
pub const TASK_DELETED: &str = "Task deleted";
pub const TASK_DELETE_FAILED: &str = "Delete failed";
pub const FETCH_FAILED: &str = "Failed to fetch tasks";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoticeId(pub u64);

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notice-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_key(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub kind: NoticeKind,
    pub message: String,
}

/// Fire-and-forget side channel. The returned id lets a caller wait for that
/// particular notice to be dismissed.
pub trait Notifier {
    fn notify(&self, kind: NoticeKind, message: &str) -> NoticeId;
}

/// Notices currently on screen, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    notices: Vec<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// Returns false when the notice was already gone.
    pub fn dismiss(&mut self, id: NoticeId) -> bool {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.id != id);
        self.notices.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }
}
