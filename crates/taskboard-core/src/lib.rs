pub mod config;
pub mod error;
pub mod form;
pub mod gateway;
pub mod modal;
pub mod notify;
pub mod store;
pub mod sync;
pub mod task;
#[cfg(feature = "test-support")]
pub mod test_support;
pub mod validation;

pub use config::{ClientConfig, SyncPolicy};
pub use error::{ConfigError, NetworkError, ValidationError};
pub use gateway::TaskGateway;
pub use notify::{Notice, NoticeId, NoticeKind, Notifier};
pub use store::TaskStore;
pub use sync::TaskSync;
pub use task::{NewTask, Task, TaskDraft, TaskId};
