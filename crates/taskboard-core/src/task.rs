use taskboard_shared::{TaskCreate, TaskDto};

pub type TaskId = u64;

/// One to-do item as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: bool,
}

impl Task {
    pub fn is_done(&self) -> bool {
        self.status
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn status_marker(&self) -> &'static str {
        if self.status { "✅" } else { "❌" }
    }
}

impl From<TaskDto> for Task {
    fn from(dto: TaskDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            description: dto.description,
            status: dto.status,
        }
    }
}

impl From<&Task> for TaskDto {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
        }
    }
}

/// Creation input that already passed local validation. Only
/// [`crate::validation::validate_draft`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub(crate) title: String,
    pub(crate) description: Option<String>,
}

impl TaskDraft {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn with_status(self, status: bool) -> NewTask {
        NewTask {
            title: self.title,
            description: self.description,
            status,
        }
    }
}

/// A validated draft plus the initial status; what the gateway posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: Option<String>,
    status: bool,
}

impl NewTask {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn status(&self) -> bool {
        self.status
    }

    pub fn to_wire(&self) -> TaskCreate {
        TaskCreate {
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }
}
