use taskboard_shared::TaskListEnvelope;
use tracing::{debug, warn};

use crate::error::NetworkError;
use crate::task::{NewTask, Task, TaskId};

/// The four calls the UI makes against the task API. Each is one round trip.
///
/// Futures are not required to be `Send`: the browser runs everything on one
/// thread.
#[allow(async_fn_in_trait)]
pub trait TaskGateway {
    /// Tasks in server order.
    async fn list_tasks(&self) -> Result<Vec<Task>, NetworkError>;

    /// The response body is ignored; callers refresh instead.
    async fn create_task(&self, task: &NewTask) -> Result<(), NetworkError>;

    async fn update_status(&self, id: TaskId, status: bool) -> Result<(), NetworkError>;

    async fn delete_task(&self, id: TaskId) -> Result<(), NetworkError>;
}

/// URL layout of the task API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.base
    }

    pub fn item(&self, id: TaskId) -> String {
        format!("{}/{id}", self.base)
    }
}

/// Turns a non-2xx status into [`NetworkError::Status`], passing the body
/// through otherwise.
pub fn check_status(status: u16, body: String) -> Result<String, NetworkError> {
    if (200..300).contains(&status) {
        return Ok(body);
    }

    warn!(status, body_len = body.len(), "task API returned error status");
    Err(NetworkError::Status { status, body })
}

pub fn decode_task_list(body: &str) -> Result<Vec<Task>, NetworkError> {
    let envelope: TaskListEnvelope =
        serde_json::from_str(body).map_err(|err| NetworkError::Decode(err.to_string()))?;

    debug!(count = envelope.data.len(), "decoded task list");
    Ok(envelope.data.into_iter().map(Task::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_ids_without_double_slash() {
        let endpoints = Endpoints::new("/api/tasks/");
        assert_eq!(endpoints.collection(), "/api/tasks");
        assert_eq!(endpoints.item(42), "/api/tasks/42");

        let absolute = Endpoints::new("http://localhost:8080/api/tasks");
        assert_eq!(absolute.item(7), "http://localhost:8080/api/tasks/7");
    }

    #[test]
    fn non_success_status_becomes_error() {
        assert_eq!(check_status(204, String::new()), Ok(String::new()));

        let err = check_status(404, "missing".to_string()).expect_err("404 is an error");
        assert_eq!(
            err,
            NetworkError::Status {
                status: 404,
                body: "missing".to_string(),
            }
        );
    }

    #[test]
    fn decode_keeps_server_order() {
        let body = r#"{"data":[
            {"id":9,"title":"b","description":"","status":true},
            {"id":3,"title":"a","description":null,"status":false}
        ]}"#;

        let tasks = decode_task_list(body).expect("decode list");
        let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![9, 3]);
        assert_eq!(tasks[0].description.as_deref(), Some(""));
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = decode_task_list("<html>").expect_err("not json");
        assert!(matches!(err, NetworkError::Decode(_)));
    }
}
