use gloo::net::http::{
  Request,
  Response
};
use taskboard_core::gateway::{
  Endpoints,
  check_status,
  decode_task_list
};
use taskboard_core::{
  NetworkError,
  NewTask,
  Task,
  TaskGateway,
  TaskId
};
use taskboard_shared::TaskStatusPatch;
use tracing::{
  debug,
  warn
};

/// Talks to the task API with `fetch`.
#[derive(Debug, Clone)]
pub struct HttpGateway {
  endpoints: Endpoints
}

impl HttpGateway {
  pub fn new(api_base: &str) -> Self {
    Self {
      endpoints: Endpoints::new(api_base)
    }
  }
}

impl TaskGateway for HttpGateway {
  async fn list_tasks(
    &self
  ) -> Result<Vec<Task>, NetworkError> {
    let url = self.endpoints.collection();
    debug!(url, "GET tasks");
    let response = Request::get(url)
      .send()
      .await
      .map_err(connect_error)?;
    let body = read_body(response).await?;
    decode_task_list(&body)
  }

  async fn create_task(
    &self,
    task: &NewTask
  ) -> Result<(), NetworkError> {
    let url = self.endpoints.collection();
    debug!(url, status = task.status(), "POST task");
    let request = Request::post(url)
      .json(&task.to_wire())
      .map_err(|err| {
        NetworkError::Encode(err.to_string())
      })?;
    let response = request
      .send()
      .await
      .map_err(connect_error)?;
    read_body(response).await.map(|_| ())
  }

  async fn update_status(
    &self,
    id: TaskId,
    status: bool
  ) -> Result<(), NetworkError> {
    let url = self.endpoints.item(id);
    debug!(url = %url, status, "PUT task status");
    let request = Request::put(&url)
      .json(&TaskStatusPatch { status })
      .map_err(|err| {
        NetworkError::Encode(err.to_string())
      })?;
    let response = request
      .send()
      .await
      .map_err(connect_error)?;
    read_body(response).await.map(|_| ())
  }

  async fn delete_task(
    &self,
    id: TaskId
  ) -> Result<(), NetworkError> {
    let url = self.endpoints.item(id);
    debug!(url = %url, "DELETE task");
    let response = Request::delete(&url)
      .send()
      .await
      .map_err(connect_error)?;
    read_body(response).await.map(|_| ())
  }
}

fn connect_error(
  err: gloo::net::Error
) -> NetworkError {
  warn!(error = %err, "fetch failed");
  NetworkError::Connect(err.to_string())
}

async fn read_body(
  response: Response
) -> Result<String, NetworkError> {
  let status = response.status();
  let body = match response.text().await {
    | Ok(body) => body,
    | Err(err) => {
      warn!(status, error = %err, "failed to read response body");
      String::new()
    }
  };
  check_status(status, body)
}
