use serde::{
  Deserialize,
  Serialize
};

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskDto {
  pub id:          u64,
  #[serde(default)]
  pub title:       String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub status:      bool
}

/// Body of `GET /api/tasks`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskListEnvelope {
  pub data: Vec<TaskDto>
}

/// Body of `POST /api/tasks`.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskCreate {
  pub title:       String,
  #[serde(
    default,
    skip_serializing_if = "Option::is_none"
  )]
  pub description: Option<String>,
  pub status:      bool
}

/// Body of `PUT /api/tasks/{id}`. Only
/// the changed field goes over the wire.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct TaskStatusPatch {
  pub status: bool
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn envelope_accepts_missing_and_null_description()
  {
    let raw = json!({
      "data": [
        { "id": 1, "title": "Buy milk", "description": null, "status": false },
        { "id": 2, "title": "Walk dog", "status": true }
      ]
    });

    let envelope: TaskListEnvelope =
      serde_json::from_value(raw)
        .expect("decode envelope");

    assert_eq!(envelope.data.len(), 2);
    assert_eq!(
      envelope.data[0].description,
      None
    );
    assert_eq!(
      envelope.data[1].description,
      None
    );
    assert!(envelope.data[1].status);
  }

  #[test]
  fn create_body_omits_absent_description()
  {
    let body = TaskCreate {
      title:       "Buy milk".to_string(),
      description: None,
      status:      true
    };

    let value = serde_json::to_value(&body)
      .expect("encode create body");

    assert_eq!(
      value,
      json!({ "title": "Buy milk", "status": true })
    );
  }

  #[test]
  fn status_patch_only_carries_status() {
    let value = serde_json::to_value(
      TaskStatusPatch { status: false }
    )
    .expect("encode patch");

    assert_eq!(
      value,
      json!({ "status": false })
    );
  }

  #[test]
  fn envelope_without_data_is_rejected() {
    let result = serde_json::from_value::<
      TaskListEnvelope
    >(json!({ "items": [] }));
    assert!(result.is_err());
  }
}
