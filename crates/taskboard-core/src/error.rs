use std::collections::BTreeMap;

use thiserror::Error;

/// Anything that went wrong between the client and the task API. Callers
/// treat every variant the same way; the split only matters for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Connect(String),
    #[error("failed to encode request body: {0}")]
    Encode(String),
    #[error("server responded with status {status}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Field name -> message for every field that failed local validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", summarize(.fields))]
pub struct ValidationError {
    fields: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

fn summarize(fields: &BTreeMap<String, String>) -> String {
    fields
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown config key {0:?}")]
    UnknownKey(String),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_field() {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), "Title is required".to_string());
        fields.insert("description".to_string(), "too long".to_string());

        let err = ValidationError::from_fields(fields);

        assert_eq!(
            err.to_string(),
            "description: too long; title: Title is required"
        );
        assert_eq!(err.message_for("title"), Some("Title is required"));
    }

    #[test]
    fn status_error_reports_code() {
        let err = NetworkError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.to_string(), "server responded with status 503");
    }
}
