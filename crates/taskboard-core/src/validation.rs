use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ValidationError;
use crate::task::TaskDraft;

pub const TITLE_FIELD: &str = "title";
pub const DESCRIPTION_FIELD: &str = "description";

pub const TITLE_REQUIRED: &str = "Title is required";

/// Checks the raw form fields and returns one message per failing field.
/// An empty map means the input is acceptable.
pub fn validate_fields(title: &str, _description: &str) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if title.trim().is_empty() {
        errors.insert(TITLE_FIELD.to_string(), TITLE_REQUIRED.to_string());
    }

    errors
}

/// Both fields are trimmed; a blank description is sent as absent.
pub fn validate_draft(title: &str, description: &str) -> Result<TaskDraft, ValidationError> {
    let errors = validate_fields(title, description);
    if !errors.is_empty() {
        debug!(failed_fields = errors.len(), "task draft rejected");
        return Err(ValidationError::from_fields(errors));
    }

    let description = description.trim();
    Ok(TaskDraft {
        title: title.trim().to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_is_required() {
        for title in ["", "   ", "\t\n"] {
            let err = validate_draft(title, "details").expect_err("blank title");
            assert_eq!(err.message_for(TITLE_FIELD), Some(TITLE_REQUIRED));
        }
    }

    #[test]
    fn draft_trims_and_drops_empty_description() {
        let draft = validate_draft("  Buy milk ", "  ").expect("valid draft");
        assert_eq!(draft.title(), "Buy milk");
        assert_eq!(draft.description(), None);

        let draft = validate_draft("Buy milk", " two litres ").expect("valid draft");
        assert_eq!(draft.description(), Some("two litres"));
    }

    #[test]
    fn description_alone_never_fails() {
        assert!(validate_fields("title", "").is_empty());
    }
}
