use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{NetworkError, ValidationError};
use crate::notify::NoticeId;
use crate::task::TaskDraft;
use crate::validation::{DESCRIPTION_FIELD, TITLE_FIELD, validate_draft};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    /// Request in flight; inputs locked.
    Submitting,
    /// Created; the hosting modal closes once this notice is dismissed.
    AwaitingAck(NoticeId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    Busy,
    Invalid(ValidationError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResolution {
    Created(NoticeId),
    Failed,
}

/// State of the "new task" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationForm {
    title: String,
    description: String,
    errors: BTreeMap<String, String>,
    phase: FormPhase,
}

impl Default for CreationForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            errors: BTreeMap::new(),
            phase: FormPhase::Editing,
        }
    }
}

impl CreationForm {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn inputs_disabled(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn set_title(&mut self, value: String) {
        self.title = value;
        self.errors.remove(TITLE_FIELD);
    }

    pub fn set_description(&mut self, value: String) {
        self.description = value;
        self.errors.remove(DESCRIPTION_FIELD);
    }

    /// Validates and locks the form. No request may be made unless this
    /// returns `Ok`.
    pub fn begin_submit(&mut self) -> Result<TaskDraft, SubmitRejected> {
        if self.phase == FormPhase::Submitting {
            debug!("ignored duplicate submit while busy");
            return Err(SubmitRejected::Busy);
        }

        match validate_draft(&self.title, &self.description) {
            Ok(draft) => {
                self.errors.clear();
                self.phase = FormPhase::Submitting;
                Ok(draft)
            }
            Err(err) => {
                self.errors = err.fields().clone();
                Err(SubmitRejected::Invalid(err))
            }
        }
    }

    /// Success resets the fields; failure unlocks the form with the entered
    /// values intact.
    pub fn finish_submit(&mut self, result: Result<NoticeId, NetworkError>) -> SubmitResolution {
        match result {
            Ok(notice) => {
                self.title.clear();
                self.description.clear();
                self.errors.clear();
                self.phase = FormPhase::AwaitingAck(notice);
                SubmitResolution::Created(notice)
            }
            Err(err) => {
                debug!(error = %err, "create failed, form unlocked");
                self.phase = FormPhase::Editing;
                SubmitResolution::Failed
            }
        }
    }

    /// Called for every dismissed notice. Returns true when it was the one
    /// this form was waiting on, meaning the modal should close now.
    pub fn acknowledge(&mut self, notice: NoticeId) -> bool {
        if self.phase == FormPhase::AwaitingAck(notice) {
            self.phase = FormPhase::Editing;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::TITLE_REQUIRED;

    #[test]
    fn empty_title_blocks_submit_with_inline_message() {
        let mut form = CreationForm::default();
        form.set_description("no title".to_string());

        let rejected = form.begin_submit().expect_err("blank title");

        assert!(matches!(rejected, SubmitRejected::Invalid(_)));
        assert_eq!(form.error_for(TITLE_FIELD), Some(TITLE_REQUIRED));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(!form.inputs_disabled());

        form.set_title("x".to_string());
        assert_eq!(form.error_for(TITLE_FIELD), None);
    }

    #[test]
    fn inputs_lock_while_in_flight_and_duplicates_are_ignored() {
        let mut form = CreationForm::default();
        form.set_title("Buy milk".to_string());

        form.begin_submit().expect("valid");
        assert!(form.inputs_disabled());
        assert_eq!(form.begin_submit(), Err(SubmitRejected::Busy));
    }

    #[test]
    fn network_failure_keeps_values_and_unlocks() {
        let mut form = CreationForm::default();
        form.set_title("Buy milk".to_string());
        form.set_description("2l".to_string());
        form.begin_submit().expect("valid");

        let resolution = form.finish_submit(Err(NetworkError::Status {
            status: 500,
            body: String::new(),
        }));

        assert_eq!(resolution, SubmitResolution::Failed);
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.title(), "Buy milk");
        assert_eq!(form.description(), "2l");
        assert_eq!(form.error_for(TITLE_FIELD), None);

        form.begin_submit().expect("retry is allowed");
        assert!(form.inputs_disabled());
    }

    #[test]
    fn success_resets_then_waits_for_its_notice() {
        let mut form = CreationForm::default();
        form.set_title("Buy milk".to_string());
        form.begin_submit().expect("valid");

        let resolution = form.finish_submit(Ok(NoticeId(7)));

        assert_eq!(resolution, SubmitResolution::Created(NoticeId(7)));
        assert_eq!(form.title(), "");
        assert!(!form.inputs_disabled());

        assert!(!form.acknowledge(NoticeId(6)));
        assert!(form.acknowledge(NoticeId(7)));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(!form.acknowledge(NoticeId(7)));
    }
}
