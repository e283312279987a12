//! Measurement Editing Workflow
//!
//! Which modal the measurements page shows. Failures never leave a modal;
//! the store has already told the user what went wrong.

use crate::domain::Measurement;
use crate::form::MeasurementForm;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditorState {
    /// List and search
    #[default]
    Viewing,
    Creating(MeasurementForm),
    Editing(MeasurementForm),
    ConfirmingDelete { id: String, label: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// "New measurement", optionally for a preselected client
    StartCreate { client_id: Option<String> },
    StartEdit(Measurement),
    RequestDelete { id: String, label: String },
    Cancel,
    /// Create or update succeeded
    Saved,
    Deleted,
    /// The store rejected the request
    Failed,
}

impl EditorState {
    /// Next state; events that do not apply leave the state as it is
    pub fn apply(self, event: EditorEvent) -> Self {
        match (self, event) {
            (EditorState::Viewing, EditorEvent::StartCreate { client_id }) => {
                EditorState::Creating(MeasurementForm::create(client_id))
            }
            (EditorState::Viewing, EditorEvent::StartEdit(record)) => {
                EditorState::Editing(MeasurementForm::edit(&record))
            }
            (EditorState::Viewing, EditorEvent::RequestDelete { id, label }) => {
                EditorState::ConfirmingDelete { id, label }
            }
            (EditorState::Creating(_) | EditorState::Editing(_), EditorEvent::Cancel | EditorEvent::Saved) => {
                EditorState::Viewing
            }
            (EditorState::ConfirmingDelete { .. }, EditorEvent::Cancel | EditorEvent::Deleted) => {
                EditorState::Viewing
            }
            (state, _) => state,
        }
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self, EditorState::Viewing)
    }

    /// The open form, in either mode
    pub fn form(&self) -> Option<&MeasurementForm> {
        match self {
            EditorState::Creating(form) | EditorState::Editing(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut MeasurementForm> {
        match self {
            EditorState::Creating(form) | EditorState::Editing(form) => Some(form),
            _ => None,
        }
    }
}
