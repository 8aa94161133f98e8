//! Create/edit/delete flow for a single transaction.
//!
//! ```text
//! Idle ──open_create/open_edit──▶ Composing ──submit──▶ Submitting
//!   ▲                                ▲                      │
//!   │                                └──submit_failed───────┤
//!   └───────────────submit_succeeded────────────────────────┘
//!
//! Idle ──request_delete──▶ ConfirmingDelete ──confirm_delete──▶ Deleting ──delete_finished──▶ Idle
//! ```
//!
//! The editor never touches the list of transactions. A successful mutation
//! only moves the machine back to `Idle`; the owner refetches.

use tracing::debug;

use crate::models::{NewTransaction, Transaction, TransactionId, TransactionUpdate};
use crate::validation::{FieldErrors, TransactionDraft};

/// Where the editor currently is.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Idle,
    /// The composer is open. `target` is the record being edited, `None`
    /// when creating.
    Composing {
        draft: TransactionDraft,
        target: Option<TransactionId>,
        errors: FieldErrors,
    },
    /// A create or update request is in flight.
    Submitting {
        draft: TransactionDraft,
        target: Option<TransactionId>,
    },
    /// Waiting for the user to confirm a delete.
    ConfirmingDelete { id: TransactionId, name: String },
    /// A delete request is in flight.
    Deleting { id: TransactionId },
}

impl EditorState {
    const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Composing { .. } => "composing",
            Self::Submitting { .. } => "submitting",
            Self::ConfirmingDelete { .. } => "confirming_delete",
            Self::Deleting { .. } => "deleting",
        }
    }
}

/// A validated request the owner must now send.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(NewTransaction),
    Update(TransactionId, TransactionUpdate),
}

/// Reasons an editor event was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("cannot {event} while {state}")]
    InvalidTransition {
        event: &'static str,
        state: &'static str,
    },
    #[error("draft failed validation: {0}")]
    Invalid(FieldErrors),
}

/// State machine driving the dashboard composer and delete dialog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionEditor {
    state: EditorState,
}

impl TransactionEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, EditorState::Idle)
    }

    /// `true` while a request issued by the editor is pending.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            EditorState::Submitting { .. } | EditorState::Deleting { .. }
        )
    }

    /// Current draft, if the composer is open.
    pub fn draft(&self) -> Option<&TransactionDraft> {
        match &self.state {
            EditorState::Composing { draft, .. } | EditorState::Submitting { draft, .. } => {
                Some(draft)
            }
            _ => None,
        }
    }

    /// Inline errors from the last rejected submit.
    pub fn errors(&self) -> Option<&FieldErrors> {
        match &self.state {
            EditorState::Composing { errors, .. } => Some(errors),
            _ => None,
        }
    }

    fn refuse(&self, event: &'static str) -> TransitionError {
        TransitionError::InvalidTransition {
            event,
            state: self.state.name(),
        }
    }

    fn enter(&mut self, next: EditorState) {
        debug!(from = self.state.name(), to = next.name(), "editor transition");
        self.state = next;
    }

    /// Opens an empty composer.
    pub fn open_create(&mut self) -> Result<(), TransitionError> {
        if !self.is_idle() {
            return Err(self.refuse("open_create"));
        }
        self.enter(EditorState::Composing {
            draft: TransactionDraft::default(),
            target: None,
            errors: FieldErrors::new(),
        });
        Ok(())
    }

    /// Opens the composer pre-populated from `transaction`.
    pub fn open_edit(&mut self, transaction: &Transaction) -> Result<(), TransitionError> {
        if !self.is_idle() {
            return Err(self.refuse("open_edit"));
        }
        self.enter(EditorState::Composing {
            draft: TransactionDraft::from(transaction),
            target: Some(transaction.id),
            errors: FieldErrors::new(),
        });
        Ok(())
    }

    /// Replaces the draft while composing. Errors from the previous submit
    /// stay visible until the next one.
    pub fn update_draft(&mut self, next: TransactionDraft) -> Result<(), TransitionError> {
        if let EditorState::Composing { draft, .. } = &mut self.state {
            *draft = next;
            return Ok(());
        }
        Err(self.refuse("update_draft"))
    }

    /// Validates the draft and, when it passes, moves to `Submitting` and
    /// hands back the request to send. A failing draft stays in
    /// `Composing` with its field errors recorded.
    pub fn submit(&mut self) -> Result<Submission, TransitionError> {
        let EditorState::Composing { draft, target, .. } = &self.state else {
            return Err(self.refuse("submit"));
        };
        let draft = draft.clone();
        let target = *target;

        match draft.validate() {
            Ok(input) => {
                let submission = match target {
                    Some(id) => Submission::Update(id, TransactionUpdate::from(input)),
                    None => Submission::Create(NewTransaction::from(input)),
                };
                self.enter(EditorState::Submitting { draft, target });
                Ok(submission)
            }
            Err(errors) => {
                self.state = EditorState::Composing {
                    draft,
                    target,
                    errors: errors.clone(),
                };
                Err(TransitionError::Invalid(errors))
            }
        }
    }

    /// The create/update request succeeded; the owner should refetch.
    pub fn submit_succeeded(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.state, EditorState::Submitting { .. }) {
            return Err(self.refuse("submit_succeeded"));
        }
        self.enter(EditorState::Idle);
        Ok(())
    }

    /// The create/update request failed; reopen the composer with the same
    /// draft.
    pub fn submit_failed(&mut self) -> Result<(), TransitionError> {
        let EditorState::Submitting { draft, target } = &self.state else {
            return Err(self.refuse("submit_failed"));
        };
        let next = EditorState::Composing {
            draft: draft.clone(),
            target: *target,
            errors: FieldErrors::new(),
        };
        self.enter(next);
        Ok(())
    }

    /// Asks for confirmation before deleting `transaction`.
    pub fn request_delete(&mut self, transaction: &Transaction) -> Result<(), TransitionError> {
        if !self.is_idle() {
            return Err(self.refuse("request_delete"));
        }
        self.enter(EditorState::ConfirmingDelete {
            id: transaction.id,
            name: transaction.name.clone(),
        });
        Ok(())
    }

    /// Confirms the pending delete and returns the id to delete.
    pub fn confirm_delete(&mut self) -> Result<TransactionId, TransitionError> {
        let EditorState::ConfirmingDelete { id, .. } = self.state else {
            return Err(self.refuse("confirm_delete"));
        };
        self.enter(EditorState::Deleting { id });
        Ok(id)
    }

    /// The delete request finished, successfully or not.
    pub fn delete_finished(&mut self) -> Result<(), TransitionError> {
        if !matches!(self.state, EditorState::Deleting { .. }) {
            return Err(self.refuse("delete_finished"));
        }
        self.enter(EditorState::Idle);
        Ok(())
    }

    /// Closes the composer or the delete dialog. In-flight requests cannot
    /// be cancelled from here.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        match self.state {
            EditorState::Composing { .. } | EditorState::ConfirmingDelete { .. } => {
                self.enter(EditorState::Idle);
                Ok(())
            }
            EditorState::Idle => Ok(()),
            _ => Err(self.refuse("cancel")),
        }
    }
}
