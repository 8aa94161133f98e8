use std::rc::Rc;

use shared::editor::{TransactionEditor, TransitionError};
use tracing::warn;
use yew::Reducible;

/// Events fed into the dashboard editor from callbacks and request
/// continuations.
///
/// Continuations run after other events may have landed, so they send an
/// action and let the reducer apply it to whatever the state is by then.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    /// Swap in an editor the caller already advanced synchronously.
    Replace(TransactionEditor),
    SubmitSucceeded,
    SubmitFailed,
    DeleteFinished,
    Cancel,
}

/// [`TransactionEditor`] wrapped for `use_reducer`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorModel {
    pub editor: TransactionEditor,
}

impl Reducible for EditorModel {
    type Action = EditorAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut editor = self.editor.clone();
        let outcome: Result<(), TransitionError> = match action {
            EditorAction::Replace(next) => {
                editor = next;
                Ok(())
            }
            EditorAction::SubmitSucceeded => editor.submit_succeeded(),
            EditorAction::SubmitFailed => editor.submit_failed(),
            EditorAction::DeleteFinished => editor.delete_finished(),
            EditorAction::Cancel => editor.cancel(),
        };

        match outcome {
            Ok(()) => Rc::new(Self { editor }),
            Err(err) => {
                warn!(error = %err, "ignoring editor event");
                self
            }
        }
    }
}
