use shared::validation::{
    DESCRIPTION_MAX_CHARS, Field, FieldErrors, NAME_MAX_CHARS, TransactionDraft,
};
use yew::prelude::*;

use crate::components::form_field::FormField;

/// Modal composer for creating or editing a transaction.
///
/// The draft lives with the caller; every keystroke comes back through
/// `on_change` with the full updated draft.
#[derive(Properties, PartialEq)]
pub struct TransactionFormProps {
    pub draft: TransactionDraft,
    pub on_change: Callback<TransactionDraft>,
    pub on_submit: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or_default]
    pub errors: FieldErrors,
    /// Editing an existing entry rather than adding one.
    #[prop_or_default]
    pub editing: bool,
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(TransactionForm)]
pub fn transaction_form(props: &TransactionFormProps) -> Html {
    let edit = |apply: fn(&mut TransactionDraft, String)| {
        let draft = props.draft.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |value: String| {
            let mut next = draft.clone();
            apply(&mut next, value);
            on_change.emit(next);
        })
    };

    let set_kind = |is_expense: bool| {
        let draft = props.draft.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_change.emit(TransactionDraft {
                is_expense,
                ..draft.clone()
            });
        })
    };

    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            on_submit.emit(());
        })
    };
    let on_cancel = {
        let on_cancel = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| on_cancel.emit(()))
    };

    let title = if props.editing { "Edit transaction" } else { "Add transaction" };
    let submit_label = match (props.busy, props.editing) {
        (true, _) => "Saving...",
        (false, true) => "Save changes",
        (false, false) => "Add",
    };

    html! {
        <div class="modal modal-open" role="dialog">
            <form class="modal-box flex flex-col gap-2" {onsubmit}>
                <h3 class="font-bold text-lg">{title}</h3>
                <div class="join w-full">
                    <button
                        type="button"
                        class={classes!("btn", "join-item", "flex-1", props.draft.is_expense.then_some("btn-error"))}
                        onclick={set_kind(true)}
                        disabled={props.busy}
                    >
                        {"Expense"}
                    </button>
                    <button
                        type="button"
                        class={classes!("btn", "join-item", "flex-1", (!props.draft.is_expense).then_some("btn-success"))}
                        onclick={set_kind(false)}
                        disabled={props.busy}
                    >
                        {"Income"}
                    </button>
                </div>
                <FormField
                    id="transaction-name"
                    label="Name"
                    value={props.draft.name.clone()}
                    placeholder={AttrValue::from(format!("Up to {NAME_MAX_CHARS} characters"))}
                    error={props.errors.message(Field::Name)}
                    disabled={props.busy}
                    on_input={edit(|draft, value| draft.name = value)}
                />
                <FormField
                    id="transaction-amount"
                    label="Amount"
                    input_type="number"
                    value={props.draft.amount.clone()}
                    placeholder="0.00"
                    error={props.errors.message(Field::Amount)}
                    disabled={props.busy}
                    on_input={edit(|draft, value| draft.amount = value)}
                />
                <FormField
                    id="transaction-description"
                    label="Description"
                    multiline=true
                    value={props.draft.description.clone()}
                    placeholder={AttrValue::from(format!("Optional, up to {DESCRIPTION_MAX_CHARS} characters"))}
                    error={props.errors.message(Field::Description)}
                    disabled={props.busy}
                    on_input={edit(|draft, value| draft.description = value)}
                />
                <div class="modal-action">
                    <button type="button" class="btn" onclick={on_cancel} disabled={props.busy}>
                        {"Cancel"}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={props.busy}>
                        {submit_label}
                    </button>
                </div>
            </form>
        </div>
    }
}
