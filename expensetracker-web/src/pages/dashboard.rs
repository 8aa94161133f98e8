use shared::aggregate::{Aggregates, format_currency};
use shared::editor::{EditorState, TransactionEditor, TransitionError};
use shared::models::Transaction;
use shared::validation::TransactionDraft;
use tracing::{debug, error, info, warn};
use yew::prelude::*;
use yewdux::prelude::use_selector;

use crate::api::{ApiError, ExpenseClient};
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::loading::Loading;
use crate::components::stat_card::StatCard;
use crate::components::transaction_form::TransactionForm;
use crate::components::transaction_list::TransactionList;
use crate::models::app_state::SessionState;
use crate::models::editor_model::{EditorAction, EditorModel};
use crate::scope::RequestScope;

/// Applies a synchronous editor event to the current state.
fn advance(
    editor: &UseReducerHandle<EditorModel>,
    step: impl FnOnce(&mut TransactionEditor) -> Result<(), TransitionError>,
) {
    let mut next = editor.editor.clone();
    match step(&mut next) {
        Ok(()) => editor.dispatch(EditorAction::Replace(next)),
        Err(err) => warn!(error = %err, "ignoring editor event"),
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let client = use_context::<ExpenseClient>();
    let username = use_selector(|state: &SessionState| state.username.clone());
    let transactions = use_state(Vec::<Transaction>::new);
    let loading = use_state(|| true);
    let editor = use_reducer(EditorModel::default);
    let scope = use_memo((), |_| RequestScope::new());

    {
        let scope = scope.clone();
        use_effect_with((), move |_| move || scope.cancel());
    }

    let refetch = {
        let client = client.clone();
        let transactions = transactions.clone();
        let loading = loading.clone();
        let scope = scope.clone();
        Callback::from(move |()| {
            let Some(client) = client.clone() else {
                return;
            };
            let transactions = transactions.clone();
            let loading = loading.clone();
            scope.spawn(move |scope| async move {
                match scope.run(client.list_transactions()).await {
                    Ok(list) => {
                        debug!(count = list.len(), "transactions loaded");
                        transactions.set(list);
                    }
                    Err(ApiError::Cancelled) => return,
                    Err(err) => error!(error = %err, "failed to load transactions"),
                }
                loading.set(false);
            });
        })
    };

    {
        let refetch = refetch.clone();
        use_effect_with((), move |_| {
            refetch.emit(());
            || ()
        });
    }

    let Some(client) = client else {
        error!("dashboard rendered without an API client");
        return html! {};
    };

    let on_add = {
        let editor = editor.clone();
        Callback::from(move |_: MouseEvent| advance(&editor, TransactionEditor::open_create))
    };
    let on_edit = {
        let editor = editor.clone();
        Callback::from(move |transaction: Transaction| {
            advance(&editor, |next| next.open_edit(&transaction));
        })
    };
    let on_delete = {
        let editor = editor.clone();
        Callback::from(move |transaction: Transaction| {
            advance(&editor, |next| next.request_delete(&transaction));
        })
    };
    let on_change = {
        let editor = editor.clone();
        Callback::from(move |draft: TransactionDraft| {
            advance(&editor, |next| next.update_draft(draft));
        })
    };
    let on_cancel = {
        let editor = editor.clone();
        Callback::from(move |()| editor.dispatch(EditorAction::Cancel))
    };

    let on_submit = {
        let client = client.clone();
        let editor = editor.clone();
        let refetch = refetch.clone();
        let scope = scope.clone();
        Callback::from(move |()| {
            let mut next = editor.editor.clone();
            let submission = match next.submit() {
                Ok(submission) => submission,
                Err(TransitionError::Invalid(errors)) => {
                    debug!(%errors, "transaction draft rejected");
                    editor.dispatch(EditorAction::Replace(next));
                    return;
                }
                Err(err) => {
                    warn!(error = %err, "ignoring submit");
                    return;
                }
            };
            editor.dispatch(EditorAction::Replace(next));

            let client = client.clone();
            let editor = editor.clone();
            let refetch = refetch.clone();
            scope.spawn(move |scope| async move {
                match scope.run(client.submit(&submission)).await {
                    Ok(()) => {
                        info!("transaction saved");
                        editor.dispatch(EditorAction::SubmitSucceeded);
                        refetch.emit(());
                    }
                    Err(ApiError::Cancelled) => debug!("save abandoned"),
                    Err(err) => {
                        error!(error = %err, "failed to save transaction");
                        editor.dispatch(EditorAction::SubmitFailed);
                    }
                }
            });
        })
    };

    let on_confirm_delete = {
        let editor = editor.clone();
        let refetch = refetch.clone();
        let scope = scope.clone();
        Callback::from(move |()| {
            let mut next = editor.editor.clone();
            let id = match next.confirm_delete() {
                Ok(id) => id,
                Err(err) => {
                    warn!(error = %err, "ignoring delete confirmation");
                    return;
                }
            };
            editor.dispatch(EditorAction::Replace(next));

            let client = client.clone();
            let editor = editor.clone();
            let refetch = refetch.clone();
            scope.spawn(move |scope| async move {
                let result = scope.run(client.delete_transaction(id)).await;
                if matches!(result, Err(ApiError::Cancelled)) {
                    debug!(id, "delete abandoned");
                    return;
                }
                editor.dispatch(EditorAction::DeleteFinished);
                match result {
                    Ok(()) => {
                        info!(id, "transaction deleted");
                        refetch.emit(());
                    }
                    Err(err) => error!(error = %err, id, "failed to delete transaction"),
                }
            });
        })
    };

    let aggregates = Aggregates::from_transactions(&transactions);
    let busy = !editor.editor.is_idle();
    let greeting = (*username)
        .clone()
        .map_or_else(|| "Welcome back".to_string(), |name| format!("Welcome back, {name}"));

    let dialog = match editor.editor.state() {
        EditorState::Idle => html! {},
        EditorState::Composing {
            draft,
            target,
            errors,
        } => html! {
            <TransactionForm
                draft={draft.clone()}
                errors={errors.clone()}
                editing={target.is_some()}
                on_change={on_change}
                on_submit={on_submit}
                on_cancel={on_cancel}
            />
        },
        EditorState::Submitting { draft, target } => html! {
            <TransactionForm
                draft={draft.clone()}
                editing={target.is_some()}
                busy=true
                on_change={on_change}
                on_submit={on_submit}
                on_cancel={on_cancel}
            />
        },
        EditorState::ConfirmingDelete { name, .. } => html! {
            <ConfirmDialog
                title="Delete transaction"
                message={format!("Delete \"{name}\"? This cannot be undone.")}
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel}
            />
        },
        EditorState::Deleting { .. } => html! {
            <ConfirmDialog
                title="Delete transaction"
                message={"Deleting...".to_string()}
                busy=true
                on_confirm={on_confirm_delete}
                on_cancel={on_cancel}
            />
        },
    };

    html! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-center justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold">{greeting}</h1>
                    <p class="text-base-content/60">{"Here is where your money stands."}</p>
                </div>
                <button class="btn btn-primary" onclick={on_add} disabled={busy}>
                    <i class="fas fa-plus"></i>
                    {"Add transaction"}
                </button>
            </div>
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                <StatCard
                    title="Balance"
                    icon="fas fa-scale-balanced"
                    value={format_currency(aggregates.balance)}
                    negative={aggregates.balance < 0.0}
                />
                <StatCard
                    title="Monthly spending"
                    icon="fas fa-arrow-trend-down"
                    value={format_currency(aggregates.monthly_spending)}
                    caption="All recorded expenses"
                />
                <StatCard
                    title="Income"
                    icon="fas fa-arrow-trend-up"
                    value={format_currency(aggregates.income)}
                />
                <StatCard
                    title="Transactions"
                    icon="fas fa-list"
                    value={aggregates.count.to_string()}
                />
            </div>
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{"Recent transactions"}</h2>
                    if *loading {
                        <Loading label="Loading transactions" />
                    } else {
                        <TransactionList
                            transactions={(*transactions).clone()}
                            {on_edit}
                            {on_delete}
                            {busy}
                        />
                    }
                </div>
            </div>
            {dialog}
        </div>
    }
}
