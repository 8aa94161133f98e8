use shared::models::Transaction;
use yew::prelude::*;

/// Lists longer than this get a scrolling container.
pub const SCROLL_THRESHOLD: usize = 15;

/// The backend returns oldest first; the dashboard shows newest first.
pub fn newest_first(transactions: &[Transaction]) -> Vec<&Transaction> {
    transactions.iter().rev().collect()
}

#[derive(Properties, PartialEq)]
pub struct TransactionListProps {
    pub transactions: Vec<Transaction>,
    pub on_edit: Callback<Transaction>,
    pub on_delete: Callback<Transaction>,
    /// Row actions are disabled while the editor is busy.
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(TransactionList)]
pub fn transaction_list(props: &TransactionListProps) -> Html {
    if props.transactions.is_empty() {
        return html! {
            <div class="text-center text-base-content/60 py-8">
                {"No transactions yet. Add your first one to get started."}
            </div>
        };
    }

    let scroll = (props.transactions.len() > SCROLL_THRESHOLD).then_some("max-h-[36rem] overflow-y-auto");

    html! {
        <ul class={classes!("divide-y", "divide-base-300", scroll)}>
            { for newest_first(&props.transactions).into_iter().map(|transaction| {
                let on_edit = {
                    let callback = props.on_edit.clone();
                    let transaction = transaction.clone();
                    Callback::from(move |_: MouseEvent| callback.emit(transaction.clone()))
                };
                let on_delete = {
                    let callback = props.on_delete.clone();
                    let transaction = transaction.clone();
                    Callback::from(move |_: MouseEvent| callback.emit(transaction.clone()))
                };
                let tone = if transaction.is_expense { "text-error" } else { "text-success" };

                html! {
                    <li key={transaction.id} class="flex items-center gap-4 py-3">
                        <div class={classes!("avatar", "placeholder", tone)}>
                            <span class="text-xl font-bold">{transaction.sign()}</span>
                        </div>
                        <div class="flex-1 min-w-0">
                            <p class="font-medium truncate">{transaction.name.clone()}</p>
                            if !transaction.description.is_empty() {
                                <p class="text-sm text-base-content/60 truncate">
                                    {transaction.description.clone()}
                                </p>
                            }
                        </div>
                        <span class={classes!("font-mono", tone)}>{transaction.display_amount()}</span>
                        <div class="flex gap-1">
                            <button class="btn btn-ghost btn-xs" title="Edit" onclick={on_edit} disabled={props.busy}>
                                <i class="fas fa-pen"></i>
                            </button>
                            <button class="btn btn-ghost btn-xs text-error" title="Delete" onclick={on_delete} disabled={props.busy}>
                                <i class="fas fa-trash"></i>
                            </button>
                        </div>
                    </li>
                }
            }) }
        </ul>
    }
}
