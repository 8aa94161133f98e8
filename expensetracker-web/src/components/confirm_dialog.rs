use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmDialogProps {
    pub title: AttrValue,
    pub message: String,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
    #[prop_or(AttrValue::Static("Delete"))]
    pub confirm_label: AttrValue,
    /// Request in flight: both buttons are disabled.
    #[prop_or_default]
    pub busy: bool,
}

#[function_component(ConfirmDialog)]
pub fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = {
        let callback = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };
    let on_cancel = {
        let callback = props.on_cancel.clone();
        Callback::from(move |_: MouseEvent| callback.emit(()))
    };

    html! {
        <div class="modal modal-open" role="dialog">
            <div class="modal-box">
                <h3 class="font-bold text-lg">{props.title.clone()}</h3>
                <p class="py-4">{props.message.clone()}</p>
                <div class="modal-action">
                    <button class="btn" onclick={on_cancel} disabled={props.busy}>{"Cancel"}</button>
                    <button class="btn btn-error" onclick={on_confirm} disabled={props.busy}>
                        if props.busy {
                            <span class="loading loading-spinner loading-xs"></span>
                        }
                        {props.confirm_label.clone()}
                    </button>
                </div>
            </div>
        </div>
    }
}
