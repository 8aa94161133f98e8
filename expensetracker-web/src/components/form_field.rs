use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::prelude::*;

/// Labelled input with an inline error slot underneath.
#[derive(Properties, PartialEq)]
pub struct FormFieldProps {
    pub id: AttrValue,
    pub label: AttrValue,
    pub value: String,
    pub on_input: Callback<String>,
    #[prop_or(AttrValue::Static("text"))]
    pub input_type: AttrValue,
    #[prop_or_default]
    pub placeholder: Option<AttrValue>,
    #[prop_or_default]
    pub error: Option<String>,
    #[prop_or_default]
    pub disabled: bool,
    /// Render a `<textarea>` instead of an `<input>`.
    #[prop_or_default]
    pub multiline: bool,
}

#[function_component(FormField)]
pub fn form_field(props: &FormFieldProps) -> Html {
    let input_class = classes!(
        if props.multiline { "textarea" } else { "input" },
        if props.multiline { "textarea-bordered" } else { "input-bordered" },
        "w-full",
        props.error.as_ref().map(|_| "input-error")
    );

    let control = if props.multiline {
        let on_input = props.on_input.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(area) = event.target_dyn_into::<HtmlTextAreaElement>() {
                on_input.emit(area.value());
            }
        });
        html! {
            <textarea
                id={props.id.clone()}
                class={input_class}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                value={props.value.clone()}
                {oninput}
            />
        }
    } else {
        let on_input = props.on_input.clone();
        let oninput = Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                on_input.emit(input.value());
            }
        });
        html! {
            <input
                id={props.id.clone()}
                class={input_class}
                type={props.input_type.clone()}
                placeholder={props.placeholder.clone()}
                disabled={props.disabled}
                value={props.value.clone()}
                {oninput}
            />
        }
    };

    html! {
        <div class="form-control">
            <label class="label" for={props.id.clone()}>
                <span class="label-text">{props.label.clone()}</span>
            </label>
            {control}
            if let Some(message) = &props.error {
                <label class="label">
                    <span class="label-text-alt text-error">{message.clone()}</span>
                </label>
            }
        </div>
    }
}
