use yew::{AttrValue, Html, Properties, classes, function_component, html};

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub title: AttrValue,
    pub value: String,
    #[prop_or_default]
    pub caption: Option<AttrValue>,
    #[prop_or_default]
    pub icon: Option<AttrValue>,
    /// Tint the value red when set.
    #[prop_or_default]
    pub negative: bool,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    html! {
        <div class="stat bg-base-200 rounded-box shadow">
            if let Some(icon) = &props.icon {
                <div class="stat-figure text-primary">
                    <i class={classes!(icon.to_string())}></i>
                </div>
            }
            <div class="stat-title">{props.title.clone()}</div>
            <div class={classes!("stat-value", props.negative.then_some("text-error"))}>
                {props.value.clone()}
            </div>
            if let Some(caption) = &props.caption {
                <div class="stat-desc">{caption.clone()}</div>
            }
        </div>
    }
}
