use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or(String::from("Loading"))]
    pub label: String,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center h-full animate-fadeIn" role="status">
            <div class="bg-base-200 p-6 rounded-lg shadow-md flex flex-col items-center">
                <div class="text-xl font-medium flex items-center gap-2">
                    <i class="fas fa-wallet text-primary"></i>
                    <span>{"Expense Tracker"}</span>
                </div>
                <div class="mt-3 flex items-center">
                    <span>{props.label.clone()}</span>
                    <span class="loading loading-dots loading-sm ml-2"></span>
                </div>
            </div>
        </div>
    }
}
