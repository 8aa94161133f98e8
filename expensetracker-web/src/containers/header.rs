use tracing::info;
use yew::prelude::*;
use yew_router::prelude::{Link, use_navigator};
use yewdux::prelude::use_selector;

use crate::api::ExpenseClient;
use crate::models::app_state::SessionState;
use crate::routes::Route;

#[function_component(Header)]
pub fn header() -> Html {
    let username = use_selector(|state: &SessionState| state.username.clone());
    let client = use_context::<ExpenseClient>();
    let navigator = use_navigator();

    let on_logout = Callback::from(move |_: MouseEvent| {
        if let Some(client) = &client {
            client.logout();
        }
        info!("signed out");
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Auth);
        }
    });

    html! {
        <header class="navbar bg-base-200 shadow-sm sticky top-0 z-10">
            <div class="flex-1">
                <Link<Route> to={Route::Dashboard} classes="btn btn-ghost text-xl">
                    <i class="fas fa-wallet text-primary"></i>
                    {"Expense Tracker"}
                </Link<Route>>
            </div>
            <div class="flex-none gap-2">
                if let Some(name) = (*username).clone() {
                    <span class="hidden sm:inline text-sm">
                        <i class="fas fa-user mr-1"></i>
                        {name}
                    </span>
                }
                <button class="btn btn-outline btn-sm" onclick={on_logout}>
                    <i class="fas fa-right-from-bracket"></i>
                    {"Logout"}
                </button>
            </div>
        </header>
    }
}
