use yew::{Html, function_component, html};
use yew_router::prelude::Link;

use crate::routes::Route;

const FEATURES: [(&str, &str, &str); 3] = [
    (
        "fas fa-receipt",
        "Track every transaction",
        "Record income and expenses with a name, amount and optional note.",
    ),
    (
        "fas fa-chart-line",
        "See where you stand",
        "Your balance, spending and income are totalled as you go.",
    ),
    (
        "fas fa-lock",
        "Private to you",
        "Entries are tied to your account and only visible once you sign in.",
    ),
];

#[function_component(LandingPage)]
pub fn landing_page() -> Html {
    html! {
        <div class="min-h-screen bg-base-100">
            <header class="navbar bg-base-200">
                <div class="flex-1">
                    <span class="btn btn-ghost text-xl">
                        <i class="fas fa-wallet text-primary"></i>
                        {"Expense Tracker"}
                    </span>
                </div>
                <div class="flex-none">
                    <Link<Route> to={Route::Auth} classes="btn btn-primary btn-sm">
                        {"Sign up"}
                    </Link<Route>>
                </div>
            </header>
            <section class="hero py-20 bg-base-200">
                <div class="hero-content text-center">
                    <div class="max-w-xl">
                        <h1 class="text-5xl font-bold">{"Manage your expenses with ease"}</h1>
                        <p class="py-6">
                            {"A simple ledger for what comes in and what goes out."}
                        </p>
                        <Link<Route> to={Route::Auth} classes="btn btn-primary">
                            {"Get started"}
                        </Link<Route>>
                    </div>
                </div>
            </section>
            <section class="container mx-auto grid gap-6 p-8 md:grid-cols-3">
                { for FEATURES.iter().map(|(icon, title, body)| html! {
                    <div class="card bg-base-200 shadow">
                        <div class="card-body">
                            <i class={format!("{icon} text-3xl text-primary")}></i>
                            <h2 class="card-title">{*title}</h2>
                            <p>{*body}</p>
                        </div>
                    </div>
                }) }
            </section>
        </div>
    }
}
