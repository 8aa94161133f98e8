use shared::validation::{Field, FieldErrors, LoginForm, SignupForm};
use tracing::{debug, error, info, warn};
use yew::prelude::*;
use yew_router::hooks::use_navigator;

use crate::api::{ApiError, ExpenseClient};
use crate::components::form_field::FormField;
use crate::routes::Route;
use crate::scope::RequestScope;

const LOGIN_FALLBACK: &str = "Failed to login";
const SIGNUP_FALLBACK: &str = "An error occurred during registration";
const SIGNUP_DONE: &str = "Registration successful. Please log in.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthTab {
    Login,
    Signup,
}

#[function_component(AuthPage)]
pub fn auth_page() -> Html {
    let client = use_context::<ExpenseClient>();
    let navigator = use_navigator();
    let tab = use_state(|| AuthTab::Login);
    let login = use_state(LoginForm::default);
    let signup = use_state(SignupForm::default);
    let errors = use_state(FieldErrors::new);
    let server_error = use_state(|| None::<String>);
    let notice = use_state(|| None::<String>);
    let loading = use_state(|| false);
    let scope = use_memo((), |_| RequestScope::new());

    {
        let scope = scope.clone();
        use_effect_with((), move |_| move || scope.cancel());
    }

    let Some(client) = client else {
        error!("auth page rendered without an API client");
        return html! {};
    };

    let switch_tab = {
        let tab = tab.clone();
        let errors = errors.clone();
        let server_error = server_error.clone();
        let notice = notice.clone();
        Callback::from(move |next: AuthTab| {
            errors.set(FieldErrors::new());
            server_error.set(None);
            notice.set(None);
            tab.set(next);
        })
    };

    let on_login = {
        let client = client.clone();
        let login = login.clone();
        let errors = errors.clone();
        let server_error = server_error.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let scope = scope.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *loading {
                return;
            }
            let request = match login.validate() {
                Ok(request) => request,
                Err(invalid) => {
                    errors.set(invalid);
                    return;
                }
            };
            errors.set(FieldErrors::new());
            server_error.set(None);
            notice.set(None);
            loading.set(true);

            let client = client.clone();
            let server_error = server_error.clone();
            let loading = loading.clone();
            let navigator = navigator.clone();
            scope.spawn(move |scope| async move {
                match scope.run(client.login(&request)).await {
                    Ok(response) => {
                        info!(username = %response.username, "signed in");
                        loading.set(false);
                        if let Some(navigator) = &navigator {
                            navigator.push(&Route::Dashboard);
                        }
                    }
                    Err(ApiError::Cancelled) => debug!("login abandoned"),
                    Err(err) => {
                        warn!(error = %err, status = ?err.status(), "login failed");
                        server_error.set(Some(err.user_message(LOGIN_FALLBACK)));
                        loading.set(false);
                    }
                }
            });
        })
    };

    let on_signup = {
        let signup = signup.clone();
        let errors = errors.clone();
        let server_error = server_error.clone();
        let notice = notice.clone();
        let loading = loading.clone();
        let tab = tab.clone();
        let scope = scope.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            if *loading {
                return;
            }
            let request = match signup.validate() {
                Ok(request) => request,
                Err(invalid) => {
                    errors.set(invalid);
                    return;
                }
            };
            errors.set(FieldErrors::new());
            server_error.set(None);
            notice.set(None);
            loading.set(true);

            let client = client.clone();
            let signup = signup.clone();
            let server_error = server_error.clone();
            let notice = notice.clone();
            let loading = loading.clone();
            let tab = tab.clone();
            scope.spawn(move |scope| async move {
                match scope.run(client.register(&request)).await {
                    Ok(_) => {
                        info!(username = %request.username, "registered");
                        signup.set(SignupForm::default());
                        notice.set(Some(SIGNUP_DONE.to_string()));
                        tab.set(AuthTab::Login);
                    }
                    Err(ApiError::Cancelled) => {
                        debug!("registration abandoned");
                        return;
                    }
                    Err(err) => {
                        warn!(error = %err, status = ?err.status(), "registration failed");
                        server_error.set(Some(err.user_message(SIGNUP_FALLBACK)));
                    }
                }
                loading.set(false);
            });
        })
    };

    let busy = *loading;
    let tab_button = |target: AuthTab, label: &'static str| {
        let switch_tab = switch_tab.clone();
        html! {
            <button
                type="button"
                role="tab"
                class={classes!("tab", (*tab == target).then_some("tab-active"))}
                onclick={Callback::from(move |_: MouseEvent| switch_tab.emit(target))}
            >
                {label}
            </button>
        }
    };

    let form = match *tab {
        AuthTab::Login => {
            let set_username = {
                let login = login.clone();
                Callback::from(move |username: String| {
                    login.set(LoginForm {
                        username,
                        ..(*login).clone()
                    });
                })
            };
            let set_password = {
                let login = login.clone();
                Callback::from(move |password: String| {
                    login.set(LoginForm {
                        password,
                        ..(*login).clone()
                    });
                })
            };
            html! {
                <form class="flex flex-col gap-2" onsubmit={on_login}>
                    <FormField
                        id="login-username"
                        label="Username"
                        value={login.username.clone()}
                        error={errors.message(Field::Username)}
                        disabled={busy}
                        on_input={set_username}
                    />
                    <FormField
                        id="login-password"
                        label="Password"
                        input_type="password"
                        value={login.password.clone()}
                        error={errors.message(Field::Password)}
                        disabled={busy}
                        on_input={set_password}
                    />
                    <button class="btn btn-primary mt-4" type="submit" disabled={busy}>
                        {if busy { "Signing in..." } else { "Log in" }}
                    </button>
                </form>
            }
        }
        AuthTab::Signup => {
            let field = |apply: fn(&mut SignupForm, String)| {
                let signup = signup.clone();
                Callback::from(move |value: String| {
                    let mut next = (*signup).clone();
                    apply(&mut next, value);
                    signup.set(next);
                })
            };
            html! {
                <form class="flex flex-col gap-2" onsubmit={on_signup}>
                    <FormField
                        id="signup-username"
                        label="Username"
                        value={signup.username.clone()}
                        error={errors.message(Field::Username)}
                        disabled={busy}
                        on_input={field(|form, value| form.username = value)}
                    />
                    <FormField
                        id="signup-email"
                        label="Email"
                        input_type="email"
                        value={signup.email.clone()}
                        error={errors.message(Field::Email)}
                        disabled={busy}
                        on_input={field(|form, value| form.email = value)}
                    />
                    <FormField
                        id="signup-password"
                        label="Password"
                        input_type="password"
                        value={signup.password.clone()}
                        error={errors.message(Field::Password)}
                        disabled={busy}
                        on_input={field(|form, value| form.password = value)}
                    />
                    <FormField
                        id="signup-confirm-password"
                        label="Confirm password"
                        input_type="password"
                        value={signup.confirm_password.clone()}
                        error={errors.message(Field::ConfirmPassword)}
                        disabled={busy}
                        on_input={field(|form, value| form.confirm_password = value)}
                    />
                    <button class="btn btn-primary mt-4" type="submit" disabled={busy}>
                        {if busy { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>
            }
        }
    };

    html! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="card w-full max-w-md shadow-lg bg-base-100">
                <div class="card-body">
                    <h2 class="card-title text-2xl justify-center">{"Expense Tracker"}</h2>
                    <div role="tablist" class="tabs tabs-boxed">
                        {tab_button(AuthTab::Login, "Log in")}
                        {tab_button(AuthTab::Signup, "Sign up")}
                    </div>
                    if let Some(message) = &*notice {
                        <div class="alert alert-success">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    if let Some(message) = &*server_error {
                        <div class="alert alert-error">
                            <span>{message.clone()}</span>
                        </div>
                    }
                    {form}
                </div>
            </div>
        </div>
    }
}
