use std::rc::Rc;

use tracing::{info, warn};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::use_store;
use yewdux::YewduxRoot;

use crate::api::ExpenseClient;
use crate::components::loading::Loading;
use crate::config::ClientConfig;
use crate::models::app_state::SessionState;
use crate::routes::{Route, RouteView};
use crate::session::{BrowserStorage, SessionStore};

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <YewduxRoot>
            <BrowserRouter>
                <Shell />
            </BrowserRouter>
        </YewduxRoot>
    }
}

/// Owns the session store and API client for the lifetime of the app and
/// hands the client down through context.
#[function_component(Shell)]
fn shell() -> Html {
    let (state, dispatch) = use_store::<SessionState>();
    let navigator = use_navigator();
    let restored = use_state(|| false);

    let session = use_memo((), move |_| {
        SessionStore::new(dispatch, Rc::new(BrowserStorage::local()))
    });

    let client = {
        let session = session.clone();
        use_memo((), move |_| {
            let on_unauthorized = Callback::from(move |()| {
                warn!("session rejected by the server");
                if let Some(navigator) = &navigator {
                    navigator.push(&Route::Auth);
                }
            });
            ExpenseClient::new(&ClientConfig::new(), (*session).clone(), on_unauthorized)
        })
    };

    {
        let session = session.clone();
        let restored = restored.clone();
        use_effect_with((), move |_| {
            if let Some(username) = session.restore() {
                info!(%username, "session restored");
            }
            restored.set(true);
            || ()
        });
    }

    if !*restored {
        return html! { <Loading /> };
    }

    let authenticated = state.is_authenticated();
    html! {
        <ContextProvider<ExpenseClient> context={(*client).clone()}>
            <Switch<Route> render={move |route| html! { <RouteView {route} {authenticated} /> }} />
        </ContextProvider<ExpenseClient>>
    }
}
