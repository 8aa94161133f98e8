use tracing::debug;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::containers::layout::Layout;
use crate::pages::{AuthPage, DashboardPage, LandingPage, NotFoundPage};

/// The app routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Routable)]
pub enum Route {
    #[at("/")]
    Landing,
    #[at("/auth")]
    Auth,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Routes that need a session.
    pub const fn requires_session(self) -> bool {
        matches!(self, Self::Dashboard)
    }

    /// Where to send the user instead of `self`, if anywhere.
    pub const fn redirect_for(self, authenticated: bool) -> Option<Self> {
        if self.requires_session() && !authenticated {
            return Some(Self::Auth);
        }
        match self {
            Self::Auth if authenticated => Some(Self::Dashboard),
            _ => None,
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteViewProps {
    pub route: Route,
    pub authenticated: bool,
}

#[function_component(RouteView)]
pub fn route_view(props: &RouteViewProps) -> Html {
    if let Some(target) = props.route.redirect_for(props.authenticated) {
        debug!(from = ?props.route, to = ?target, "redirecting");
        return html! { <Redirect<Route> to={target} /> };
    }

    match props.route {
        Route::Landing => html! { <LandingPage /> },
        Route::Auth => html! { <AuthPage /> },
        Route::Dashboard => html! {
            <Layout>
                <DashboardPage />
            </Layout>
        },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}
