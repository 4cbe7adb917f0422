mod routes;

pub(crate) use routes::{guard, AppRoute, GuardOutcome};

use crate::components::{NoticeHost, SessionGuard};
use crate::pages::{CategoriesPage, EventsPage, HomePage, LoginPage, RegisterPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // Router hooks (navigate, Redirect) need to live under <Router>.
    view! {
        <Router>
            <NoticeHost />
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("register") view=RegisterPage />
                <Route path=path!("home") view=move || view! {
                    <SessionGuard route=AppRoute::Home>
                        <HomePage />
                    </SessionGuard>
                } />
                <Route path=path!("events") view=move || view! {
                    <SessionGuard route=AppRoute::Events>
                        <EventsPage />
                    </SessionGuard>
                } />
                <Route path=path!("categories") view=move || view! {
                    <SessionGuard route=AppRoute::Categories>
                        <CategoriesPage />
                    </SessionGuard>
                } />
                <Route path=path!("") view=|| view! { <Redirect path=AppRoute::Register.path() /> } />
            </Routes>
        </Router>
    }
}
