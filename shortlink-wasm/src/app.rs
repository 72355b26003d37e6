use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::navbar::Navbar;
use crate::pages::dashboard::DashboardPage;
use crate::pages::landing::LandingPage;
use crate::pages::links::LinksPage;
use crate::pages::login::LoginPage;
use crate::pages::register::RegisterPage;
use crate::pages::settings::SettingsPage;
use crate::pages::NotFound;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::load();

    view! {
        <Router>
            <Navbar state=state />
            <main class="page">
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=move || view! { <LandingPage state=state /> } />
                    <Route path=path!("/login") view=move || view! { <LoginPage state=state /> } />
                    <Route path=path!("/register") view=RegisterPage />
                    <Route
                        path=path!("/dashboard")
                        view=move || view! { <DashboardPage state=state /> }
                    />
                    <Route path=path!("/links") view=move || view! { <LinksPage state=state /> } />
                    <Route
                        path=path!("/setting")
                        view=move || view! { <SettingsPage state=state /> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
