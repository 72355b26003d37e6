use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::AppState;

#[component]
pub(crate) fn Navbar(state: AppState) -> impl IntoView {
    view! {
        <nav class="navbar">
            <A href="/">"Koda Shortlink"</A>
            <Show
                when=move || state.is_authenticated()
                fallback=|| {
                    view! {
                        <A href="/login">"Sign In"</A>
                        <A href="/register">"Get Started"</A>
                    }
                }
            >
                <A href="/dashboard">"Dashboard"</A>
                <A href="/links">"Links"</A>
                <A href="/setting">"Settings"</A>
                <span class="user">{move || state.display_name().unwrap_or_default()}</span>
                <LogoutButton state=state />
            </Show>
        </nav>
    }
}

#[component]
fn LogoutButton(state: AppState) -> impl IntoView {
    let navigate = use_navigate();
    let on_logout = move |_| {
        state.logout();
        navigate("/login", Default::default());
    };

    view! { <button on:click=on_logout>"Logout"</button> }
}
