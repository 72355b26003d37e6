pub(crate) mod dashboard;
pub(crate) mod landing;
pub(crate) mod links;
pub(crate) mod login;
pub(crate) mod register;
pub(crate) mod settings;

use leptos::prelude::*;
use leptos_router::components::A;
use shortlink_client::messages;

#[component]
pub(crate) fn NotFound() -> impl IntoView {
    view! {
        <section class="not-found">
            <h1>"404"</h1>
            <p>"This page does not exist."</p>
            <A href="/">"Back home"</A>
        </section>
    }
}

/// Shown instead of authenticated pages to anonymous visitors.
#[component]
pub(crate) fn LoginRequired() -> impl IntoView {
    view! {
        <section class="login-required">
            <p>{messages::LOGIN_REQUIRED}</p>
            <A href="/login">"Sign In"</A>
        </section>
    }
}
