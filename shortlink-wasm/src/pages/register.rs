use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use shortlink_client::{RegisterForm, messages};

use crate::api;

#[component]
pub(crate) fn RegisterPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let agree_terms = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let navigate = use_navigate();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let form = RegisterForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
            agree_terms: agree_terms.get_untracked(),
        };
        if let Err(err) = form.check() {
            error.set(Some(err.to_string()));
            return;
        }

        loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result =
                api::register(form.username.trim(), form.email.trim(), &form.password).await;
            loading.set(false);
            match result {
                Ok(()) => {
                    if window().alert_with_message(messages::REGISTER_OK).is_err() {
                        leptos::logging::log!("{}", messages::REGISTER_OK);
                    }
                    navigate("/login", Default::default());
                }
                Err(err) => error.set(Some(err.user_message(messages::NETWORK_ERROR))),
            }
        });
    };

    view! {
        <section class="auth">
            <h1>"Create an account"</h1>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="Full name"
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    type="email"
                    placeholder="Email"
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Confirm password"
                    on:input=move |ev| confirm_password.set(event_target_value(&ev))
                />
                <label>
                    <input
                        type="checkbox"
                        on:change=move |ev| agree_terms.set(event_target_checked(&ev))
                    />
                    " I agree to the terms"
                </label>
                <button type="submit" disabled=move || loading.get()>"Get Started"</button>
            </form>
            <Show when=move || error.with(Option::is_some)>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <p>"Already registered? " <A href="/login">"Sign In"</A></p>
        </section>
    }
}
