use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use shortlink_client::{LoginForm, messages};

use crate::api;
use crate::state::AppState;

#[component]
pub(crate) fn LoginPage(state: AppState) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);
    let navigate = use_navigate();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let form = LoginForm::new(email.get_untracked(), password.get_untracked());
        if let Err(err) = form.check() {
            error.set(Some(err.to_string()));
            return;
        }

        loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(form.email.trim(), &form.password).await {
                Ok(session) => {
                    loading.set(false);
                    state.set_session(session);
                    navigate("/", Default::default());
                }
                Err(err) => {
                    error.set(Some(err.user_message(messages::SOMETHING_WENT_WRONG)));
                    loading.set(false);
                }
            }
        });
    };

    view! {
        <section class="auth">
            <h1>"Sign In"</h1>
            <form on:submit=on_submit>
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
                <button type="submit" disabled=move || loading.get()>"Sign In"</button>
            </form>
            <Show when=move || error.with(Option::is_some)>
                <p class="error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <p>"No account yet? " <A href="/register">"Get Started"</A></p>
        </section>
    }
}
