use leptos::ev::SubmitEvent;
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shortlink_client::validation::validate_username;
use shortlink_client::{Profile, messages};

use crate::api;
use crate::pages::LoginRequired;
use crate::state::AppState;

fn load_profile(token: String, profile: RwSignal<Option<Profile>>, username: RwSignal<String>) {
    spawn_local(async move {
        match api::profile(&token).await {
            Ok(fetched) => {
                username.set(fetched.username.clone());
                profile.set(Some(fetched));
            }
            Err(err) => logging::error!("profile: {err}"),
        }
    });
}

#[component]
pub(crate) fn SettingsPage(state: AppState) -> impl IntoView {
    let profile = RwSignal::new(None::<Profile>);
    let username = RwSignal::new(String::new());
    let notice = RwSignal::new(None::<String>);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    if let Some(token) = state
        .session
        .with_untracked(|s| s.access_token().map(str::to_string))
    {
        load_profile(token, profile, username);
    }

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        notice.set(None);
        error.set(None);

        let Some(token) = state
            .session
            .with_untracked(|s| s.access_token().map(str::to_string))
        else {
            error.set(Some(messages::LOGIN_REQUIRED.to_string()));
            return;
        };
        let name = match validate_username(&username.get_untracked()) {
            Ok(name) => name,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };

        saving.set(true);
        spawn_local(async move {
            match api::update_profile(&token, &name).await {
                Ok(()) => {
                    notice.set(Some(messages::PROFILE_UPDATED.to_string()));
                    load_profile(token, profile, username);
                }
                Err(err) => error.set(Some(err.user_message(messages::SOMETHING_WENT_WRONG))),
            }
            saving.set(false);
        });
    };

    view! {
        <Show when=move || state.is_authenticated() fallback=|| view! { <LoginRequired /> }>
            <section class="settings">
                <h1>"Settings"</h1>
                <form on:submit=on_submit>
                    <label>
                        "Username"
                        <input
                            type="text"
                            prop:value=move || username.get()
                            on:input=move |ev| username.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Email"
                        <input
                            type="email"
                            disabled=true
                            prop:value=move || {
                                profile.with(|p| p.as_ref().map(|p| p.email.clone()).unwrap_or_default())
                            }
                        />
                    </label>
                    <button type="submit" disabled=move || saving.get()>"Save"</button>
                </form>
                <Show when=move || notice.with(Option::is_some)>
                    <p class="notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || error.with(Option::is_some)>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </section>
        </Show>
    }
}
