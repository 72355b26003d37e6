use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shortlink_client::validation::validate_shorten_url;
use shortlink_client::{ShortenPanel, messages};

use crate::api;
use crate::components::copy_button::CopyButton;
use crate::error::ApiError;
use crate::state::AppState;

#[component]
pub(crate) fn LandingPage(state: AppState) -> impl IntoView {
    let input = RwSignal::new(String::new());
    let panel = RwSignal::new(ShortenPanel::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let url = match validate_shorten_url(&input.get_untracked()) {
            Ok(url) => url,
            Err(err) => {
                panel.update(|p| p.fail(err.to_string()));
                return;
            }
        };
        let token = state
            .session
            .with_untracked(|s| s.access_token().map(str::to_string));

        panel.update(ShortenPanel::begin);
        spawn_local(async move {
            match api::shorten(token.as_deref(), &url).await {
                Ok(link) => {
                    panel.update(|p| p.succeed(link));
                    input.set(String::new());
                }
                Err(ApiError::Decode(_)) => panel.update(|p| p.fail(messages::SHORTEN_FAILED)),
                Err(err) => panel.update(|p| p.fail(err.to_string())),
            }
        });
    };
    let loading = move || panel.with(ShortenPanel::is_loading);
    let error = move || panel.with(|p| p.error().map(str::to_string));

    view! {
        <section class="landing">
            <h1>"Shorten your links"</h1>
            <p>"Paste a long URL and get a short one you can share anywhere."</p>
            <form on:submit=on_submit>
                <input
                    type="text"
                    placeholder="https://example.com/a/very/long/url"
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <button type="submit" disabled=loading>
                    {move || if loading() { "Shortening..." } else { "Shorten" }}
                </button>
            </form>

            <Show when=move || error().is_some()>
                <p class="error">{move || error().unwrap_or_default()}</p>
            </Show>

            {move || {
                panel
                    .with(|p| p.result().cloned())
                    .map(|link| {
                        view! {
                            <div class="result">
                                <a href=link.short_url.clone() target="_blank">
                                    {link.short_url.clone()}
                                </a>
                                <p>"Code: " {link.shortcode.clone()}</p>
                                <CopyButton text=link.short_url.clone() />
                            </div>
                        }
                    })
            }}
        </section>
    }
}
