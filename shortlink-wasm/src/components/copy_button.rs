use gloo_timers::callback::Timeout;
use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shortlink_client::{COPY_FEEDBACK_DURATION, CopyFeedback};
use wasm_bindgen_futures::JsFuture;

async fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("window is not available")?;
    let promise = window.navigator().clipboard().write_text(text);
    JsFuture::from(promise)
        .await
        .map_err(|_| "clipboard write failed".to_string())?;
    Ok(())
}

/// Copies `text` and reads "Copied!" for two seconds.
#[component]
pub(crate) fn CopyButton(#[prop(into)] text: String) -> impl IntoView {
    let feedback = RwSignal::new(CopyFeedback::new());
    let timer = StoredValue::new_local(None::<Timeout>);

    // Dropping the pending Timeout cancels it.
    on_cleanup(move || {
        timer.update_value(|pending| {
            pending.take();
        });
    });

    let on_copy = move |_| {
        let text = text.clone();
        spawn_local(async move {
            if let Err(err) = copy_to_clipboard(&text).await {
                logging::error!("{err}");
                return;
            }
            let Some(ticket) = feedback.try_update(|f| f.mark_copied()) else {
                return;
            };
            let reset = Timeout::new(COPY_FEEDBACK_DURATION.as_millis() as u32, move || {
                feedback.try_update(|f| f.expire(ticket));
            });
            timer.set_value(Some(reset));
        });
    };

    view! {
        <button class="copy" on:click=on_copy>
            {move || feedback.with(|f| f.label())}
        </button>
    }
}
