use leptos::logging;
use leptos::prelude::*;
use leptos::task::spawn_local;
use shortlink_client::dashboard::format_count;
use shortlink_client::validation::validate_shorten_url;
use shortlink_client::{Link, LinksView, messages};

use crate::api;
use crate::components::copy_button::CopyButton;
use crate::pages::LoginRequired;
use crate::state::AppState;

#[component]
pub(crate) fn LinksPage(state: AppState) -> impl IntoView {
    let links = RwSignal::new(LinksView::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let editing = RwSignal::new(None::<Link>);
    let edit_url = RwSignal::new(String::new());
    let edit_error = RwSignal::new(None::<String>);
    let deleting = RwSignal::new(None::<Link>);
    let busy = RwSignal::new(false);

    let token = move || {
        state
            .session
            .with_untracked(|s| s.access_token().map(str::to_string))
    };

    // Rows are replaced only when the fetch succeeds.
    let fetch = move |page: u32| {
        let Some(token) = token() else {
            return;
        };
        loading.set(true);
        spawn_local(async move {
            match api::list_links(&token, page).await {
                Ok(fetched) => {
                    error.set(None);
                    links.update(|view| view.replace(fetched));
                }
                Err(err) => {
                    logging::error!("links page {page}: {err}");
                    error.set(Some(err.user_message(messages::LINKS_FAILED)));
                }
            }
            loading.set(false);
        });
    };
    fetch(1);

    let on_save = move |_| {
        let Some(link) = editing.get_untracked() else {
            return;
        };
        let url = match validate_shorten_url(&edit_url.get_untracked()) {
            Ok(url) => url,
            Err(err) => {
                edit_error.set(Some(err.to_string()));
                return;
            }
        };
        let Some(token) = token() else {
            return;
        };
        let page = links.with_untracked(LinksView::current_page);

        busy.set(true);
        spawn_local(async move {
            match api::update_link(&token, &link.slug, &url).await {
                Ok(()) => {
                    editing.set(None);
                    notice.set(Some(messages::LINK_UPDATED.to_string()));
                    fetch(page);
                }
                Err(err) => edit_error.set(Some(err.user_message(messages::UPDATE_LINK_ERROR))),
            }
            busy.set(false);
        });
    };

    let on_confirm_delete = move |_| {
        let Some(link) = deleting.get_untracked() else {
            return;
        };
        let Some(token) = token() else {
            return;
        };
        let page = links.with_untracked(LinksView::current_page);

        busy.set(true);
        spawn_local(async move {
            match api::delete_link(&token, &link.slug).await {
                Ok(()) => {
                    notice.set(Some(messages::LINK_DELETED.to_string()));
                    fetch(page);
                }
                Err(err) => error.set(Some(err.user_message(messages::DELETE_LINK_ERROR))),
            }
            deleting.set(None);
            busy.set(false);
        });
    };

    let start_edit = move |link: Link| {
        edit_url.set(link.url.clone());
        edit_error.set(None);
        editing.set(Some(link));
    };

    view! {
        <Show when=move || state.is_authenticated() fallback=|| view! { <LoginRequired /> }>
            <section class="links">
                <header>
                    <h1>"Links"</h1>
                    <input
                        type="search"
                        placeholder="Search links"
                        prop:value=move || links.with(|v| v.search().to_string())
                        on:input=move |ev| links.update(|v| v.set_search(event_target_value(&ev)))
                    />
                </header>

                <Show when=move || notice.with(Option::is_some)>
                    <p class="notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || error.with(Option::is_some)>
                    <p class="error">{move || error.get().unwrap_or_default()}</p>
                </Show>

                <table>
                    <thead>
                        <tr>
                            <th>"Short link"</th>
                            <th>"Destination"</th>
                            <th>"Clicks"</th>
                            <th>"Created"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || {
                                links.with(|v| v.visible().into_iter().cloned().collect::<Vec<_>>())
                            }
                            key=|link| (link.id.clone(), link.url.clone(), link.clicks)
                            children=move |link: Link| {
                                let short = api::short_url(&link.slug);
                                let for_edit = link.clone();
                                let for_delete = link.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <a href=short.clone() target="_blank">{short.clone()}</a>
                                        </td>
                                        <td class="destination">{link.url.clone()}</td>
                                        <td>{format_count(link.clicks)}</td>
                                        <td>{link.created_label()}</td>
                                        <td class="actions">
                                            <CopyButton text=short.clone() />
                                            <button on:click=move |_| start_edit(for_edit.clone())>
                                                "Edit"
                                            </button>
                                            <button on:click=move |_| {
                                                deleting.set(Some(for_delete.clone()))
                                            }>"Delete"</button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>

                <Show when=move || !loading.get() && links.with(|v| v.visible().is_empty())>
                    <p>"No links found"</p>
                </Show>

                <footer class="pagination">
                    <button
                        disabled=move || loading.get() || !links.with(LinksView::can_go_prev)
                        on:click=move |_| {
                            if let Some(page) = links.with_untracked(LinksView::prev_page) {
                                fetch(page);
                            }
                        }
                    >
                        "Previous"
                    </button>
                    <span>{move || links.with(LinksView::page_label)}</span>
                    <button
                        disabled=move || loading.get() || !links.with(LinksView::can_go_next)
                        on:click=move |_| {
                            if let Some(page) = links.with_untracked(LinksView::next_page) {
                                fetch(page);
                            }
                        }
                    >
                        "Next"
                    </button>
                </footer>

                <Show when=move || editing.with(Option::is_some)>
                    <div class="modal">
                        <h2>
                            "Edit "
                            {move || {
                                editing.with(|l| l.as_ref().map(|l| l.slug.clone()).unwrap_or_default())
                            }}
                        </h2>
                        <input
                            type="text"
                            prop:value=move || edit_url.get()
                            on:input=move |ev| edit_url.set(event_target_value(&ev))
                        />
                        <Show when=move || edit_error.with(Option::is_some)>
                            <p class="error">{move || edit_error.get().unwrap_or_default()}</p>
                        </Show>
                        <button on:click=on_save disabled=move || busy.get()>"Save"</button>
                        <button on:click=move |_| editing.set(None)>"Cancel"</button>
                    </div>
                </Show>

                <Show when=move || deleting.with(Option::is_some)>
                    <div class="modal">
                        <p>
                            "Delete "
                            {move || {
                                deleting.with(|l| l.as_ref().map(|l| l.slug.clone()).unwrap_or_default())
                            }}
                            "? This cannot be undone."
                        </p>
                        <button on:click=on_confirm_delete disabled=move || busy.get()>
                            "Delete"
                        </button>
                        <button on:click=move |_| deleting.set(None)>"Cancel"</button>
                    </div>
                </Show>
            </section>
        </Show>
    }
}
