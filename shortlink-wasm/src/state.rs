use leptos::logging;
use leptos::prelude::*;
use shortlink_client::session::{SessionStore, persist_session};
use shortlink_client::Session;

use crate::storage::BrowserStorage;

#[derive(Debug, Clone, Copy)]
/// Application state handed to every page as a prop.
pub(crate) struct AppState {
    pub(crate) session: RwSignal<Session>,
}

impl AppState {
    /// Restores the session from `localStorage`.
    pub(crate) fn load() -> Self {
        let store = SessionStore::load(BrowserStorage);
        Self {
            session: RwSignal::new(store.get().clone()),
        }
    }

    /// Replaces the session and writes it through.
    pub(crate) fn set_session(&self, session: Session) {
        if let Err(err) = persist_session(&BrowserStorage, &session) {
            logging::warn!("failed to persist session: {err}");
        }
        self.session.set(session);
    }

    pub(crate) fn logout(&self) {
        self.set_session(Session::default());
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.session.with(Session::is_authenticated)
    }

    /// Bearer token, tracked.
    pub(crate) fn token(&self) -> Option<String> {
        self.session.with(|s| s.access_token().map(str::to_string))
    }

    pub(crate) fn display_name(&self) -> Option<String> {
        self.session.with(|s| s.display_name().map(str::to_string))
    }
}
