//! Client library for the Koda Shortlink REST API.
//!
//! Everything the frontends share lives here: wire models, the persisted
//! session, form validation, pagination and dashboard formatting. With the
//! `http` feature (on by default) it also provides [`ShortlinkClient`], a
//! `reqwest` client that owns the session and enforces the login guard.

pub mod copy_feedback;
pub mod dashboard;
mod error;
pub mod links;
pub mod messages;
pub mod models;
pub mod pagination;
pub mod session;
pub mod shorten_panel;
pub mod validation;

#[cfg(feature = "http")]
mod http_client;

pub use copy_feedback::{COPY_FEEDBACK_DURATION, CopyFeedback, CopyTicket};
pub use error::{ShortlinkError, ShortlinkResult};
pub use links::LinksView;
pub use models::{
    DashboardStats, DailyVisits, Link, LinkPage, PaginationMeta, Profile, Session, ShortenedLink,
};
pub use session::{MemoryStorage, SessionStorage, SessionStore, StorageError};
pub use shorten_panel::ShortenPanel;
pub use validation::{LoginForm, RegisterForm};

#[cfg(not(target_arch = "wasm32"))]
pub use session::FileStorage;

#[cfg(feature = "http")]
pub use client::ShortlinkClient;
#[cfg(feature = "http")]
pub use http_client::HttpClient;

/// Default backend address of a local deployment.
pub const DEFAULT_API_URL: &str = "http://localhost:8008";

#[cfg(feature = "http")]
mod client {
    use std::time::Duration;

    use tracing::info;

    use crate::error::{ShortlinkError, ShortlinkResult};
    use crate::http_client::HttpClient;
    use crate::links::LinksView;
    use crate::models::{DashboardStats, LinkPage, Profile, Session, ShortenedLink};
    use crate::session::{SessionStorage, SessionStore};
    use crate::validation::{self, LoginForm, RegisterForm};

    #[derive(Debug)]
    /// API client bound to one session.
    ///
    /// Authenticated calls fail with [`ShortlinkError::Unauthorized`] before
    /// touching the network when there is no token. Local validation failures
    /// never reach the network either.
    pub struct ShortlinkClient<S> {
        http: HttpClient,
        store: SessionStore<S>,
    }

    impl<S: SessionStorage> ShortlinkClient<S> {
        /// Restores the session from `storage` and builds the HTTP client.
        pub fn new(base_url: impl Into<String>, timeout: Duration, storage: S) -> ShortlinkResult<Self> {
            Ok(Self {
                http: HttpClient::new(base_url, timeout)?,
                store: SessionStore::load(storage),
            })
        }

        pub fn base_url(&self) -> &str {
            self.http.base_url()
        }

        pub fn session(&self) -> &Session {
            self.store.get()
        }

        pub fn is_authenticated(&self) -> bool {
            self.store.is_authenticated()
        }

        fn require_token(&self) -> ShortlinkResult<&str> {
            self.store.access_token().ok_or(ShortlinkError::Unauthorized)
        }

        /// Signs in and replaces the session with the login payload.
        pub async fn login(&mut self, form: &LoginForm) -> ShortlinkResult<&Session> {
            form.check()?;
            let session = self.http.login(form.email.trim(), &form.password).await?;
            info!(user = session.display_name(), "logged in");
            self.store.set(session);
            Ok(self.store.get())
        }

        /// Creates an account. The session is left untouched; the user signs
        /// in afterwards.
        pub async fn register(&self, form: &RegisterForm) -> ShortlinkResult<()> {
            form.check()?;
            self.http
                .register(form.username.trim(), form.email.trim(), &form.password)
                .await
        }

        /// Drops the session, in memory and in storage.
        pub fn logout(&mut self) {
            self.store.clear();
            info!("logged out");
        }

        pub async fn dashboard_stats(&self) -> ShortlinkResult<DashboardStats> {
            let token = self.require_token()?;
            self.http.dashboard_stats(token).await
        }

        pub async fn list_links(&self, page: u32) -> ShortlinkResult<LinkPage> {
            let token = self.require_token()?;
            self.http.list_links(token, page.max(1)).await
        }

        /// Validates `input` and shortens it, with the bearer token only when
        /// signed in.
        pub async fn shorten(&self, input: &str) -> ShortlinkResult<ShortenedLink> {
            let url = validation::validate_shorten_url(input)?;
            self.http.shorten(self.store.access_token(), &url).await
        }

        /// Fetches `page` into `view`. On failure the view keeps its rows.
        pub async fn load_page(&self, view: &mut LinksView, page: u32) -> ShortlinkResult<()> {
            let fetched = self.list_links(page).await?;
            view.replace(fetched);
            Ok(())
        }

        /// Re-fetches the page the view currently shows.
        pub async fn refresh(&self, view: &mut LinksView) -> ShortlinkResult<()> {
            self.load_page(view, view.current_page()).await
        }

        /// Follows the backend's `next` link. `Ok(false)` when there is none.
        pub async fn go_next(&self, view: &mut LinksView) -> ShortlinkResult<bool> {
            match view.next_page() {
                Some(page) => self.load_page(view, page).await.map(|_| true),
                None => Ok(false),
            }
        }

        /// Follows the backend's `prev` link. `Ok(false)` when there is none.
        pub async fn go_prev(&self, view: &mut LinksView) -> ShortlinkResult<bool> {
            match view.prev_page() {
                Some(page) => self.load_page(view, page).await.map(|_| true),
                None => Ok(false),
            }
        }

        /// Points `slug` at a new destination.
        pub async fn update_link(&self, slug: &str, input: &str) -> ShortlinkResult<()> {
            let token = self.require_token()?;
            let url = validation::validate_shorten_url(input)?;
            self.http.update_link(token, slug, &url).await
        }

        pub async fn delete_link(&self, slug: &str) -> ShortlinkResult<()> {
            let token = self.require_token()?;
            self.http.delete_link(token, slug).await
        }

        /// Edits a link, then re-fetches the current page into `view`.
        pub async fn update_link_and_refresh(
            &self,
            view: &mut LinksView,
            slug: &str,
            input: &str,
        ) -> ShortlinkResult<()> {
            self.update_link(slug, input).await?;
            self.refresh(view).await
        }

        /// Deletes a link, then re-fetches the current page into `view`.
        pub async fn delete_link_and_refresh(
            &self,
            view: &mut LinksView,
            slug: &str,
        ) -> ShortlinkResult<()> {
            self.delete_link(slug).await?;
            self.refresh(view).await
        }

        pub async fn profile(&self) -> ShortlinkResult<Profile> {
            let token = self.require_token()?;
            self.http.profile(token).await
        }

        /// Renames the account and returns the re-fetched profile.
        pub async fn update_profile(&self, input: &str) -> ShortlinkResult<Profile> {
            let token = self.require_token()?;
            let username = validation::validate_username(input)?;
            self.http.update_profile(token, &username).await?;
            self.http.profile(token).await
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::messages;
        use crate::session::MemoryStorage;

        fn client() -> ShortlinkClient<MemoryStorage> {
            // Nothing listens on port 9; every test here must fail before
            // sending anything.
            ShortlinkClient::new("http://127.0.0.1:9", Duration::from_secs(1), MemoryStorage::new())
                .expect("client must build")
        }

        #[tokio::test]
        async fn anonymous_calls_fail_without_request() {
            let client = client();
            assert!(matches!(
                client.dashboard_stats().await,
                Err(ShortlinkError::Unauthorized)
            ));
            assert!(matches!(client.list_links(1).await, Err(ShortlinkError::Unauthorized)));
            assert!(matches!(
                client.delete_link("abc").await,
                Err(ShortlinkError::Unauthorized)
            ));
            assert!(matches!(client.profile().await, Err(ShortlinkError::Unauthorized)));
        }

        #[tokio::test]
        async fn invalid_shorten_input_is_rejected_locally() {
            let client = client();
            let err = client.shorten("").await.expect_err("must fail");
            assert_eq!(err.to_string(), messages::EMPTY_URL);

            let err = client.shorten("not-a-url").await.expect_err("must fail");
            assert_eq!(err.to_string(), messages::INVALID_URL);
        }

        #[tokio::test]
        async fn incomplete_login_is_rejected_locally() {
            let mut client = client();
            let err = client
                .login(&LoginForm::new("ann@example.com", ""))
                .await
                .expect_err("must fail");
            assert!(err.is_local());
            assert!(!client.is_authenticated());
        }
    }
}
