use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{ShortlinkError, ShortlinkResult};
use crate::messages;
use crate::models::dto::{
    DataEnvelope, LinkListEnvelope, LoginRequest, MessageBody, PageQuery, ProfileUpdateRequest,
    REGISTER_ADDRESS, REGISTER_PHONE, RegisterRequest, StatusEnvelope, UrlRequest,
};
use crate::models::{DashboardStats, LinkPage, Profile, Session, ShortenedLink};

const LINKS_PATH: &str = "/api/v1/links/";

#[derive(Debug, Clone)]
/// Typed wrapper over the shortener's REST API. Stateless: tokens are passed
/// per call.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Builds a client with a 5 s connect timeout and the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ShortlinkResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// `/api/v1/links/{slug}` with the slug percent-encoded as one segment.
    fn link_endpoint(&self, slug: &str) -> ShortlinkResult<String> {
        let mut url = Url::parse(&self.endpoint(LINKS_PATH))
            .map_err(|err| ShortlinkError::Validation(format!("invalid server url: {err}")))?;
        url.path_segments_mut()
            .map_err(|_| ShortlinkError::Validation("server url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(slug);
        Ok(url.into())
    }

    fn request(&self, method: Method, url: String, token: Option<&str>) -> RequestBuilder {
        debug!(%method, %url, authenticated = token.is_some(), "api request");
        let request = self.client.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn decode_error(response: Response, fallback: &str) -> ShortlinkError {
        let status = response.status().as_u16();
        let message = response
            .json::<MessageBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        debug!(status, message = message.as_deref(), "api request rejected");
        ShortlinkError::from_http_status(status, message, fallback)
    }

    async fn send<TRes: DeserializeOwned>(
        request: RequestBuilder,
        fallback: &str,
    ) -> ShortlinkResult<TRes> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response, fallback).await);
        }
        Ok(response.json::<TRes>().await?)
    }

    /// Sends a mutation whose body is `{success, message?}`; `success: false`
    /// is a failure even with a 2xx status.
    async fn send_status(request: RequestBuilder, fallback: &str) -> ShortlinkResult<()> {
        let body: StatusEnvelope = Self::send(request, fallback).await?;
        if !body.success {
            return Err(ShortlinkError::Backend(
                body.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| fallback.to_string()),
            ));
        }
        Ok(())
    }

    /// `POST /api/v1/auth/login`; the `data` object becomes the session.
    pub async fn login(&self, email: &str, password: &str) -> ShortlinkResult<Session> {
        let request = self.request(Method::POST, self.endpoint("/api/v1/auth/login"), None);
        let request = request.json(&LoginRequest { email, password });
        let body: DataEnvelope<Session> = Self::send(request, messages::LOGIN_FAILED).await?;
        Ok(body.data)
    }

    /// `POST /api/v1/auth/register`. The success body is only logged.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ShortlinkResult<()> {
        let payload = RegisterRequest {
            email,
            password,
            username,
            phone: REGISTER_PHONE,
            address: REGISTER_ADDRESS,
        };
        let request = self.request(Method::POST, self.endpoint("/api/v1/auth/register"), None);
        let request = request.json(&payload);
        let body: MessageBody = Self::send(request, messages::REGISTER_FAILED).await?;
        debug!(message = body.message.as_deref(), "registered");
        Ok(())
    }

    /// `GET /api/v1/links/dashboard/stats`
    pub async fn dashboard_stats(&self, token: &str) -> ShortlinkResult<DashboardStats> {
        let request = self.request(
            Method::GET,
            self.endpoint("/api/v1/links/dashboard/stats"),
            Some(token),
        );
        let body: DataEnvelope<DashboardStats> =
            Self::send(request, messages::DASHBOARD_FAILED).await?;
        Ok(body.data)
    }

    /// `GET /api/v1/links/?page=N`
    pub async fn list_links(&self, token: &str, page: u32) -> ShortlinkResult<LinkPage> {
        let request = self
            .request(Method::GET, self.endpoint(LINKS_PATH), Some(token))
            .query(&PageQuery { page });
        let body: LinkListEnvelope = Self::send(request, messages::LINKS_FAILED).await?;
        if !body.success {
            return Err(ShortlinkError::Backend(
                body.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| messages::LINKS_FAILED.to_string()),
            ));
        }

        Ok(LinkPage {
            links: body.data.unwrap_or_default(),
            meta: body.link.unwrap_or_default(),
        })
    }

    /// `POST /api/v1/links/`; anonymous when `token` is `None`.
    ///
    /// Failures report the raw status line (`Error: 404 Not Found`) rather
    /// than the body.
    pub async fn shorten(&self, token: Option<&str>, url: &str) -> ShortlinkResult<ShortenedLink> {
        let request = self.request(Method::POST, self.endpoint(LINKS_PATH), token);
        let response = request.json(&UrlRequest { url }).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ShortlinkError::Backend(format!(
                "Error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )));
        }
        Ok(response.json::<ShortenedLink>().await?)
    }

    /// `PUT /api/v1/links/:slug`
    pub async fn update_link(&self, token: &str, slug: &str, url: &str) -> ShortlinkResult<()> {
        let request = self.request(Method::PUT, self.link_endpoint(slug)?, Some(token));
        let request = request.json(&UrlRequest { url });
        Self::send_status(request, messages::UPDATE_LINK_FAILED).await
    }

    /// `DELETE /api/v1/links/:slug`
    pub async fn delete_link(&self, token: &str, slug: &str) -> ShortlinkResult<()> {
        let request = self.request(Method::DELETE, self.link_endpoint(slug)?, Some(token));
        Self::send_status(request, messages::DELETE_LINK_FAILED).await
    }

    /// `GET /api/v1/user/profile`
    pub async fn profile(&self, token: &str) -> ShortlinkResult<Profile> {
        let request = self.request(Method::GET, self.endpoint("/api/v1/user/profile"), Some(token));
        let body: DataEnvelope<Profile> = Self::send(request, messages::PROFILE_FAILED).await?;
        Ok(body.data)
    }

    /// `PUT /api/v1/user/profile`
    pub async fn update_profile(&self, token: &str, username: &str) -> ShortlinkResult<()> {
        let request = self.request(Method::PUT, self.endpoint("/api/v1/user/profile"), Some(token));
        let request = request.json(&ProfileUpdateRequest { username });
        Self::send_status(request, messages::PROFILE_UPDATE_FAILED).await
    }
}
