use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shortlink_client::models::dto::{
    DataEnvelope, LinkListEnvelope, LoginRequest, MessageBody, ProfileUpdateRequest,
    REGISTER_ADDRESS, REGISTER_PHONE, RegisterRequest, StatusEnvelope, UrlRequest,
};
use shortlink_client::{
    DEFAULT_API_URL, DashboardStats, LinkPage, Profile, Session, ShortenedLink, messages,
};

use crate::error::ApiError;

pub(crate) const API_BASE_URL: &str = match option_env!("SHORTLINK_API_BASE_URL") {
    Some(value) => value,
    None => DEFAULT_API_URL,
};

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn link_endpoint(slug: &str) -> String {
    let slug = String::from(js_sys::encode_uri_component(slug));
    endpoint(&format!("/api/v1/links/{slug}"))
}

/// Public short URL of `slug`.
pub(crate) fn short_url(slug: &str) -> String {
    format!("{}/{slug}", API_BASE_URL.trim_end_matches('/'))
}

fn authorized(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
        None => builder,
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    builder
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))
}

async fn send_json<B: Serialize>(builder: RequestBuilder, body: &B) -> Result<Response, ApiError> {
    builder
        .json(body)
        .map_err(|err| ApiError::Decode(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))
}

async fn parse_error_body(response: Response, fallback: &str) -> ApiError {
    let status = response.status();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<MessageBody>(&text).ok())
        .and_then(|body| body.message);
    ApiError::http(status, message, fallback)
}

async fn read<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T, ApiError> {
    if !response.ok() {
        return Err(parse_error_body(response, fallback).await);
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn read_status(response: Response, fallback: &str) -> Result<(), ApiError> {
    let status = response.status();
    let body: StatusEnvelope = read(response, fallback).await?;
    if !body.success {
        return Err(ApiError::http(status, body.message, fallback));
    }
    Ok(())
}

pub(crate) async fn login(email: &str, password: &str) -> Result<Session, ApiError> {
    let response = send_json(
        Request::post(&endpoint("/api/v1/auth/login")),
        &LoginRequest { email, password },
    )
    .await?;
    let body: DataEnvelope<Session> = read(response, messages::LOGIN_FAILED).await?;
    Ok(body.data)
}

pub(crate) async fn register(username: &str, email: &str, password: &str) -> Result<(), ApiError> {
    let payload = RegisterRequest {
        email,
        password,
        username,
        phone: REGISTER_PHONE,
        address: REGISTER_ADDRESS,
    };
    let response = send_json(Request::post(&endpoint("/api/v1/auth/register")), &payload).await?;
    let _: MessageBody = read(response, messages::REGISTER_FAILED).await?;
    Ok(())
}

pub(crate) async fn dashboard_stats(token: &str) -> Result<DashboardStats, ApiError> {
    let request = authorized(
        Request::get(&endpoint("/api/v1/links/dashboard/stats")),
        Some(token),
    );
    let body: DataEnvelope<DashboardStats> =
        read(send(request).await?, messages::DASHBOARD_FAILED).await?;
    Ok(body.data)
}

pub(crate) async fn list_links(token: &str, page: u32) -> Result<LinkPage, ApiError> {
    let url = endpoint(&format!("/api/v1/links/?page={}", page.max(1)));
    let response = send(authorized(Request::get(&url), Some(token))).await?;
    let status = response.status();
    let body: LinkListEnvelope = read(response, messages::LINKS_FAILED).await?;
    if !body.success {
        return Err(ApiError::http(status, body.message, messages::LINKS_FAILED));
    }
    Ok(LinkPage {
        links: body.data.unwrap_or_default(),
        meta: body.link.unwrap_or_default(),
    })
}

/// Anonymous when `token` is `None`. Failures read `Error: <status> <reason>`.
pub(crate) async fn shorten(token: Option<&str>, url: &str) -> Result<ShortenedLink, ApiError> {
    let request = authorized(Request::post(&endpoint("/api/v1/links/")), token);
    let response = send_json(request, &UrlRequest { url }).await?;
    if !response.ok() {
        let status = response.status();
        return Err(ApiError::Http {
            status,
            message: format!("Error: {status} {}", response.status_text()),
        });
    }
    response
        .json::<ShortenedLink>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

pub(crate) async fn update_link(token: &str, slug: &str, url: &str) -> Result<(), ApiError> {
    let request = authorized(Request::put(&link_endpoint(slug)), Some(token));
    let response = send_json(request, &UrlRequest { url }).await?;
    read_status(response, messages::UPDATE_LINK_FAILED).await
}

pub(crate) async fn delete_link(token: &str, slug: &str) -> Result<(), ApiError> {
    let request = authorized(Request::delete(&link_endpoint(slug)), Some(token));
    read_status(send(request).await?, messages::DELETE_LINK_FAILED).await
}

pub(crate) async fn profile(token: &str) -> Result<Profile, ApiError> {
    let request = authorized(Request::get(&endpoint("/api/v1/user/profile")), Some(token));
    let body: DataEnvelope<Profile> = read(send(request).await?, messages::PROFILE_FAILED).await?;
    Ok(body.data)
}

pub(crate) async fn update_profile(token: &str, username: &str) -> Result<(), ApiError> {
    let request = authorized(Request::put(&endpoint("/api/v1/user/profile")), Some(token));
    let response = send_json(request, &ProfileUpdateRequest { username }).await?;
    read_status(response, messages::PROFILE_UPDATE_FAILED).await
}
