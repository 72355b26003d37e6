use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::pagination;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Credential part of a session.
pub struct AccessToken {
    /// Bearer token sent in `Authorization`.
    #[serde(default)]
    pub access_token: String,
    /// Whatever else the backend put next to the token (type, expiry...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// User part of a session, as returned by login.
pub struct SessionUser {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Remaining user fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Authenticated session: the `data` object of a successful login, kept whole.
///
/// `Session::default()` is the anonymous session.
pub struct Session {
    /// Token issued at login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<AccessToken>,
    /// User returned with the token, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,
    /// Any other top-level login fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Non-empty bearer token, if present.
    pub fn access_token(&self) -> Option<&str> {
        self.token
            .as_ref()
            .map(|token| token.access_token.as_str())
            .filter(|token| !token.trim().is_empty())
    }

    /// Presence of a token is the only authentication check the client makes.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Name to greet the user with, when login returned one.
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        user.username.as_deref().or(user.email.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Short link owned by the current user.
pub struct Link {
    /// Backend identifier (numeric or opaque).
    #[serde(deserialize_with = "lenient::id")]
    pub id: String,
    /// Short code appended to the redirect host.
    pub slug: String,
    /// Destination URL.
    pub url: String,
    /// Visit counter.
    #[serde(default, deserialize_with = "lenient::count")]
    pub clicks: u64,
    /// Creation timestamp as sent by the backend.
    #[serde(default)]
    pub created_at: String,
}

impl Link {
    /// Public short URL: `{base}/{slug}`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.slug)
    }

    /// Creation date as `MM/DD/YYYY`, or the raw value if it is not a date.
    pub fn created_label(&self) -> String {
        parse_date(&self.created_at)
            .map(|date| date.format("%m/%d/%Y").to_string())
            .unwrap_or_else(|| self.created_at.clone())
    }

    /// Case-insensitive substring match on slug and destination.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.slug.to_lowercase().contains(&query) || self.url.to_lowercase().contains(&query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Window of the current links page, as reported by the backend.
pub struct PaginationMeta {
    /// Current page number (1-based).
    #[serde(default = "one", deserialize_with = "lenient::page_number")]
    pub page: u32,
    /// Page size.
    #[serde(default = "default_limit", deserialize_with = "lenient::page_number")]
    pub limit: u32,
    /// Number of pages.
    #[serde(default = "one", deserialize_with = "lenient::page_number")]
    pub total_page: u32,
    /// Opaque URL of the next page, absent on the last page.
    #[serde(default, deserialize_with = "lenient::page_url")]
    pub next: Option<String>,
    /// Opaque URL of the previous page, absent on the first page.
    #[serde(default, deserialize_with = "lenient::page_url")]
    pub prev: Option<String>,
}

impl Default for PaginationMeta {
    fn default() -> Self {
        Self {
            page: 1,
            limit: default_limit(),
            total_page: 1,
            next: None,
            prev: None,
        }
    }
}

fn one() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// One fetched page of links.
pub struct LinkPage {
    /// Rows of this page.
    pub links: Vec<Link>,
    /// Pagination window.
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Visits on one day of the dashboard series.
pub struct DailyVisits {
    /// Day, usually `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Visits on that day.
    #[serde(default, deserialize_with = "lenient::count")]
    pub visits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Aggregates computed by the backend for the dashboard.
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_links: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub links_this_week: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub total_visits: u64,
    /// Week-over-week change of visits, percent.
    #[serde(default, deserialize_with = "lenient::number")]
    pub visits_growth: f64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_click_rate: f64,
    /// Change of the click rate, percent.
    #[serde(default, deserialize_with = "lenient::number")]
    pub click_rate_change: f64,
    /// Visits of the last seven days, oldest first.
    #[serde(default)]
    pub last_7_days: Vec<DailyVisits>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Account profile shown on the settings page.
pub struct Profile {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Result of shortening a URL.
pub struct ShortenedLink {
    /// Full short URL.
    pub short_url: String,
    /// Generated short code.
    pub shortcode: String,
}

pub(crate) fn parse_date(raw: &str) -> Option<chrono::NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    raw.get(..10)
        .and_then(|day| chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

/// Wire shapes of the backend API.
pub mod dto {
    use serde::{Deserialize, Serialize};

    use super::{Link, PaginationMeta};

    #[derive(Debug, Serialize)]
    pub struct LoginRequest<'a> {
        pub email: &'a str,
        pub password: &'a str,
    }

    #[derive(Debug, Serialize)]
    pub struct RegisterRequest<'a> {
        pub email: &'a str,
        pub password: &'a str,
        pub username: &'a str,
        pub phone: &'a str,
        pub address: &'a str,
    }

    /// Placeholders the registration endpoint requires but the client never asks for.
    pub const REGISTER_PHONE: &str = "0810000000";
    pub const REGISTER_ADDRESS: &str = "Unknown";

    #[derive(Debug, Serialize)]
    pub struct UrlRequest<'a> {
        pub url: &'a str,
    }

    #[derive(Debug, Serialize)]
    pub struct ProfileUpdateRequest<'a> {
        pub username: &'a str,
    }

    #[derive(Debug, Serialize)]
    pub struct PageQuery {
        pub page: u32,
    }

    /// `{ "data": ... }`
    #[derive(Debug, Deserialize)]
    pub struct DataEnvelope<T> {
        pub data: T,
    }

    /// `{ "success": bool, "message": ... }`
    #[derive(Debug, Default, Deserialize)]
    pub struct StatusEnvelope {
        #[serde(default)]
        pub success: bool,
        #[serde(default)]
        pub message: Option<String>,
    }

    /// Body of `GET /api/v1/links/`.
    #[derive(Debug, Deserialize)]
    pub struct LinkListEnvelope {
        #[serde(default)]
        pub success: bool,
        #[serde(default)]
        pub data: Option<Vec<Link>>,
        #[serde(default)]
        pub link: Option<PaginationMeta>,
        #[serde(default)]
        pub message: Option<String>,
    }

    /// Any error body; only `message` is read.
    #[derive(Debug, Default, Deserialize)]
    pub struct MessageBody {
        #[serde(default)]
        pub message: Option<String>,
    }
}

mod lenient {
    //! Backends of this API send numbers as strings now and then.

    use serde::Deserialize;

    use super::{Deserializer, pagination};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Int(u64),
        Float(f64),
        Text(String),
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Int(i64),
        Text(String),
    }

    pub(super) fn id<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
        Ok(match IdRepr::deserialize(de)? {
            IdRepr::Int(value) => value.to_string(),
            IdRepr::Text(value) => value,
        })
    }

    fn as_f64<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
        let value = Option::<NumberOrString>::deserialize(de)?;
        Ok(match value {
            None => 0.0,
            Some(NumberOrString::Int(value)) => value as f64,
            Some(NumberOrString::Float(value)) => value,
            Some(NumberOrString::Text(value)) => value.trim().parse().unwrap_or(0.0),
        })
    }

    pub(super) fn number<'de, D: Deserializer<'de>>(de: D) -> Result<f64, D::Error> {
        as_f64(de)
    }

    pub(super) fn count<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
        Ok(as_f64(de)?.max(0.0) as u64)
    }

    pub(super) fn page_number<'de, D: Deserializer<'de>>(de: D) -> Result<u32, D::Error> {
        Ok(as_f64(de)?.clamp(0.0, u32::MAX as f64) as u32)
    }

    pub(super) fn page_url<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(de)?;
        Ok(pagination::normalize_page_url(raw.as_deref()))
    }
}
