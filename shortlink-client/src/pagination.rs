//! Page navigation driven by the backend's opaque `next`/`prev` URLs.
//!
//! The client never computes page numbers; it only reads the `page` query
//! parameter back out of the URLs the backend hands over.

use url::Url;

/// Cleans up a `next`/`prev` value: blank means "no such page", and values
/// without a scheme (`localhost:8008/...?page=2`) get `http://` prefixed.
pub fn normalize_page_url(raw: Option<&str>) -> Option<String> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.starts_with("http") {
        Some(raw.to_string())
    } else {
        Some(format!("http://{raw}"))
    }
}

/// Reads the `page` query parameter of a page URL.
pub fn page_from_url(raw: &str) -> Option<u32> {
    let url = Url::parse(raw).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.trim().parse::<u32>().ok())
}
