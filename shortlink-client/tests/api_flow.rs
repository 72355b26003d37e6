//! End-to-end flows against an in-process stub of the shortener API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use shortlink_client::{
    FileStorage, LinksView, LoginForm, MemoryStorage, RegisterForm, Session, SessionStorage,
    ShortlinkClient, ShortlinkError, messages,
};

#[derive(Debug, Clone)]
struct Hit {
    method: Method,
    path: String,
    query: Option<String>,
    bearer: Option<String>,
}

#[derive(Clone, Default)]
struct Stub {
    hits: Arc<Mutex<Vec<Hit>>>,
    username: Arc<Mutex<String>>,
}

impl Stub {
    fn hits(&self) -> Vec<Hit> {
        self.hits.lock().expect("hits lock").clone()
    }

    fn count(&self, method: Method, path: &str) -> usize {
        self.hits()
            .iter()
            .filter(|hit| hit.method == method && hit.path == path)
            .count()
    }
}

async fn record(State(stub): State<Stub>, request: Request, next: Next) -> Response {
    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    stub.hits.lock().expect("hits lock").push(Hit {
        method: request.method().clone(),
        path: request.uri().path().to_string(),
        query: request.uri().query().map(str::to_string),
        bearer,
    });
    next.run(request).await
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer jwt-ann")
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Token required" })),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == "ann@example.com" && body["password"] == "secret" {
        return (
            StatusCode::OK,
            Json(json!({
                "data": {
                    "token": { "access_token": "jwt-ann", "token_type": "Bearer" },
                    "user": { "id": 7, "username": "ann", "email": "ann@example.com" },
                    "role": "member"
                }
            })),
        );
    }
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Invalid credentials" })),
    )
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["phone"] != "0810000000" || body["address"] != "Unknown" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "phone and address are required" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "message": "User created" })),
    )
}

async fn stats(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (
        StatusCode::OK,
        Json(json!({
            "data": {
                "total_links": 1234,
                "links_this_week": "3",
                "total_visits": 98,
                "visits_growth": -4.5,
                "avg_click_rate": "2.25",
                "click_rate_change": 1,
                "last_7_days": [
                    { "date": "2024-01-01", "visits": 4 },
                    { "date": "2024-01-02", "visits": "8" }
                ]
            }
        })),
    )
}

#[derive(Deserialize)]
struct PageParams {
    page: Option<u32>,
}

fn link(id: u32, slug: &str) -> Value {
    json!({
        "id": id,
        "slug": slug,
        "url": format!("https://example.com/{slug}"),
        "clicks": id * 10,
        "created_at": "2024-03-09T10:00:00Z"
    })
}

async fn list_links(
    headers: HeaderMap,
    Query(params): Query<PageParams>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let body = match params.page.unwrap_or(1) {
        1 => json!({
            "success": true,
            "data": [link(1, "alpha"), link(2, "beta")],
            "link": {
                "page": 1, "limit": 2, "total_page": "2",
                "next": "localhost/api/v1/links/?page=2",
                "prev": null
            }
        }),
        2 => json!({
            "success": true,
            "data": [link(3, "gamma")],
            "link": {
                "page": "2", "limit": 2, "total_page": 2,
                "next": null,
                "prev": "http://localhost/api/v1/links/?page=1"
            }
        }),
        _ => json!({ "success": false, "message": "Page out of range" }),
    };
    (StatusCode::OK, Json(body))
}

async fn shorten(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["url"] == "https://fail.example" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "boom" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({ "short_url": "http://sho.rt/xyz", "shortcode": "xyz" })),
    )
}

async fn update_link(
    headers: HeaderMap,
    Path(slug): Path<String>,
    Json(_body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "success": slug != "locked" })))
}

async fn delete_link(headers: HeaderMap, Path(_slug): Path<String>) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn profile(State(stub): State<Stub>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let username = stub.username.lock().expect("username lock").clone();
    (
        StatusCode::OK,
        Json(json!({ "data": { "username": username, "email": "ann@example.com" } })),
    )
}

async fn update_profile(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&headers) {
        return unauthorized();
    }
    let username = body["username"].as_str().unwrap_or_default().to_string();
    *stub.username.lock().expect("username lock") = username;
    (StatusCode::OK, Json(json!({ "success": true })))
}

async fn spawn_stub() -> (String, Stub) {
    let stub = Stub {
        username: Arc::new(Mutex::new("ann".to_string())),
        ..Stub::default()
    };

    let app = Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/links/dashboard/stats", get(stats))
        .route("/api/v1/links/", get(list_links).post(shorten))
        .route("/api/v1/links/{slug}", put(update_link).delete(delete_link))
        .route("/api/v1/user/profile", get(profile).put(update_profile))
        .layer(middleware::from_fn_with_state(stub.clone(), record))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub must bind");
    let addr: SocketAddr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub must serve");
    });

    (format!("http://{addr}"), stub)
}

fn client_with<S: SessionStorage>(base_url: &str, storage: S) -> ShortlinkClient<S> {
    ShortlinkClient::new(base_url, Duration::from_secs(5), storage).expect("client must build")
}

async fn logged_in(base_url: &str) -> ShortlinkClient<MemoryStorage> {
    let mut client = client_with(base_url, MemoryStorage::new());
    client
        .login(&LoginForm::new("ann@example.com", "secret"))
        .await
        .expect("login must succeed");
    client
}

#[tokio::test]
async fn login_session_survives_restart_and_logout_clears_it() {
    let (base_url, _stub) = spawn_stub().await;
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("session.json");

    let mut client = client_with(&base_url, FileStorage::new(&path));
    assert!(!client.is_authenticated());
    let session = client
        .login(&LoginForm::new("ann@example.com", "secret"))
        .await
        .expect("login must succeed")
        .clone();
    assert_eq!(session.access_token(), Some("jwt-ann"));
    assert_eq!(session.display_name(), Some("ann"));

    let restarted = client_with(&base_url, FileStorage::new(&path));
    assert_eq!(restarted.session(), &session);
    assert!(restarted.is_authenticated());

    client.logout();
    let restarted = client_with(&base_url, FileStorage::new(&path));
    assert!(!restarted.is_authenticated());
    assert_eq!(restarted.session(), &Session::default());
}

#[tokio::test]
async fn failed_login_keeps_anonymous_session() {
    let (base_url, _stub) = spawn_stub().await;
    let mut client = client_with(&base_url, MemoryStorage::new());

    let err = client
        .login(&LoginForm::new("ann@example.com", "wrong"))
        .await
        .expect_err("login must fail");
    assert_eq!(err.user_message(messages::SOMETHING_WENT_WRONG), "Invalid credentials");
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn invalid_shorten_input_sends_nothing() {
    let (base_url, stub) = spawn_stub().await;
    let client = client_with(&base_url, MemoryStorage::new());

    let err = client.shorten("").await.expect_err("must fail");
    assert_eq!(err.to_string(), messages::EMPTY_URL);
    let err = client.shorten("not-a-url").await.expect_err("must fail");
    assert_eq!(err.to_string(), messages::INVALID_URL);

    assert!(stub.hits().is_empty());
}

#[tokio::test]
async fn shorten_returns_backend_result_and_sends_bearer_only_when_signed_in() {
    let (base_url, stub) = spawn_stub().await;

    let anonymous = client_with(&base_url, MemoryStorage::new());
    let result = anonymous
        .shorten("https://example.com/long")
        .await
        .expect("shorten must succeed");
    assert_eq!(result.short_url, "http://sho.rt/xyz");
    assert_eq!(result.shortcode, "xyz");

    let signed_in = logged_in(&base_url).await;
    signed_in
        .shorten("https://example.com/long")
        .await
        .expect("shorten must succeed");

    let bearers: Vec<Option<String>> = stub
        .hits()
        .into_iter()
        .filter(|hit| hit.method == Method::POST && hit.path == "/api/v1/links/")
        .map(|hit| hit.bearer)
        .collect();
    assert_eq!(bearers, vec![None, Some("jwt-ann".to_string())]);
}

#[tokio::test]
async fn shorten_failure_reports_status_line() {
    let (base_url, _stub) = spawn_stub().await;
    let client = client_with(&base_url, MemoryStorage::new());

    let err = client
        .shorten("https://fail.example")
        .await
        .expect_err("must fail");
    assert_eq!(err.to_string(), "Error: 500 Internal Server Error");
}

#[tokio::test]
async fn signed_out_fetches_send_nothing() {
    let (base_url, stub) = spawn_stub().await;
    let client = client_with(&base_url, MemoryStorage::new());
    let mut view = LinksView::new();

    assert!(matches!(
        client.dashboard_stats().await,
        Err(ShortlinkError::Unauthorized)
    ));
    assert!(matches!(
        client.refresh(&mut view).await,
        Err(ShortlinkError::Unauthorized)
    ));
    assert!(matches!(
        client.update_profile("bob").await,
        Err(ShortlinkError::Unauthorized)
    ));
    assert!(stub.hits().is_empty());
}

#[tokio::test]
async fn pagination_follows_backend_links() {
    let (base_url, stub) = spawn_stub().await;
    let client = logged_in(&base_url).await;
    let mut view = LinksView::new();

    client.load_page(&mut view, 1).await.expect("page 1");
    assert_eq!(view.links().len(), 2);
    assert!(view.can_go_next());
    assert!(!view.can_go_prev());
    assert_eq!(view.next_page(), Some(2));
    assert_eq!(view.page_label(), "Page 1 of 2");

    assert!(client.go_next(&mut view).await.expect("page 2"));
    let slugs: Vec<&str> = view.links().iter().map(|l| l.slug.as_str()).collect();
    assert_eq!(slugs, vec!["gamma"]);
    assert!(!view.can_go_next());
    assert_eq!(view.prev_page(), Some(1));

    let before = stub.hits().len();
    assert!(!client.go_next(&mut view).await.expect("no next page"));
    assert_eq!(stub.hits().len(), before);

    let queries: Vec<Option<String>> = stub
        .hits()
        .into_iter()
        .filter(|hit| hit.method == Method::GET && hit.path == "/api/v1/links/")
        .map(|hit| hit.query)
        .collect();
    assert_eq!(
        queries,
        vec![Some("page=1".to_string()), Some("page=2".to_string())]
    );
}

#[tokio::test]
async fn unsuccessful_list_keeps_previous_rows() {
    let (base_url, _stub) = spawn_stub().await;
    let client = logged_in(&base_url).await;
    let mut view = LinksView::new();

    client.load_page(&mut view, 1).await.expect("page 1");
    let err = client
        .load_page(&mut view, 9)
        .await
        .expect_err("page 9 must fail");
    assert_eq!(err.to_string(), "Page out of range");
    assert_eq!(view.links().len(), 2);
}

#[tokio::test]
async fn register_checks_form_before_sending() {
    let (base_url, stub) = spawn_stub().await;
    let client = client_with(&base_url, MemoryStorage::new());
    let form = RegisterForm {
        username: "ann".into(),
        email: "ann@example.com".into(),
        password: "password123".into(),
        confirm_password: "password124".into(),
        agree_terms: true,
    };

    let err = client.register(&form).await.expect_err("must fail");
    assert_eq!(err.to_string(), messages::PASSWORD_MISMATCH);
    assert!(stub.hits().is_empty());

    // Password policy belongs to the backend; a short one is still sent.
    let form = RegisterForm {
        password: "abc123".into(),
        confirm_password: "abc123".into(),
        ..form
    };
    client.register(&form).await.expect("register must succeed");
    assert_eq!(stub.count(Method::POST, "/api/v1/auth/register"), 1);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn delete_sends_one_request_then_refreshes_current_page() {
    let (base_url, stub) = spawn_stub().await;
    let client = logged_in(&base_url).await;
    let mut view = LinksView::new();
    client.load_page(&mut view, 2).await.expect("page 2");

    client
        .delete_link_and_refresh(&mut view, "gamma")
        .await
        .expect("delete must succeed");

    assert_eq!(stub.count(Method::DELETE, "/api/v1/links/gamma"), 1);
    let tail: Vec<(Method, String, Option<String>)> = stub
        .hits()
        .into_iter()
        .rev()
        .take(2)
        .map(|hit| (hit.method, hit.path, hit.query))
        .collect();
    assert_eq!(
        tail,
        vec![
            (Method::GET, "/api/v1/links/".to_string(), Some("page=2".to_string())),
            (Method::DELETE, "/api/v1/links/gamma".to_string(), None),
        ]
    );
}

#[tokio::test]
async fn update_link_validates_and_maps_unsuccessful_body() {
    let (base_url, stub) = spawn_stub().await;
    let client = logged_in(&base_url).await;
    let mut view = LinksView::new();
    client.load_page(&mut view, 1).await.expect("page 1");
    let before = stub.hits().len();

    let err = client
        .update_link("alpha", "nope")
        .await
        .expect_err("must fail");
    assert_eq!(err.to_string(), messages::INVALID_URL);
    assert_eq!(stub.hits().len(), before);

    let err = client
        .update_link("locked", "https://example.com/new")
        .await
        .expect_err("must fail");
    assert_eq!(err.to_string(), messages::UPDATE_LINK_FAILED);

    client
        .update_link_and_refresh(&mut view, "alpha", "https://example.com/new")
        .await
        .expect("update must succeed");
    assert_eq!(stub.count(Method::PUT, "/api/v1/links/alpha"), 1);
}

#[tokio::test]
async fn dashboard_stats_accept_stringly_numbers() {
    let (base_url, _stub) = spawn_stub().await;
    let client = logged_in(&base_url).await;

    let stats = client.dashboard_stats().await.expect("stats");
    assert_eq!(stats.total_links, 1234);
    assert_eq!(stats.links_this_week, 3);
    assert_eq!(stats.avg_click_rate, 2.25);
    assert_eq!(stats.visits_growth, -4.5);
    assert_eq!(stats.last_7_days.len(), 2);
    assert_eq!(stats.last_7_days[1].visits, 8);
}

#[tokio::test]
async fn profile_update_returns_refetched_profile() {
    let (base_url, _stub) = spawn_stub().await;
    let client = logged_in(&base_url).await;

    let err = client.update_profile("   ").await.expect_err("must fail");
    assert_eq!(err.to_string(), messages::USERNAME_REQUIRED);

    let profile = client.update_profile(" annie ").await.expect("update");
    assert_eq!(profile.username, "annie");
    assert_eq!(profile.email, "ann@example.com");
}
