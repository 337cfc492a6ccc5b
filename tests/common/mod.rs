#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{AppendHeaders, IntoResponse, Response};
use axum::routing::{delete, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use gallery_page::context::{keys, PageContext};

const REFRESH_COOKIE: &str = "user_refresh_token";

/// In-process stand-in for the gallery backend
pub struct StubBackend {
    pub port: u16,
    pub base_url: String,
    hits: Arc<Mutex<Vec<String>>>,
}

#[derive(Clone)]
struct StubState {
    hits: Arc<Mutex<Vec<String>>>,
}

impl StubState {
    fn hit(&self, line: String) {
        self.hits.lock().unwrap().push(line);
    }
}

impl StubBackend {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let hits = Arc::new(Mutex::new(Vec::new()));
        let app = router(StubState { hits: hits.clone() });

        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            port,
            base_url,
            hits,
        })
    }

    /// `"METHOD /path"` for every request the backend has served, in order
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    /// Address on this host where nothing is listening
    pub fn dead_base_url() -> Result<String> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        Ok(format!("http://127.0.0.1:{}", port))
    }
}

pub fn page_context(logged_in: bool) -> PageContext {
    let ctx = PageContext::from_pairs([
        (keys::IMAGE_ID, "7"),
        (keys::URL_REFRESH_TOKENS, "/api/auth/refresh"),
        (keys::URL_CREATE_IMAGE, "/images/create"),
        (keys::URL_CHANGE_IMAGE_VISIBILITY, "/images/visibility/7"),
        (keys::URL_DELETE_IMAGE, "/images/delete/7"),
        (keys::URL_DELETE_LIKE, "/likes/7"),
        (keys::URL_PLACE_LIKE, "/likes/place"),
        (keys::URL_LOGOUT_USER, "/api/auth/logout"),
        (keys::URL_DELETE_USER, "/api/auth/delete"),
        (keys::URL_LOGIN_USER, "/api/auth/login"),
        (keys::URL_REGISTER_USER, "/api/auth/register"),
        (keys::URL_HOME_PAGE, "/"),
        (keys::URL_GET_ME_PAGE, "/users/me"),
        (keys::URL_LOGIN_USER_PAGE, "/users/login"),
    ]);
    if logged_in {
        ctx.merged([(keys::LOGGED_IN, "True")])
    } else {
        ctx
    }
}

pub fn short_dismiss() -> Duration {
    Duration::from_millis(50)
}

fn router(state: StubState) -> Router {
    Router::new()
        .route("/api/auth/refresh", post(refresh))
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/delete", delete(delete_user))
        .route("/images/create", post(create_image))
        .route("/images/visibility/:id", patch(change_visibility))
        .route("/images/delete/:id", delete(delete_image))
        .route("/likes/place", post(place_like))
        .route("/likes/:id", delete(delete_like))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn has_refresh_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .any(|v| v.contains(REFRESH_COOKIE))
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

async fn refresh(State(state): State<StubState>, headers: HeaderMap) -> Response {
    state.hit("POST /api/auth/refresh".to_string());
    if has_refresh_cookie(&headers) {
        (StatusCode::OK, Json(json!({"message": "tokens refreshed"}))).into_response()
    } else {
        detail(StatusCode::UNAUTHORIZED, "You must be logged in to view this page")
    }
}

async fn login(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.hit("POST /api/auth/login".to_string());
    if field(&body, "username") == "alice" && field(&body, "password") == "secret1" {
        (
            StatusCode::OK,
            AppendHeaders([(header::SET_COOKIE, format!("{}=token; Path=/", REFRESH_COOKIE))]),
            Json(json!({"message": "successfully logged in"})),
        )
            .into_response()
    } else {
        detail(StatusCode::BAD_REQUEST, "Incorrect username or password")
    }
}

async fn register(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.hit("POST /api/auth/register".to_string());
    if field(&body, "password") != field(&body, "confirm_password") {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "Passwords do not match");
    }
    if field(&body, "username") == "taken" {
        return detail(StatusCode::BAD_REQUEST, "This username is already taken");
    }
    (StatusCode::OK, Json(json!({"message": "successfully registered new user"}))).into_response()
}

async fn logout(State(state): State<StubState>) -> Response {
    state.hit("POST /api/auth/logout".to_string());
    (StatusCode::OK, Json(json!({"message": "successfully logged out"}))).into_response()
}

async fn delete_user(State(state): State<StubState>) -> Response {
    state.hit("DELETE /api/auth/delete".to_string());
    (StatusCode::OK, Json(json!({"message": "successfully deleted user"}))).into_response()
}

async fn create_image(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.hit("POST /images/create".to_string());
    let prompt = field(&body, "prompt");
    if prompt.len() < 3 {
        return detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Prompt must be between 3 and 200 characters long",
        );
    }
    (StatusCode::OK, Json(json!({"image_url": "/images/42"}))).into_response()
}

async fn change_visibility(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    state.hit(format!("PATCH /images/visibility/{}", id));
    if id == "7" {
        (StatusCode::OK, Json(json!({"message": "successfully changed image visibility"}))).into_response()
    } else {
        detail(StatusCode::BAD_REQUEST, "Failed to change image visibility")
    }
}

async fn delete_image(State(state): State<StubState>, Path(id): Path<String>) -> Response {
    state.hit(format!("DELETE /images/delete/{}", id));
    (StatusCode::OK, Json(json!({"message": "successfully deleted image"}))).into_response()
}

async fn place_like(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.hit("POST /likes/place".to_string());
    if field(&body, "to_image_id") == "7" {
        (StatusCode::OK, Json(json!({"new_likes_count": 1}))).into_response()
    } else {
        detail(StatusCode::BAD_REQUEST, "This image cannot be liked")
    }
}

async fn delete_like(State(state): State<StubState>, Path(id): Path<String>) -> impl IntoResponse {
    state.hit(format!("DELETE /likes/{}", id));
    StatusCode::NOT_FOUND
}
