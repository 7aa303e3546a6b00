//! In-process stand-in for the clinic backend.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use shodhan_client::ClientOptions;
use shodhan_core::session::Credential;

pub const ADMIN: (&str, &str) = ("admin", "secret");
pub const EDITOR: (&str, &str) = ("editor", "secret");

/// What the backend observed.
#[derive(Clone, Default)]
pub struct Seen {
    pub auth: Arc<Mutex<Vec<Option<String>>>>,
    pub bodies: Arc<Mutex<Vec<Value>>>,
}

impl Seen {
    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.auth.lock().unwrap().clone()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    fn record(&self, headers: &HeaderMap) -> Option<String> {
        let auth = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.auth.lock().unwrap().push(auth.clone());
        auth
    }
}

fn header_for((user, pass): (&str, &str)) -> String {
    Credential::from_login(user, pass).header_value()
}

/// 200 for the admin, 403 for the editor, 401 otherwise.
fn gate(seen: &Seen, headers: &HeaderMap) -> Result<(), Response> {
    match seen.record(headers) {
        Some(v) if v == header_for(ADMIN) => Ok(()),
        Some(v) if v == header_for(EDITOR) => Err(StatusCode::FORBIDDEN.into_response()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Unauthorized"})),
        )
            .into_response()),
    }
}

fn sample_blog() -> Value {
    json!({
        "id": 1,
        "title": "Healing with Herbs",
        "slug": "healing-with-herbs",
        "content": "Tulsi and neem.",
        "author": "Asha",
        "tags": ["herbs", "wellness"],
        "published": true,
        "featured": false
    })
}

async fn admin_login(State(seen): State<Seen>, headers: HeaderMap) -> Response {
    match gate(&seen, &headers) {
        Ok(()) => Json(json!({"username": "admin"})).into_response(),
        Err(resp) => resp,
    }
}

async fn admin_blogs(State(seen): State<Seen>, headers: HeaderMap) -> Response {
    match gate(&seen, &headers) {
        Ok(()) => Json(json!([sample_blog()])).into_response(),
        Err(resp) => resp,
    }
}

async fn create_blog(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = gate(&seen, &headers) {
        return resp;
    }
    seen.bodies.lock().unwrap().push(body.clone());
    let mut created = body;
    created["id"] = json!(99);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn generate_slug(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = gate(&seen, &headers) {
        return resp;
    }
    let title = params.get("title").cloned().unwrap_or_default();
    let slug = title.to_lowercase().replace(' ', "-");
    Json(json!({"slug": slug})).into_response()
}

async fn change_password(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = gate(&seen, &headers) {
        return resp;
    }
    seen.bodies.lock().unwrap().push(body.clone());
    if body["currentPassword"] == ADMIN.1 {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Current password is incorrect"})),
        )
            .into_response()
    }
}

async fn disease(Path(id): Path<String>) -> Response {
    if id == "1" {
        Json(json!({
            "id": 1,
            "name": "Migraine",
            "category": {"id": 2, "name": "Neuro"},
            "faqs": "Q1: Is it curable? A: It is manageable."
        }))
        .into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response()
    }
}

async fn diseases() -> Json<Value> {
    Json(json!([
        {"id": 1, "name": "Migraine", "category": {"id": 2, "name": "Neuro"}},
        {"id": 2, "name": "Eczema", "category": {"id": 3, "name": "Skin"}},
        {"id": 3, "name": "Insomnia", "category": {"id": 2, "name": "Neuro"}}
    ]))
}

async fn clinics() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"message": "database unavailable"})),
    )
        .into_response()
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let keyword = params.get("keyword").cloned().unwrap_or_default();
    let mut blog = sample_blog();
    blog["title"] = json!(keyword);
    Json(json!([blog]))
}

async fn by_author(Path(author): Path<String>) -> Json<Value> {
    let mut blog = sample_blog();
    blog["author"] = json!(author);
    Json(json!([blog]))
}

async fn appointments(State(seen): State<Seen>, Json(body): Json<Value>) -> StatusCode {
    seen.bodies.lock().unwrap().push(body);
    StatusCode::CREATED
}

/// Start the backend on an ephemeral port.
pub async fn spawn_backend() -> (ClientOptions, Seen) {
    let seen = Seen::default();
    let app = Router::new()
        .route("/api/admin/auth/login", get(admin_login))
        .route("/api/admin/auth/verify", get(admin_login))
        .route("/api/admin/change-password", post(change_password))
        .route("/api/blogs/admin", get(admin_blogs).post(create_blog))
        .route("/api/blogs/admin/generate-slug", get(generate_slug))
        .route("/api/blogs/public/search", get(search))
        .route("/api/blogs/public/author/{author}", get(by_author))
        .route("/api/diseases", get(diseases))
        .route("/api/diseases/{id}", get(disease))
        .route("/api/clinics", get(clinics))
        .route("/api/appointments", post(appointments))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (ClientOptions::new(format!("http://{addr}")), seen)
}

/// Options pointing at a port nothing listens on.
pub async fn unreachable_backend() -> ClientOptions {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ClientOptions::new(format!("http://{addr}"))
}
