use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use crate::common::{api_config, services, TEST_BEARER_TOKEN};
use todolist::constants::USER_ID_HEADER;
use todolist::web::create_app;
use todolist::web::state::AppState;

mod auth;
mod tasks;
mod todo_lists;

pub fn app(pool: &SqlitePool) -> Router {
    create_app(AppState::new(api_config(), services(pool)))
}

/// Authenticated request on behalf of `user`
pub fn request(method: Method, uri: &str, user: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {TEST_BEARER_TOKEN}"))
        .header(USER_ID_HEADER, user);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the JSON body, `Value::Null` when empty
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
