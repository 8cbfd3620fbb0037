use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query},
    http::{header, HeaderMap, Method, StatusCode},
    routing::{any, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// What `/echo` saw of the incoming request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Echo {
    pub method: String,
    pub query: BTreeMap<String, String>,
    pub content_type: Option<String>,
    pub body: Value,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", any(echo))
        .route("/status/{code}", any(status))
        .route("/options", get(options))
        .route("/text", get(text))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Reflect method, query, content type and JSON body back to the caller.
/// A body that is not JSON is echoed as a string; an empty body as `null`.
async fn echo(
    method: Method,
    headers: HeaderMap,
    Query(query): Query<BTreeMap<String, String>>,
    body: String,
) -> Json<Echo> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };
    Json(Echo {
        method: method.to_string(),
        query,
        content_type,
        body,
    })
}

/// Answer with the requested status code and its reason phrase.
async fn status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    let reason = status.canonical_reason().unwrap_or_default().to_string();
    Ok((status, reason))
}

async fn options() -> Json<Value> {
    Json(json!({
        "payload": [
            { "id": 1, "text": "Monster" },
            { "id": 2, "text": "Spell" },
            { "id": 3, "text": "Trap" },
        ]
    }))
}

async fn text() -> &'static str {
    "plain text, not json"
}
