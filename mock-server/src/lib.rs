use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, HeaderMap, Method, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    pub id: u64,
    pub comment: String,
}

#[derive(Deserialize)]
pub struct CreateComment {
    pub comment: String,
}

/// What `/echo` saw of the request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Echo {
    pub method: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<u64, Comment>>>;

/// The fixture every fresh server starts with.
pub fn seed_comment() -> Comment {
    Comment {
        id: 12,
        comment: "Hey there".to_string(),
    }
}

pub fn app() -> Router {
    let seed = seed_comment();
    let db: Db = Arc::new(RwLock::new(HashMap::from([(seed.id, seed)])));
    Router::new()
        .route("/status/{code}", any(respond_with_status))
        .route("/echo", any(echo))
        .route("/comments", post(create_comment))
        .route("/comments/{id}", get(get_comment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn respond_with_status(Path(code): Path<u16>) -> Result<(StatusCode, String), StatusCode> {
    if !(200..=599).contains(&code) {
        return Err(StatusCode::BAD_REQUEST);
    }
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    // These statuses carry no body on the wire.
    if matches!(code, 204 | 304) {
        return Ok((status, String::new()));
    }
    Ok((status, format!("{{\"status\":{code}}}")))
}

async fn echo(
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: String,
) -> Json<Echo> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(Echo {
        method: method.to_string(),
        query,
        content_type,
        body: (!body.is_empty()).then_some(body),
    })
}

async fn create_comment(
    State(db): State<Db>,
    Json(input): Json<CreateComment>,
) -> (StatusCode, Json<Comment>) {
    let mut comments = db.write().await;
    let id = comments.keys().max().map_or(1, |max| max + 1);
    let comment = Comment {
        id,
        comment: input.comment,
    };
    comments.insert(id, comment.clone());
    (StatusCode::CREATED, Json(comment))
}

async fn get_comment(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Comment>, StatusCode> {
    let comments = db.read().await;
    comments.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
