use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    db::StoreError,
    error::ApiError,
    model::PostDraft,
    schema::{FilterOptions, PostSchema},
    AppState,
};

type HandlerResult<T> = Result<T, (StatusCode, Json<serde_json::Value>)>;

pub async fn health_checker_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Ids travel as signed 64-bit decimals, so anything outside `0..=i64::MAX`
/// is malformed rather than merely absent.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .and_then(|id| u64::try_from(id).ok())
        .ok_or_else(|| ApiError::InvalidId(raw.to_owned()))
}

/// Decode and validate a create/update body. A `Content-Type` header is not
/// required; the bytes only have to be a JSON object.
fn parse_draft(body: &[u8]) -> Result<PostDraft, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(ApiError::InvalidBody)?;
    // serde would otherwise accept `["title", "content"]` as a struct
    if !value.is_object() {
        return Err(ApiError::InvalidBody(serde::de::Error::custom(
            "expected a JSON object",
        )));
    }
    let schema: PostSchema = serde_json::from_value(value).map_err(ApiError::InvalidBody)?;

    let missing = schema.missing_fields();
    if !missing.is_empty() {
        return Err(ApiError::MissingFields(missing));
    }

    Ok(schema.into_draft())
}

pub async fn post_list_handler(
    Query(pairs): Query<Vec<(String, String)>>,
    State(app_state): State<Arc<AppState>>,
) -> HandlerResult<impl IntoResponse> {
    let term = FilterOptions::from_pairs(pairs).term.unwrap_or_default();

    let posts = app_state
        .db
        .list(&term)
        .await
        .map_err(ApiError::from)?;

    tracing::debug!(term = %term, results = posts.len(), "listed posts");
    Ok(Json(posts))
}

pub async fn create_post_handler(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> HandlerResult<impl IntoResponse> {
    let draft = parse_draft(&body)?;

    let id = app_state.db.create(draft).await.map_err(ApiError::from)?;

    // Respond with what the store holds, including the assigned id and timestamps.
    let post = app_state
        .db
        .get(id)
        .await
        .map_err(|e| match e {
            StoreError::NotFound(id) => {
                StoreError::Internal(format!("post {id} missing right after create"))
            }
            other => other,
        })
        .map_err(ApiError::from)?;

    tracing::info!(id = post.id, "created post");
    Ok((StatusCode::CREATED, Json(post)))
}

/// Everything under `/posts/`. The token is parsed before the method is
/// looked at, so a malformed id is a 400 whatever the verb.
pub async fn post_item_handler(
    method: Method,
    Path(token): Path<String>,
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> HandlerResult<Response> {
    let id = parse_id(&token)?;

    let response = match method {
        Method::GET => get_post(&app_state, id).await?.into_response(),
        Method::PUT => edit_post(&app_state, id, &body).await?.into_response(),
        Method::DELETE => delete_post(&app_state, id).await?.into_response(),
        other => return Err(ApiError::MethodNotAllowed(other).into()),
    };

    Ok(response)
}

async fn get_post(app_state: &AppState, id: u64) -> Result<impl IntoResponse, ApiError> {
    let post = app_state.db.get(id).await?;

    Ok(Json(post))
}

async fn edit_post(
    app_state: &AppState,
    id: u64,
    body: &[u8],
) -> Result<impl IntoResponse, ApiError> {
    let draft = parse_draft(body)?;

    let post = app_state.db.update(id, draft).await?;

    tracing::info!(id, "updated post");
    Ok(Json(post))
}

async fn delete_post(app_state: &AppState, id: u64) -> Result<impl IntoResponse, ApiError> {
    app_state.db.delete(id).await?;

    tracing::info!(id, "deleted post");
    Ok(StatusCode::NO_CONTENT)
}
