// startlist routes

use crate::{
    error::ApiResult,
    routes::{ADMIN_ROLES, bearer_token},
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use race_core::Startlist;
use serde::Deserialize;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/startlists/generate-startlist-for-event",
            post(generate_startlist_for_event),
        )
        .route("/startlists", get(list_startlists))
        // no PUT or POST on a single startlist; regenerate instead
        .route("/startlists/{id}", get(get_startlist).delete(delete_startlist))
}

#[derive(Debug, Deserialize)]
struct GenerateStartlistRequest {
    event_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartlistQuery {
    event_id: Option<Uuid>,
}

async fn generate_startlist_for_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateStartlistRequest>,
) -> ApiResult<impl IntoResponse> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    let startlist_id = state
        .core
        .generate_startlist_for_event(token.as_deref().unwrap_or_default(), request.event_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/startlists/{startlist_id}"))],
    ))
}

async fn list_startlists(
    State(state): State<AppState>,
    Query(query): Query<StartlistQuery>,
) -> ApiResult<Json<Vec<Startlist>>> {
    Ok(Json(state.core.list_startlists(query.event_id).await?))
}

async fn get_startlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Startlist>> {
    Ok(Json(state.core.get_startlist(id).await?))
}

async fn delete_startlist(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    state.core.delete_startlist(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
