// raceplan routes

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
use race_core::{Raceplan, utils::validation::validate_same_id};
use serde::Deserialize;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/raceplans/generate-raceplan-for-event",
            post(generate_raceplan_for_event),
        )
        .route("/raceplans", get(list_raceplans))
        .route(
            "/raceplans/{id}",
            get(get_raceplan)
                .put(update_raceplan)
                .delete(delete_raceplan),
        )
}

#[derive(Debug, Deserialize)]
struct GenerateRaceplanRequest {
    event_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaceplanQuery {
    event_id: Option<Uuid>,
}

async fn generate_raceplan_for_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateRaceplanRequest>,
) -> ApiResult<impl IntoResponse> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    let raceplan_id = state
        .core
        .generate_raceplan_for_event(token.as_deref().unwrap_or_default(), request.event_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/raceplans/{raceplan_id}"))],
    ))
}

async fn list_raceplans(
    State(state): State<AppState>,
    Query(query): Query<RaceplanQuery>,
) -> ApiResult<Json<Vec<Raceplan>>> {
    Ok(Json(state.core.list_raceplans(query.event_id).await?))
}

async fn get_raceplan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Raceplan>> {
    Ok(Json(state.core.get_raceplan(id).await?))
}

async fn update_raceplan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(raceplan): Json<Raceplan>,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    validate_same_id(id, raceplan.id)?;
    state.core.update_raceplan(id, &raceplan).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_raceplan(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    state.core.delete_raceplan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
