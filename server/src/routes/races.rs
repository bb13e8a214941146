// race routes, with their start entries and race results

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
    routing::get,
};
use race_core::{Race, RaceResult, StartEntry, StartEntryDraft, utils::validation::validate_same_id};
use serde::Deserialize;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/races", get(list_races))
        .route(
            "/races/{id}",
            get(get_race).put(update_race).delete(delete_race),
        )
        .route(
            "/races/{id}/start-entries",
            get(get_start_entries).post(add_start_entry),
        )
        .route(
            "/races/{id}/start-entries/{start_entry_id}",
            axum::routing::delete(remove_start_entry),
        )
        .route("/races/{id}/race-results", get(get_race_results))
        .route(
            "/races/{id}/race-results/{race_result_id}",
            get(get_race_result)
                .put(update_race_result)
                .delete(delete_race_result),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaceQuery {
    event_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RaceResultQuery {
    timing_point: Option<String>,
}

async fn list_races(
    State(state): State<AppState>,
    Query(query): Query<RaceQuery>,
) -> ApiResult<Json<Vec<Race>>> {
    Ok(Json(state.core.list_races(query.event_id).await?))
}

async fn get_race(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Json<Race>> {
    Ok(Json(state.core.get_race(id).await?))
}

async fn update_race(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(race): Json<Race>,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    validate_same_id(id, race.id())?;
    state.core.update_race(id, &race).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_race(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    state.core.delete_race(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_start_entries(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<StartEntry>>> {
    Ok(Json(state.core.get_start_entries_for_race(id).await?))
}

async fn add_start_entry(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(draft): Json<StartEntryDraft>,
) -> ApiResult<impl IntoResponse> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    let start_entry_id = state.core.add_start_entry(id, draft).await?;
    Ok((
        StatusCode::CREATED,
        [(
            header::LOCATION,
            format!("/races/{id}/start-entries/{start_entry_id}"),
        )],
    ))
}

async fn remove_start_entry(
    State(state): State<AppState>,
    Path((id, start_entry_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    state.core.remove_start_entry(id, start_entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_race_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RaceResultQuery>,
) -> ApiResult<Json<Vec<RaceResult>>> {
    Ok(Json(
        state
            .core
            .get_race_results_for_race(id, query.timing_point.as_deref())
            .await?,
    ))
}

async fn get_race_result(
    State(state): State<AppState>,
    Path((_id, race_result_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<RaceResult>> {
    Ok(Json(state.core.get_race_result(race_result_id).await?))
}

async fn update_race_result(
    State(state): State<AppState>,
    Path((_id, race_result_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
    Json(race_result): Json<RaceResult>,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    validate_same_id(race_result_id, race_result.id)?;
    state
        .core
        .update_race_result(race_result_id, &race_result)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_race_result(
    State(state): State<AppState>,
    Path((_id, race_result_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    state.core.delete_race_result(race_result_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
