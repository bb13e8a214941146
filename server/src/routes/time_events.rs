// time-event routes

use crate::{
    error::{ApiError, ApiResult},
    routes::{ADMIN_ROLES, TIMING_ROLES, bearer_token},
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use race_core::{
    CoreError, TimeEvent, TimeEventDraft, TimeEventStatus,
    utils::validation::{FieldError, validate_same_id},
};
use serde::Deserialize;
use uuid::Uuid;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/time-events", get(list_time_events).post(create_time_event))
        .route(
            "/time-events/{id}",
            get(get_time_event)
                .put(update_time_event)
                .delete(delete_time_event),
        )
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeEventQuery {
    event_id: Option<Uuid>,
    timing_point: Option<String>,
    race_id: Option<Uuid>,
}

/// Timing clients post the draft as a plain text body holding JSON, so the
/// body is read raw and decoded here instead of through the Json extractor.
async fn create_time_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> ApiResult<impl IntoResponse> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), TIMING_ROLES).await?;

    let draft: TimeEventDraft = serde_json::from_str(&body).map_err(|error| {
        ApiError(CoreError::Validation(
            FieldError::builder()
                .set_field("body")
                .add_user_defined_code("invalid")
                .add_message(format!("body is not a valid time event: {error}"))
                .build()
                .into(),
        ))
    })?;

    let time_event = state.core.create_time_event(draft).await?;
    let location = [(
        header::LOCATION,
        format!("/time-events/{}", time_event.id),
    )];
    let status = match time_event.status {
        TimeEventStatus::Error => {
            let detail = time_event
                .changelog
                .last()
                .map(|entry| entry.comment.clone())
                .unwrap_or_else(|| "time event refused".to_string());
            return Ok((
                StatusCode::BAD_REQUEST,
                location,
                Json(serde_json::json!({ "detail": detail })),
            ));
        }
        // control registrations are acknowledged without a new ranking
        _ if time_event.timing_point == "Template" => StatusCode::OK,
        _ => StatusCode::CREATED,
    };
    Ok((status, location, Json(serde_json::to_value(&time_event).unwrap_or_default())))
}

async fn list_time_events(
    State(state): State<AppState>,
    Query(query): Query<TimeEventQuery>,
) -> ApiResult<Json<Vec<TimeEvent>>> {
    Ok(Json(
        state
            .core
            .list_time_events(
                query.event_id,
                query.timing_point.as_deref(),
                query.race_id,
            )
            .await?,
    ))
}

async fn get_time_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TimeEvent>> {
    Ok(Json(state.core.get_time_event(id).await?))
}

async fn update_time_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(time_event): Json<TimeEvent>,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    validate_same_id(id, time_event.id)?;
    state.core.update_time_event(id, &time_event).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_time_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers);
    state.core.auth.authorize(token.as_deref(), ADMIN_ROLES).await?;
    state.core.delete_time_event(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
