use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::patch;
use axum::{Router, extract::State, http::StatusCode, routing::get, routing::put};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::feed::RoomEvent;
use crate::models::{Room, RoomDraft, RoomPatch, Turno, Weekday};
use crate::services::filter::FilterCriteria;
use crate::services::time_context::{Ambient, TimeContext, turno_color};
use crate::state::AppState;

#[derive(Deserialize)]
struct StatusUpdateRequest {
    status: bool,
}

#[derive(Serialize)]
struct TimeContextResponse {
    turno: Turno,
    dia_semana: Weekday,
    ambient: Ambient,
    colors: BTreeMap<&'static str, &'static str>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/rooms", get(list_rooms).post(create_room))
        .route("/rooms/visible", get(visible_rooms))
        .route("/rooms/{id}", put(update_room).delete(delete_room))
        .route("/rooms/{id}/status", patch(update_room_status))
        .route("/context", get(time_context))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1")
        .execute(&state.db)
        .await
        .map_err(AppError::Fetch)?;
    Ok(StatusCode::OK)
}

/// Authoritative list straight from the store, newest first.
async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<Room>>, AppError> {
    let rooms = state.store.list().await?;
    Ok(Json(rooms))
}

/// Filtered projection of the live view. Empty query params are unset
/// predicates and match everything.
async fn visible_rooms(
    State(state): State<AppState>,
    Query(criteria): Query<FilterCriteria>,
) -> Result<Json<Vec<Room>>, AppError> {
    let mut view = state.view.lock().await;
    view.set_criteria(criteria);
    Ok(Json(view.visible()))
}

async fn create_room(
    State(state): State<AppState>,
    Json(draft): Json<RoomDraft>,
) -> Result<Json<Room>, AppError> {
    let room = state.store.create(draft).await?;
    debug!("created room {}", room.id);
    state.feed.publish(RoomEvent::Insert(room.clone()));
    Ok(Json(room))
}

async fn update_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<RoomDraft>,
) -> Result<Json<Room>, AppError> {
    let room = state.store.update(&id, draft).await?;
    state
        .feed
        .publish(RoomEvent::Update(RoomPatch::from_room(&room)));
    Ok(Json(room))
}

async fn update_room_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> Result<StatusCode, AppError> {
    let updated_at = state.store.update_status(&id, req.status).await?;
    state
        .feed
        .publish(RoomEvent::Update(RoomPatch::status_only(
            &id, req.status, updated_at,
        )));
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.store.delete(&id).await?;
    state.feed.publish(RoomEvent::Delete { id });
    Ok(StatusCode::NO_CONTENT)
}

/// Current shift/weekday defaults plus the monitored ambient mode and its
/// color table. Shift and weekday are recomputed on demand; ambient comes
/// from the fixed-interval monitor.
async fn time_context(State(state): State<AppState>) -> Json<TimeContextResponse> {
    let ctx = TimeContext::now();
    let ambient = *state.ambient.read().await;

    let colors = Turno::ALL
        .iter()
        .map(|turno| (turno.as_str(), turno_color(ambient, *turno)))
        .collect();

    Json(TimeContextResponse {
        turno: ctx.turno,
        dia_semana: ctx.dia_semana,
        ambient,
        colors,
    })
}
