// --------------------------------------------------
// Handles API endpoints for the focus/break session timer.
//
// Durations arrive as validated newtypes: values outside the
// enumerated choices fail JSON extraction and never reach the
// scheduler.
// --------------------------------------------------

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::models::{BreakMinutes, FocusMinutes, SessionCount};
use crate::store::AppState;

#[derive(Debug, Deserialize)]
pub struct FocusInput {
    pub minutes: FocusMinutes,
}

#[derive(Debug, Deserialize)]
pub struct BreakInput {
    pub minutes: BreakMinutes,
}

#[derive(Debug, Deserialize)]
pub struct TotalInput {
    pub sessions: SessionCount,
}

fn bad_request(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection.body_text(), "rejected session update");
    (StatusCode::BAD_REQUEST, rejection.body_text()).into_response()
}

// -----------------------------
// GET /api/session
// Current phase, countdown and session counters
// -----------------------------
pub async fn get_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.snapshot())
}

// -----------------------------
// POST /api/session/toggle
// Start or pause the countdown
// -----------------------------
pub async fn toggle_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.toggle_running())
}

// -----------------------------
// POST /api/session/reset
// -----------------------------
pub async fn reset_session(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.reset())
}

// -----------------------------
// PUT /api/session/focus
// -----------------------------
pub async fn put_focus(
    State(state): State<AppState>,
    input: Result<Json<FocusInput>, JsonRejection>,
) -> Response {
    match input {
        Ok(Json(i)) => Json(state.session.update_focus_minutes(i.minutes)).into_response(),
        Err(e) => bad_request(e),
    }
}

// -----------------------------
// PUT /api/session/break
// -----------------------------
pub async fn put_break(
    State(state): State<AppState>,
    input: Result<Json<BreakInput>, JsonRejection>,
) -> Response {
    match input {
        Ok(Json(i)) => Json(state.session.update_break_minutes(i.minutes)).into_response(),
        Err(e) => bad_request(e),
    }
}

// -----------------------------
// PUT /api/session/total
// -----------------------------
pub async fn put_total(
    State(state): State<AppState>,
    input: Result<Json<TotalInput>, JsonRejection>,
) -> Response {
    match input {
        Ok(Json(i)) => Json(state.session.update_total_sessions(i.sessions)).into_response(),
        Err(e) => bad_request(e),
    }
}
