// --------------------------------------------------
// Handles API endpoints for the task list.
//
// Responsibilities:
// - List tasks in insertion order with progress
// - Add a task (blank titles are ignored)
// - Toggle a task's completion flag
// --------------------------------------------------

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Task, TaskProgress};
use crate::store::AppState;
use crate::tracker::TaskTracker;

#[derive(Debug, Serialize, Deserialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
    pub progress: TaskProgress,
}

impl TasksResponse {
    fn from_tracker(tracker: &TaskTracker) -> Self {
        Self {
            tasks: tracker.tasks().to_vec(),
            progress: tracker.progress(),
        }
    }
}

// -----------------------------
// GET /api/tasks
// Returns every task plus completion progress
// -----------------------------
pub async fn get_tasks(State(state): State<AppState>) -> impl IntoResponse {
    let tracker = state.tracker.lock();
    Json(TasksResponse::from_tracker(&tracker))
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskInput {
    pub title: String,
}

// -----------------------------
// POST /api/tasks
// Appends a task; a blank title leaves the list unchanged
// -----------------------------
pub async fn create_task(
    State(state): State<AppState>,
    Json(input): Json<CreateTaskInput>,
) -> impl IntoResponse {
    let mut tracker = state.tracker.lock();
    tracker.add_task(&input.title);
    Json(TasksResponse::from_tracker(&tracker))
}

// -----------------------------
// POST /api/tasks/:id/toggle
// Flips completion; unknown ids are ignored
// -----------------------------
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let id = match Uuid::parse_str(&id) {
        Ok(u) => u,
        Err(_) => return (StatusCode::BAD_REQUEST, "invalid id").into_response(),
    };

    let mut tracker = state.tracker.lock();
    tracker.toggle_task(id);
    Json(TasksResponse::from_tracker(&tracker)).into_response()
}

// -----------------------------
// GET /api/tasks/progress
// -----------------------------
pub async fn get_progress(State(state): State<AppState>) -> impl IntoResponse {
    let progress = state.tracker.lock().progress();
    Json(progress)
}
