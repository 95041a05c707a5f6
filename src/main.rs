// Define data modules
mod config; // CLI / env configuration
mod error; // Boundary validation errors
mod models; // Data structures (Task, Phase, SessionConfig, etc.)
mod routes_session; // HTTP handlers for the session timer
mod routes_tasks; // HTTP handlers for the task list
mod scheduler; // Focus/break state machine
mod session; // Scheduler host owning the tick source
mod store; // In-memory application state
mod timer; // Periodic tick source
mod tracker; // Task list and progress

use std::path::Path;

// Import axum routing utilities and Router
use axum::{
    routing::{get, post, put}, // HTTP method helpers
    Router,                    // Main router type
};
use clap::Parser;
use tower_http::services::ServeDir; // Used to serve static files (HTML/CSS/JS)

use crate::config::{Args, Config};
use crate::store::AppState;

fn build_router(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        // tasks
        .route("/tasks", get(routes_tasks::get_tasks).post(routes_tasks::create_task))
        .route("/tasks/progress", get(routes_tasks::get_progress))
        .route("/tasks/:id/toggle", post(routes_tasks::toggle_task))
        // session timer
        .route("/session", get(routes_session::get_session))
        .route("/session/toggle", post(routes_session::toggle_session))
        .route("/session/reset", post(routes_session::reset_session))
        .route("/session/focus", put(routes_session::put_focus))
        .route("/session/break", put(routes_session::put_break))
        .route("/session/total", put(routes_session::put_total))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .nest_service("/", ServeDir::new(static_dir))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}

#[tokio::main]
async fn main() {
    let config = match Config::from_args(Args::parse()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let state = AppState::new(config.session);
    state.seed_tasks(&config.tasks);

    let app = build_router(state.clone(), &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %config.bind, error = %e, "bind failed");
            std::process::exit(1);
        }
    };

    tracing::info!(
        addr = %config.bind,
        focus_minutes = config.session.focus_minutes.get(),
        break_minutes = config.session.break_minutes.get(),
        sessions = config.session.total_sessions.get(),
        "focus companion listening"
    );
    tracing::info!(
        api = %format!("http://{}/api", config.bind),
        static_dir = %config.static_dir.display(),
        "serving"
    );

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    state.session.teardown();

    if let Err(e) = served {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
    tracing::info!("shut down");
}
