//! fallguard-api
//!
//! HTTP service behind the marketing site: serves the localized
//! questionnaire, drives the step controller, scores completed assessments,
//! captures leads and forwards client analytics events.
//!
//! The router is exposed from the library so integration tests can drive it
//! in-process.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};

use state::AppState;

/// All routes, with request logging. CORS is layered on by the binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route(
            "/questionnaire",
            get(routes::questionnaire::get_questionnaire),
        )
        .route(
            "/questionnaire/transition",
            post(routes::questionnaire::transition),
        )
        .route(
            "/assessments/score",
            post(routes::assessments::score_assessment),
        )
        .route("/leads", post(routes::leads::create_lead))
        .route("/events", post(routes::events::track_event))
        .layer(axum_mw::from_fn(middleware::request_log::log_request))
        .with_state(state)
}
