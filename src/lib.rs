// Library crate for CollabTrack
// Exports modules for use by the server binary and tests

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod services;
pub mod state;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    bulk_create_collaborations, copy_collaborations, create_collaboration, create_company,
    create_person, create_project, create_user, delete_collaboration, delete_company,
    delete_person, delete_project, get_collaboration, get_company, get_person, get_project,
    list_collaborations, list_companies, list_people, list_projects, list_users, resolve_user,
    update_collaboration, update_company, update_person, update_project,
};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "CollabTrack API" }))
        // Collaboration routes
        .route("/api/collaborations", post(create_collaboration))
        .route("/api/collaborations", get(list_collaborations))
        .route("/api/collaborations/bulk", post(bulk_create_collaborations))
        .route("/api/collaborations/copy", post(copy_collaborations))
        .route("/api/collaborations/{id}", get(get_collaboration))
        .route("/api/collaborations/{id}", put(update_collaboration))
        .route("/api/collaborations/{id}", delete(delete_collaboration))
        // Company routes
        .route("/api/companies", post(create_company))
        .route("/api/companies", get(list_companies))
        .route("/api/companies/{id}", get(get_company))
        .route("/api/companies/{id}", put(update_company))
        .route("/api/companies/{id}", delete(delete_company))
        // Project routes
        .route("/api/projects", post(create_project))
        .route("/api/projects", get(list_projects))
        .route("/api/projects/{id}", get(get_project))
        .route("/api/projects/{id}", put(update_project))
        .route("/api/projects/{id}", delete(delete_project))
        // Contact person routes
        .route("/api/people", post(create_person))
        .route("/api/people", get(list_people))
        .route("/api/people/{id}", get(get_person))
        .route("/api/people/{id}", put(update_person))
        .route("/api/people/{id}", delete(delete_person))
        // User registry routes
        .route("/api/users", post(create_user))
        .route("/api/users", get(list_users))
        .route("/api/users/resolve", get(resolve_user))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
