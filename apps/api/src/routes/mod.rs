pub mod health;
pub mod sessions;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/schema", get(sessions::handle_get_schema))
        // Sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        // Entries and fields
        .route(
            "/api/v1/sessions/:id/sections/:section/entries",
            post(sessions::handle_add_entry),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section/entries/:index",
            delete(sessions::handle_remove_entry),
        )
        .route("/api/v1/sessions/:id/fields", put(sessions::handle_set_field))
        .route(
            "/api/v1/sessions/:id/fields/multiline",
            put(sessions::handle_set_multiline_field),
        )
        // Skills
        .route("/api/v1/sessions/:id/skills", put(sessions::handle_set_skills))
        .route(
            "/api/v1/sessions/:id/skills/groups",
            get(sessions::handle_skill_groups),
        )
        // Render
        .route(
            "/api/v1/sessions/:id/resume.pdf",
            get(sessions::handle_render_pdf),
        )
        .with_state(state)
}
