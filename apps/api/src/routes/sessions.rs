use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{FieldSpec, ResumeData, Section};
use crate::render::skills::SkillGroups;
use crate::render::suggested_filename;
use crate::state::AppState;
use crate::store::FieldPath;

fn parse_section(raw: &str) -> Result<Section, AppError> {
    raw.parse::<Section>().map_err(AppError::NotFound)
}

// ────────────────────────────────────────────────────────────────────────────
// Schema
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SectionSchema {
    pub section: Section,
    pub fields: &'static [FieldSpec],
}

/// GET /api/v1/schema
pub async fn handle_get_schema() -> Json<Vec<SectionSchema>> {
    Json(
        Section::ALL
            .into_iter()
            .map(|section| SectionSchema {
                section,
                fields: section.schema(),
            })
            .collect(),
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeData>, AppError> {
    Ok(Json(state.sessions.snapshot(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AddEntryResponse {
    pub index: usize,
    pub len: usize,
}

/// POST /api/v1/sessions/:id/sections/:section/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path((id, section)): Path<(Uuid, String)>,
) -> Result<Json<AddEntryResponse>, AppError> {
    let section = parse_section(&section)?;
    let (index, len) = state
        .sessions
        .with_store(id, |store| {
            let index = store.add_entry(section);
            (index, store.section(section).len())
        })
        .await?;
    info!(session_id = %id, %section, index, "Entry added");
    Ok(Json(AddEntryResponse { index, len }))
}

#[derive(Serialize)]
pub struct RemoveEntryResponse {
    pub len: usize,
}

/// DELETE /api/v1/sessions/:id/sections/:section/entries/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((id, section, index)): Path<(Uuid, String, usize)>,
) -> Result<Json<RemoveEntryResponse>, AppError> {
    let section = parse_section(&section)?;
    let len = state
        .sessions
        .with_store(id, |store| {
            store
                .remove_entry(section, index)
                .map(|()| store.section(section).len())
        })
        .await??;
    info!(session_id = %id, %section, index, "Entry removed");
    Ok(Json(RemoveEntryResponse { len }))
}

// ────────────────────────────────────────────────────────────────────────────
// Field edits
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetFieldRequest {
    pub path: FieldPath,
    pub value: String,
}

/// PUT /api/v1/sessions/:id/fields
pub async fn handle_set_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetFieldRequest>,
) -> Result<StatusCode, AppError> {
    state
        .sessions
        .with_store(id, |store| store.set_field(&req.path, req.value))
        .await??;
    debug!(session_id = %id, path = ?req.path, "Field set");
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SetMultilineRequest {
    pub path: FieldPath,
    pub raw_text: String,
}

#[derive(Serialize)]
pub struct SetMultilineResponse {
    pub lines: Vec<String>,
}

/// PUT /api/v1/sessions/:id/fields/multiline
pub async fn handle_set_multiline_field(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetMultilineRequest>,
) -> Result<Json<SetMultilineResponse>, AppError> {
    let lines = state
        .sessions
        .with_store(id, |store| store.set_multiline_field(&req.path, &req.raw_text))
        .await??;
    debug!(session_id = %id, path = ?req.path, lines = lines.len(), "Multi-line field set");
    Ok(Json(SetMultilineResponse { lines }))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetSkillsRequest {
    pub buckets: Vec<String>,
}

#[derive(Serialize)]
pub struct SetSkillsResponse {
    pub skills: Vec<String>,
}

/// PUT /api/v1/sessions/:id/skills
pub async fn handle_set_skills(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetSkillsRequest>,
) -> Result<Json<SetSkillsResponse>, AppError> {
    let skills = state
        .sessions
        .with_store(id, |store| store.set_skills(req.buckets.as_slice()).to_vec())
        .await?;
    Ok(Json(SetSkillsResponse { skills }))
}

/// GET /api/v1/sessions/:id/skills/groups
pub async fn handle_skill_groups(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SkillGroups>, AppError> {
    let data = state.sessions.snapshot(id).await?;
    Ok(Json(state.renderer.skill_groups(&data.skills)))
}

// ────────────────────────────────────────────────────────────────────────────
// Render
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/resume.pdf
pub async fn handle_render_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let data = state.sessions.snapshot(id).await?;
    let filename = suggested_filename(&data.personal.full_name);

    // CPU-bound; runs on an owned snapshot so edits are not held up.
    let renderer = state.renderer.clone();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&data))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    info!(session_id = %id, bytes = pdf.len(), %filename, "Resume rendered");

    let disposition =
        HeaderValue::from_bytes(format!("attachment; filename=\"{filename}\"").as_bytes())
            .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
