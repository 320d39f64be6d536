use axum::{extract::State, Json};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::collaboration::{CollaborationResponse, CollaborationViewResponse};
use crate::models::{CollabType, CopyFlags, Priority, SharedCollaborationFields, TriState};
use crate::services::ProvisioningService;
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// One collaboration per candidate company, all sharing the same attributes
#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkCreateRequest {
    pub company_ids: Vec<Uuid>,
    pub project_id: Uuid,
    pub person_id: Option<Uuid>,
    pub responsible: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub contacted: bool,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub successful: TriState,
    #[serde(default)]
    pub letter: bool,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub meeting: TriState,
    #[serde(default)]
    pub priority: Priority,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub contact_in_future: TriState,
    pub collab_type: Option<CollabType>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkCreateResponse {
    pub created: Vec<CollaborationViewResponse>,
    /// Companies skipped as existing collaborators; absent when none were
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped_companies: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CopyCollaborationsRequest {
    pub source_project_id: Uuid,
    pub target_project_id: Uuid,
    #[serde(default)]
    pub copy_contact_person: bool,
    #[serde(default)]
    pub copy_type: bool,
    #[serde(default)]
    pub copy_priority: bool,
    #[serde(default)]
    pub copy_contact_in_future: bool,
    #[serde(default)]
    pub copy_responsible: bool,
    #[serde(default)]
    pub copy_comment: bool,
    /// Carries contacted, letter and meeting together
    #[serde(default)]
    pub copy_progress: bool,
    /// Carries `successful`
    #[serde(default)]
    pub copy_status: bool,
    #[serde(default)]
    pub copy_amount: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CopyCollaborationsResponse {
    pub created: u64,
    pub skipped: u64,
    pub source_project_id: Uuid,
    pub target_project_id: Uuid,
    pub message: String,
    pub collaborations: Vec<CollaborationResponse>,
}

// ============ Handlers ============

/// Create collaborations for many companies against one project
#[utoipa::path(
    post,
    path = "/api/collaborations/bulk",
    request_body = BulkCreateRequest,
    responses(
        (status = 200, description = "Collaborations created, possibly with skips", body = BulkCreateResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Project not found"),
        (status = 409, description = "Every candidate company already collaborates on the project")
    ),
    tag = "Collaborations"
)]
pub async fn bulk_create_collaborations(
    State(state): State<AppState>,
    Json(payload): Json<BulkCreateRequest>,
) -> AppResult<Json<BulkCreateResponse>> {
    let shared = SharedCollaborationFields {
        person_id: payload.person_id,
        responsible: payload.responsible,
        comment: payload.comment,
        contacted: payload.contacted,
        successful: payload.successful,
        letter: payload.letter,
        meeting: payload.meeting,
        priority: payload.priority,
        amount: payload.amount,
        contact_in_future: payload.contact_in_future,
        collab_type: payload.collab_type,
    };

    let outcome = ProvisioningService::bulk_create(
        &state.db,
        payload.project_id,
        &payload.company_ids,
        &shared,
    )
    .await?;

    let (skipped_companies, message) = if outcome.skipped_companies.is_empty() {
        (None, None)
    } else {
        let message = format!(
            "Skipped companies already collaborating on this project: {}",
            outcome.skipped_companies.join(", ")
        );
        (Some(outcome.skipped_companies), Some(message))
    };

    Ok(Json(BulkCreateResponse {
        created: outcome.created.into_iter().map(|v| v.into()).collect(),
        skipped_companies,
        message,
    }))
}

/// Copy a project's collaborations into another project
#[utoipa::path(
    post,
    path = "/api/collaborations/copy",
    request_body = CopyCollaborationsRequest,
    responses(
        (status = 200, description = "Collaborations copied, possibly with skips", body = CopyCollaborationsResponse),
        (status = 400, description = "Source and target project are the same"),
        (status = 404, description = "Project or source collaborations not found"),
        (status = 409, description = "Every source company already collaborates in the target project")
    ),
    tag = "Collaborations"
)]
pub async fn copy_collaborations(
    State(state): State<AppState>,
    Json(payload): Json<CopyCollaborationsRequest>,
) -> AppResult<Json<CopyCollaborationsResponse>> {
    let flags = CopyFlags {
        contact_person: payload.copy_contact_person,
        collab_type: payload.copy_type,
        priority: payload.copy_priority,
        contact_in_future: payload.copy_contact_in_future,
        responsible: payload.copy_responsible,
        comment: payload.copy_comment,
        progress: payload.copy_progress,
        status: payload.copy_status,
        amount: payload.copy_amount,
    };

    let outcome = ProvisioningService::copy_project(
        &state.db,
        payload.source_project_id,
        payload.target_project_id,
        &flags,
    )
    .await?;

    let message = format!(
        "Copied {} collaborations, skipped {}",
        outcome.created, outcome.skipped
    );

    Ok(Json(CopyCollaborationsResponse {
        created: outcome.created,
        skipped: outcome.skipped,
        source_project_id: outcome.source_project_id,
        target_project_id: outcome.target_project_id,
        message,
        collaborations: outcome
            .collaborations
            .into_iter()
            .map(|c| c.into())
            .collect(),
    }))
}
