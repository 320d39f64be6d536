use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::common::{page_window, PaginationParams};
use crate::models::{
    CollabType, Collaboration, CollaborationInput, CollaborationView, Priority, TriState,
};
use crate::repositories::{CollaborationRepository, Repository};
use crate::services::{ProvisioningService, ResponsibleResolver};
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// Full settable field set, used by both create and the full-replace update
#[derive(Debug, Deserialize, ToSchema)]
pub struct CollaborationRequest {
    pub company_id: Uuid,
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

impl From<CollaborationRequest> for CollaborationInput {
    fn from(r: CollaborationRequest) -> Self {
        Self {
            company_id: r.company_id,
            project_id: r.project_id,
            person_id: r.person_id,
            responsible: r.responsible,
            comment: r.comment,
            contacted: r.contacted,
            successful: r.successful,
            letter: r.letter,
            meeting: r.meeting,
            priority: r.priority,
            amount: r.amount,
            contact_in_future: r.contact_in_future,
            collab_type: r.collab_type,
        }
    }
}

/// Plain collaboration row, without the joined display names
#[derive(Debug, Serialize, ToSchema)]
pub struct CollaborationResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub project_id: Uuid,
    pub person_id: Option<Uuid>,
    pub responsible: Option<String>,
    pub comment: Option<String>,
    pub contacted: bool,
    #[schema(value_type = Option<bool>)]
    pub successful: TriState,
    pub letter: bool,
    #[schema(value_type = Option<bool>)]
    pub meeting: TriState,
    pub priority: Priority,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<bool>)]
    pub contact_in_future: TriState,
    pub collab_type: Option<CollabType>,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Collaboration> for CollaborationResponse {
    fn from(c: Collaboration) -> Self {
        Self {
            id: c.id,
            company_id: c.company_id,
            project_id: c.project_id,
            person_id: c.person_id,
            responsible: c.responsible,
            comment: c.comment,
            contacted: c.contacted,
            successful: c.successful,
            letter: c.letter,
            meeting: c.meeting,
            priority: c.priority,
            amount: c.amount,
            contact_in_future: c.contact_in_future,
            collab_type: c.collab_type,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Collaboration joined with company, project and contact names, plus the
/// resolved responsible account when one matches
#[derive(Debug, Serialize, ToSchema)]
pub struct CollaborationViewResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub project_id: Uuid,
    pub project_name: String,
    pub person_id: Option<Uuid>,
    pub person_name: Option<String>,
    pub responsible: Option<String>,
    pub responsible_user_id: Option<Uuid>,
    pub comment: Option<String>,
    pub contacted: bool,
    #[schema(value_type = Option<bool>)]
    pub successful: TriState,
    pub letter: bool,
    #[schema(value_type = Option<bool>)]
    pub meeting: TriState,
    pub priority: Priority,
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    #[schema(value_type = Option<bool>)]
    pub contact_in_future: TriState,
    pub collab_type: Option<CollabType>,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<CollaborationView> for CollaborationViewResponse {
    fn from(v: CollaborationView) -> Self {
        Self {
            id: v.id,
            company_id: v.company_id,
            company_name: v.company_name,
            project_id: v.project_id,
            project_name: v.project_name,
            person_id: v.person_id,
            person_name: v.person_name,
            responsible: v.responsible,
            responsible_user_id: v.responsible_user_id,
            comment: v.comment,
            contacted: v.contacted,
            successful: v.successful,
            letter: v.letter,
            meeting: v.meeting,
            priority: v.priority,
            amount: v.amount,
            contact_in_future: v.contact_in_future,
            collab_type: v.collab_type,
            created_at: v.created_at,
            updated_at: v.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CollaborationListResponse {
    pub data: Vec<CollaborationViewResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Optional narrowing filters for the collaboration list
#[derive(Debug, Deserialize, IntoParams)]
pub struct CollaborationFilterParams {
    pub project_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
}

// ============ Handlers ============

/// Create a new collaboration
#[utoipa::path(
    post,
    path = "/api/collaborations",
    request_body = CollaborationRequest,
    responses(
        (status = 200, description = "Collaboration created successfully", body = CollaborationViewResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Project not found"),
        (status = 409, description = "Company already collaborates on this project")
    ),
    tag = "Collaborations"
)]
pub async fn create_collaboration(
    State(state): State<AppState>,
    Json(payload): Json<CollaborationRequest>,
) -> AppResult<Json<CollaborationViewResponse>> {
    let input: CollaborationInput = payload.into();

    let view = ProvisioningService::create(&state.db, &input).await?;
    Ok(Json(view.into()))
}

/// List collaborations, optionally filtered by project and/or company
#[utoipa::path(
    get,
    path = "/api/collaborations",
    params(CollaborationFilterParams, PaginationParams),
    responses(
        (status = 200, description = "List of collaborations", body = CollaborationListResponse)
    ),
    tag = "Collaborations"
)]
pub async fn list_collaborations(
    State(state): State<AppState>,
    Query(filter): Query<CollaborationFilterParams>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<CollaborationListResponse>> {
    let (limit, offset) = page_window(&params);

    let mut views = CollaborationRepository::list_views(
        &state.db,
        filter.project_id,
        filter.company_id,
        limit,
        offset,
    )
    .await?;
    ResponsibleResolver::annotate(&state.db, &mut views).await?;

    let total =
        CollaborationRepository::count_filtered(&state.db, filter.project_id, filter.company_id)
            .await?;

    Ok(Json(CollaborationListResponse {
        data: views.into_iter().map(|v| v.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a collaboration by ID
#[utoipa::path(
    get,
    path = "/api/collaborations/{id}",
    params(
        ("id" = Uuid, Path, description = "Collaboration ID")
    ),
    responses(
        (status = 200, description = "Collaboration details", body = CollaborationViewResponse),
        (status = 404, description = "Collaboration not found")
    ),
    tag = "Collaborations"
)]
pub async fn get_collaboration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CollaborationViewResponse>> {
    let mut view = CollaborationRepository::find_view(&state.db, id).await?;
    ResponsibleResolver::annotate(&state.db, std::slice::from_mut(&mut view)).await?;

    Ok(Json(view.into()))
}

/// Replace every settable field of a collaboration
#[utoipa::path(
    put,
    path = "/api/collaborations/{id}",
    params(
        ("id" = Uuid, Path, description = "Collaboration ID")
    ),
    request_body = CollaborationRequest,
    responses(
        (status = 200, description = "Collaboration updated successfully", body = CollaborationViewResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Collaboration not found"),
        (status = 409, description = "Company already collaborates on this project")
    ),
    tag = "Collaborations"
)]
pub async fn update_collaboration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CollaborationRequest>,
) -> AppResult<Json<CollaborationViewResponse>> {
    let input: CollaborationInput = payload.into();

    let view = ProvisioningService::update(&state.db, id, &input).await?;
    Ok(Json(view.into()))
}

/// Delete a collaboration
#[utoipa::path(
    delete,
    path = "/api/collaborations/{id}",
    params(
        ("id" = Uuid, Path, description = "Collaboration ID")
    ),
    responses(
        (status = 200, description = "Collaboration deleted successfully"),
        (status = 404, description = "Collaboration not found")
    ),
    tag = "Collaborations"
)]
pub async fn delete_collaboration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<()> {
    CollaborationRepository::delete(&state.db, id).await?;
    Ok(())
}
