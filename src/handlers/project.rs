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
use crate::models::{CreateProject, Project, UpdateProject};
use crate::repositories::{ProjectRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
    /// Fundraising goal in the organization's currency
    #[schema(value_type = Option<String>)]
    pub fr_goal: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    #[schema(value_type = Option<String>)]
    pub fr_goal: Option<Decimal>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = Option<String>)]
    pub fr_goal: Option<Decimal>,
    pub notes: Option<String>,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            fr_goal: p.fr_goal,
            notes: p.notes,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub data: Vec<ProjectResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Optional name search for the project list
#[derive(Debug, Deserialize, IntoParams)]
pub struct ProjectFilterParams {
    pub name: Option<String>,
}

// ============ Handlers ============

/// Create a new fundraising project
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 200, description = "Project created successfully", body = ProjectResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let create_project = CreateProject {
        name: payload.name,
        fr_goal: payload.fr_goal,
        notes: payload.notes,
    };

    let project = ProjectRepository::create(&state.db, &create_project).await?;
    Ok(Json(project.into()))
}

/// List projects, optionally searching by name
#[utoipa::path(
    get,
    path = "/api/projects",
    params(ProjectFilterParams, PaginationParams),
    responses(
        (status = 200, description = "List of projects", body = ProjectListResponse)
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilterParams>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<ProjectListResponse>> {
    let (limit, offset) = page_window(&params);

    let (projects, total) = match filter.name.as_deref() {
        Some(name) => (
            ProjectRepository::list_by_name(&state.db, name, limit, offset).await?,
            ProjectRepository::count_by_name(&state.db, name).await?,
        ),
        None => (
            ProjectRepository::list(&state.db, limit, offset).await?,
            ProjectRepository::count(&state.db).await?,
        ),
    };

    Ok(Json(ProjectListResponse {
        data: projects.into_iter().map(|p| p.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a project by ID
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectResponse),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectResponse>> {
    let project = ProjectRepository::find_by_id(&state.db, id).await?;
    Ok(Json(project.into()))
}

/// Update a project
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let update_project = UpdateProject {
        name: payload.name,
        fr_goal: payload.fr_goal,
        notes: payload.notes,
    };

    let project = ProjectRepository::update(&state.db, id, &update_project).await?;
    Ok(Json(project.into()))
}

/// Delete a project and, through the cascade, its collaborations
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project deleted successfully"),
        (status = 404, description = "Project not found")
    ),
    tag = "Projects"
)]
pub async fn delete_project(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<()> {
    ProjectRepository::delete(&state.db, id).await?;
    Ok(())
}
