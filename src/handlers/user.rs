use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::common::{page_window, PaginationParams};
use crate::models::{AppUser, CreateAppUser, ResolvedUser};
use crate::repositories::{Repository, UserRepository};
use crate::services::ResponsibleResolver;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: String,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<AppUser> for UserResponse {
    fn from(u: AppUser) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub data: Vec<UserResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Free-text name to match against registered accounts
#[derive(Debug, Deserialize, IntoParams)]
pub struct ResolveParams {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResolvedUserResponse {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
}

impl From<ResolvedUser> for ResolvedUserResponse {
    fn from(u: ResolvedUser) -> Self {
        Self {
            id: u.id,
            full_name: u.full_name,
            email: u.email,
        }
    }
}

// ============ Handlers ============

/// Register an account in the user registry
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created successfully", body = UserResponse),
        (status = 409, description = "Email already exists")
    ),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let create_user = CreateAppUser {
        full_name: payload.full_name,
        email: payload.email,
        role: payload.role,
    };

    let user = UserRepository::create(&state.db, &create_user).await?;
    Ok(Json(user.into()))
}

/// List registered accounts
#[utoipa::path(
    get,
    path = "/api/users",
    params(PaginationParams),
    responses(
        (status = 200, description = "List of users", body = UserListResponse)
    ),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<UserListResponse>> {
    let (limit, offset) = page_window(&params);

    let users = UserRepository::list(&state.db, limit, offset).await?;
    let total = UserRepository::count(&state.db).await?;

    Ok(Json(UserListResponse {
        data: users.into_iter().map(|u| u.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Match a free-text responsible name against the user registry.
///
/// Best-effort: a name with no matching account returns null, not an error.
#[utoipa::path(
    get,
    path = "/api/users/resolve",
    params(ResolveParams),
    responses(
        (status = 200, description = "Matching account, or null when none matches", body = Option<ResolvedUserResponse>)
    ),
    tag = "Users"
)]
pub async fn resolve_user(
    State(state): State<AppState>,
    Query(params): Query<ResolveParams>,
) -> AppResult<Json<Option<ResolvedUserResponse>>> {
    let resolved = ResponsibleResolver::resolve(&state.db, &params.name).await?;
    Ok(Json(resolved.map(|u| u.into())))
}
