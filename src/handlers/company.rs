use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::common::{page_window, PaginationParams};
use crate::models::{Company, CreateCompany, UpdateCompany};
use crate::repositories::{CompanyRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCompanyRequest {
    pub name: String,
    pub website: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub website: Option<String>,
    pub notes: Option<String>,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Company> for CompanyResponse {
    fn from(c: Company) -> Self {
        Self {
            id: c.id,
            name: c.name,
            website: c.website,
            notes: c.notes,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyListResponse {
    pub data: Vec<CompanyResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Optional name search for the company list
#[derive(Debug, Deserialize, IntoParams)]
pub struct CompanyFilterParams {
    pub name: Option<String>,
}

// ============ Handlers ============

/// Create a new company
#[utoipa::path(
    post,
    path = "/api/companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 200, description = "Company created successfully", body = CompanyResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "Companies"
)]
pub async fn create_company(
    State(state): State<AppState>,
    Json(payload): Json<CreateCompanyRequest>,
) -> AppResult<Json<CompanyResponse>> {
    let create_company = CreateCompany {
        name: payload.name,
        website: payload.website,
        notes: payload.notes,
    };

    let company = CompanyRepository::create(&state.db, &create_company).await?;
    Ok(Json(company.into()))
}

/// List companies, optionally searching by name
#[utoipa::path(
    get,
    path = "/api/companies",
    params(CompanyFilterParams, PaginationParams),
    responses(
        (status = 200, description = "List of companies", body = CompanyListResponse)
    ),
    tag = "Companies"
)]
pub async fn list_companies(
    State(state): State<AppState>,
    Query(filter): Query<CompanyFilterParams>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<CompanyListResponse>> {
    let (limit, offset) = page_window(&params);

    let (companies, total) = match filter.name.as_deref() {
        Some(name) => (
            CompanyRepository::list_by_name(&state.db, name, limit, offset).await?,
            CompanyRepository::count_by_name(&state.db, name).await?,
        ),
        None => (
            CompanyRepository::list(&state.db, limit, offset).await?,
            CompanyRepository::count(&state.db).await?,
        ),
    };

    Ok(Json(CompanyListResponse {
        data: companies.into_iter().map(|c| c.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a company by ID
#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company details", body = CompanyResponse),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies"
)]
pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CompanyResponse>> {
    let company = CompanyRepository::find_by_id(&state.db, id).await?;
    Ok(Json(company.into()))
}

/// Update a company
#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated successfully", body = CompanyResponse),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies"
)]
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompanyRequest>,
) -> AppResult<Json<CompanyResponse>> {
    let update_company = UpdateCompany {
        name: payload.name,
        website: payload.website,
        notes: payload.notes,
    };

    let company = CompanyRepository::update(&state.db, id, &update_company).await?;
    Ok(Json(company.into()))
}

/// Delete a company and, through the cascade, its collaborations
#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    params(
        ("id" = Uuid, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company deleted successfully"),
        (status = 404, description = "Company not found")
    ),
    tag = "Companies"
)]
pub async fn delete_company(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<()> {
    CompanyRepository::delete(&state.db, id).await?;
    Ok(())
}
