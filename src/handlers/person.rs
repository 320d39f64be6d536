use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::common::{page_window, PaginationParams};
use crate::models::{CreatePerson, Person, UpdatePerson};
use crate::repositories::{PersonRepository, Repository};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePersonRequest {
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// The employer cannot change after creation; move people by recreating them
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePersonRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Person> for PersonResponse {
    fn from(p: Person) -> Self {
        Self {
            id: p.id,
            company_id: p.company_id,
            name: p.name,
            email: p.email,
            phone: p.phone,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PersonListResponse {
    pub data: Vec<PersonResponse>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Optional company filter for the contact person list
#[derive(Debug, Deserialize, IntoParams)]
pub struct PersonFilterParams {
    pub company_id: Option<Uuid>,
}

// ============ Handlers ============

/// Create a new contact person under a company
#[utoipa::path(
    post,
    path = "/api/people",
    request_body = CreatePersonRequest,
    responses(
        (status = 200, description = "Person created successfully", body = PersonResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "People"
)]
pub async fn create_person(
    State(state): State<AppState>,
    Json(payload): Json<CreatePersonRequest>,
) -> AppResult<Json<PersonResponse>> {
    let create_person = CreatePerson {
        company_id: payload.company_id,
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
    };

    let person = PersonRepository::create(&state.db, &create_person).await?;
    Ok(Json(person.into()))
}

/// List contact people, optionally narrowed to a company
#[utoipa::path(
    get,
    path = "/api/people",
    params(PersonFilterParams, PaginationParams),
    responses(
        (status = 200, description = "List of contact people", body = PersonListResponse)
    ),
    tag = "People"
)]
pub async fn list_people(
    State(state): State<AppState>,
    Query(filter): Query<PersonFilterParams>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PersonListResponse>> {
    let (limit, offset) = page_window(&params);

    let (people, total) = match filter.company_id {
        Some(company_id) => (
            PersonRepository::list_by_company(&state.db, company_id, limit, offset).await?,
            PersonRepository::count_by_company(&state.db, company_id).await?,
        ),
        None => (
            PersonRepository::list(&state.db, limit, offset).await?,
            PersonRepository::count(&state.db).await?,
        ),
    };

    Ok(Json(PersonListResponse {
        data: people.into_iter().map(|p| p.into()).collect(),
        total,
        limit,
        offset,
    }))
}

/// Get a contact person by ID
#[utoipa::path(
    get,
    path = "/api/people/{id}",
    params(
        ("id" = Uuid, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person details", body = PersonResponse),
        (status = 404, description = "Person not found")
    ),
    tag = "People"
)]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<PersonResponse>> {
    let person = PersonRepository::find_by_id(&state.db, id).await?;
    Ok(Json(person.into()))
}

/// Update a contact person
#[utoipa::path(
    put,
    path = "/api/people/{id}",
    params(
        ("id" = Uuid, Path, description = "Person ID")
    ),
    request_body = UpdatePersonRequest,
    responses(
        (status = 200, description = "Person updated successfully", body = PersonResponse),
        (status = 404, description = "Person not found")
    ),
    tag = "People"
)]
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePersonRequest>,
) -> AppResult<Json<PersonResponse>> {
    let update_person = UpdatePerson {
        name: payload.name,
        email: payload.email,
        phone: payload.phone,
    };

    let person = PersonRepository::update(&state.db, id, &update_person).await?;
    Ok(Json(person.into()))
}

/// Delete a contact person and, through the cascade, their collaborations
#[utoipa::path(
    delete,
    path = "/api/people/{id}",
    params(
        ("id" = Uuid, Path, description = "Person ID")
    ),
    responses(
        (status = 200, description = "Person deleted successfully"),
        (status = 404, description = "Person not found")
    ),
    tag = "People"
)]
pub async fn delete_person(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<()> {
    PersonRepository::delete(&state.db, id).await?;
    Ok(())
}
