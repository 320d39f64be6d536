use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::company::{self, ActiveModel, Column, Entity as CompanyEntity};
use crate::error::{AppError, AppResult};
use crate::models::{Company, CreateCompany, UpdateCompany};
use crate::repositories::Repository;

/// Company repository for database operations
pub struct CompanyRepository;

#[async_trait]
impl Repository<Company> for CompanyRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Company> {
        let model = CompanyEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Company".to_string()))?;

        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = CompanyEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Company".to_string()));
        }

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<Company>> {
        let models = CompanyEntity::find()
            .order_by_asc(Column::Name)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = CompanyEntity::find().count(db).await?;
        Ok(count)
    }
}

impl CompanyRepository {
    /// Create a new company
    pub async fn create(db: &DatabaseConnection, input: &CreateCompany) -> AppResult<Company> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            website: Set(input.website.clone()),
            notes: Set(input.notes.clone()),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Search companies by name fragment
    pub async fn list_by_name(
        db: &DatabaseConnection,
        name: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Company>> {
        let models = CompanyEntity::find()
            .filter(Column::Name.contains(name))
            .order_by_asc(Column::Name)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Count companies matching a name fragment
    pub async fn count_by_name(db: &DatabaseConnection, name: &str) -> AppResult<u64> {
        let count = CompanyEntity::find()
            .filter(Column::Name.contains(name))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Update company fields
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdateCompany,
    ) -> AppResult<Company> {
        let model = CompanyEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Company".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(website) = &input.website {
            active.website = Set(Some(website.clone()));
        }
        if let Some(notes) = &input.notes {
            active.notes = Set(Some(notes.clone()));
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Fetch names for a set of company ids in one query
    pub async fn names_by_ids<C: ConnectionTrait>(
        db: &C,
        ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(Uuid, String)> = CompanyEntity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .select_only()
            .column(Column::Id)
            .column(Column::Name)
            .into_tuple()
            .all(db)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Count how many of the given ids exist
    pub async fn count_existing<C: ConnectionTrait>(db: &C, ids: &[Uuid]) -> AppResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let count = CompanyEntity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .count(db)
            .await?;

        Ok(count)
    }
}

// Conversion from SeaORM model to our domain model
impl From<company::Model> for Company {
    fn from(m: company::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            website: m.website,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
