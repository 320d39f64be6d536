use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::person::{self, ActiveModel, Column, Entity as PersonEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreatePerson, Person, UpdatePerson};
use crate::repositories::Repository;

/// Contact person repository for database operations
pub struct PersonRepository;

#[async_trait]
impl Repository<Person> for PersonRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Person> {
        let model = PersonEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Person".to_string()))?;

        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = PersonEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Person".to_string()));
        }

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<Person>> {
        let models = PersonEntity::find()
            .order_by_asc(Column::Name)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = PersonEntity::find().count(db).await?;
        Ok(count)
    }
}

impl PersonRepository {
    /// Create a new contact person under a company
    pub async fn create(db: &DatabaseConnection, input: &CreatePerson) -> AppResult<Person> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            company_id: Set(input.company_id),
            name: Set(input.name.clone()),
            email: Set(input.email.clone()),
            phone: Set(input.phone.clone()),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// List contact people of a company
    pub async fn list_by_company(
        db: &DatabaseConnection,
        company_id: Uuid,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Person>> {
        let models = PersonEntity::find()
            .filter(Column::CompanyId.eq(company_id))
            .order_by_asc(Column::Name)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Count contact people of a company
    pub async fn count_by_company(db: &DatabaseConnection, company_id: Uuid) -> AppResult<u64> {
        let count = PersonEntity::find()
            .filter(Column::CompanyId.eq(company_id))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Update contact person fields
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdatePerson,
    ) -> AppResult<Person> {
        let model = PersonEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Person".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(email) = &input.email {
            active.email = Set(Some(email.clone()));
        }
        if let Some(phone) = &input.phone {
            active.phone = Set(Some(phone.clone()));
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Company the person works for, if the person exists
    pub async fn company_of<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Option<Uuid>> {
        let company_id = PersonEntity::find_by_id(id)
            .select_only()
            .column(Column::CompanyId)
            .into_tuple()
            .one(db)
            .await?;

        Ok(company_id)
    }
}

// Conversion from SeaORM model to our domain model
impl From<person::Model> for Person {
    fn from(m: person::Model) -> Self {
        Self {
            id: m.id,
            company_id: m.company_id,
            name: m.name,
            email: m.email,
            phone: m.phone,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
