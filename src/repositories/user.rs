use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::app_user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{AppUser, CreateAppUser};
use crate::repositories::Repository;

/// Account repository for database operations
pub struct UserRepository;

#[async_trait]
impl Repository<AppUser> for UserRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<AppUser> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<AppUser>> {
        let models = UserEntity::find()
            .order_by_asc(Column::FullName)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = UserEntity::find().count(db).await?;
        Ok(count)
    }
}

impl UserRepository {
    /// Create a new account
    pub async fn create(db: &DatabaseConnection, input: &CreateAppUser) -> AppResult<AppUser> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(input.full_name.clone()),
            email: Set(input.email.clone()),
            role: Set(input.role.clone().unwrap_or_else(|| "member".to_string())),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(sea_orm::SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("Email already exists".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(result.into())
    }

    /// Find an account by exact full name.
    ///
    /// When several accounts share a name the oldest one wins, so repeated
    /// lookups stay deterministic.
    pub async fn find_by_full_name<C: ConnectionTrait>(
        db: &C,
        full_name: &str,
    ) -> AppResult<Option<AppUser>> {
        let model = UserEntity::find()
            .filter(Column::FullName.eq(full_name))
            .order_by_asc(Column::CreatedAt)
            .one(db)
            .await?;

        Ok(model.map(|m| m.into()))
    }

    /// Map a batch of full names to account ids in one query
    pub async fn ids_by_full_names<C: ConnectionTrait>(
        db: &C,
        full_names: &[String],
    ) -> AppResult<HashMap<String, Uuid>> {
        if full_names.is_empty() {
            return Ok(HashMap::new());
        }

        let models = UserEntity::find()
            .filter(Column::FullName.is_in(full_names.iter().cloned()))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        // Oldest account wins on name collisions, matching find_by_full_name
        let mut map = HashMap::new();
        for m in models {
            map.entry(m.full_name).or_insert(m.id);
        }

        Ok(map)
    }
}

// Conversion from SeaORM model to our domain model
impl From<app_user::Model> for AppUser {
    fn from(m: app_user::Model) -> Self {
        Self {
            id: m.id,
            full_name: m.full_name,
            email: m.email,
            role: m.role,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
