use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateProject, Project, UpdateProject};
use crate::repositories::Repository;

/// Fundraising project repository for database operations
pub struct ProjectRepository;

#[async_trait]
impl Repository<Project> for ProjectRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = ProjectEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        Ok(())
    }

    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .order_by_desc(Column::CreatedAt)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = ProjectEntity::find().count(db).await?;
        Ok(count)
    }
}

impl ProjectRepository {
    /// Create a new fundraising project
    pub async fn create(db: &DatabaseConnection, input: &CreateProject) -> AppResult<Project> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            fr_goal: Set(input.fr_goal),
            notes: Set(input.notes.clone()),
            created_at: Set(time::OffsetDateTime::now_utc()),
            updated_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Search projects by name fragment
    pub async fn list_by_name(
        db: &DatabaseConnection,
        name: &str,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .filter(Column::Name.contains(name))
            .order_by_desc(Column::CreatedAt)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Count projects matching a name fragment
    pub async fn count_by_name(db: &DatabaseConnection, name: &str) -> AppResult<u64> {
        let count = ProjectEntity::find()
            .filter(Column::Name.contains(name))
            .count(db)
            .await?;

        Ok(count)
    }

    /// Update project fields
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdateProject,
    ) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(fr_goal) = input.fr_goal {
            active.fr_goal = Set(Some(fr_goal));
        }
        if let Some(notes) = &input.notes {
            active.notes = Set(Some(notes.clone()));
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Check that a project exists without loading it
    pub async fn exists<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<bool> {
        let count = ProjectEntity::find_by_id(id).count(db).await?;
        Ok(count > 0)
    }
}

// Conversion from SeaORM model to our domain model
impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            fr_goal: m.fr_goal,
            notes: m.notes,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
