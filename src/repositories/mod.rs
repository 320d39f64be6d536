pub mod collaboration;
pub mod company;
pub mod person;
pub mod project;
pub mod user;

pub use collaboration::CollaborationRepository;
pub use company::CompanyRepository;
pub use person::PersonRepository;
pub use project::ProjectRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;

/// Base repository trait for common CRUD operations
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<T>;

    /// Delete entity by ID
    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()>;

    /// List entities with pagination
    async fn list(db: &DatabaseConnection, limit: u64, offset: u64) -> AppResult<Vec<T>>;

    /// Count total entities
    async fn count(db: &DatabaseConnection) -> AppResult<u64>;
}
