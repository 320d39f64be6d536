use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{CollabType, Priority};

/// Storage model of a collaboration. Tri-state domain fields (`successful`,
/// `meeting`, `contact_in_future`) are nullable booleans here; the conversion
/// to `TriState` happens in the repository layer. The (company_id, project_id)
/// pair carries a unique index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collaborations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub project_id: Uuid,
    pub person_id: Option<Uuid>,
    pub responsible: Option<String>,
    pub comment: Option<String>,
    pub contacted: bool,
    pub successful: Option<bool>,
    pub letter: bool,
    pub meeting: Option<bool>,
    pub priority: Priority,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub amount: Option<Decimal>,
    pub contact_in_future: Option<bool>,
    pub collab_type: Option<CollabType>,
    pub created_at: TimeDateTimeWithTimeZone,
    pub updated_at: TimeDateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_delete = "Cascade"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::project::Entity",
        from = "Column::ProjectId",
        to = "super::project::Column::Id",
        on_delete = "Cascade"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::person::Entity",
        from = "Column::PersonId",
        to = "super::person::Column::Id",
        on_delete = "Cascade"
    )]
    Person,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::project::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::person::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Person.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
