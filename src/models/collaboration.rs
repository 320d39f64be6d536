use rust_decimal::Decimal;
use sea_orm::sea_query::StringLen;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::TriState;

/// Outreach priority of a collaboration. `Low` doubles as the neutral
/// default when a copy drops the field.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    #[sea_orm(string_value = "low")]
    Low,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "high")]
    High,
}

/// What kind of support the partnership is about.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum CollabType {
    #[sea_orm(string_value = "financial")]
    Financial,
    #[sea_orm(string_value = "material")]
    Material,
    #[sea_orm(string_value = "educational")]
    Educational,
}

/// One company linked to one fundraising project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaboration {
    pub id: Uuid,
    pub company_id: Uuid,
    pub project_id: Uuid,
    pub person_id: Option<Uuid>,
    pub responsible: Option<String>,
    pub comment: Option<String>,
    pub contacted: bool,
    pub successful: TriState,
    pub letter: bool,
    pub meeting: TriState,
    pub priority: Priority,
    pub amount: Option<Decimal>,
    pub contact_in_future: TriState,
    pub collab_type: Option<CollabType>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Collaboration joined with the display names the UI table needs, plus the
/// best-effort resolution of `responsible` against the user registry.
#[derive(Debug, Clone, Serialize)]
pub struct CollaborationView {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub project_id: Uuid,
    pub project_name: String,
    pub person_id: Option<Uuid>,
    pub person_name: Option<String>,
    pub responsible: Option<String>,
    pub responsible_user_id: Option<Uuid>,
    pub comment: Option<String>,
    pub contacted: bool,
    pub successful: TriState,
    pub letter: bool,
    pub meeting: TriState,
    pub priority: Priority,
    pub amount: Option<Decimal>,
    pub contact_in_future: TriState,
    pub collab_type: Option<CollabType>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Full settable field set of a collaboration. Used for single create, for
/// the full-replace update, and as the output of the copy-flag mapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollaborationInput {
    pub company_id: Uuid,
    pub project_id: Uuid,
    pub person_id: Option<Uuid>,
    pub responsible: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub contacted: bool,
    #[serde(default)]
    pub successful: TriState,
    #[serde(default)]
    pub letter: bool,
    #[serde(default)]
    pub meeting: TriState,
    #[serde(default)]
    pub priority: Priority,
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub contact_in_future: TriState,
    pub collab_type: Option<CollabType>,
}

/// Attributes shared by every row of a bulk create (everything except the
/// company, which varies per candidate).
#[derive(Debug, Clone, Deserialize)]
pub struct SharedCollaborationFields {
    pub person_id: Option<Uuid>,
    pub responsible: Option<String>,
    pub comment: Option<String>,
    #[serde(default)]
    pub contacted: bool,
    #[serde(default)]
    pub successful: TriState,
    #[serde(default)]
    pub letter: bool,
    #[serde(default)]
    pub meeting: TriState,
    #[serde(default)]
    pub priority: Priority,
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub contact_in_future: TriState,
    pub collab_type: Option<CollabType>,
}

/// Per-field switches deciding what a project copy carries over.
///
/// `progress` gates contacted, letter and meeting together; `status` gates
/// `successful`. The company is always carried: it decides which rows exist.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CopyFlags {
    pub contact_person: bool,
    pub collab_type: bool,
    pub priority: bool,
    pub contact_in_future: bool,
    pub responsible: bool,
    pub comment: bool,
    pub progress: bool,
    pub status: bool,
    pub amount: bool,
}

impl CopyFlags {
    /// Carry every field over unchanged.
    pub fn all() -> Self {
        Self {
            contact_person: true,
            collab_type: true,
            priority: true,
            contact_in_future: true,
            responsible: true,
            comment: true,
            progress: true,
            status: true,
            amount: true,
        }
    }
}
