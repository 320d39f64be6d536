use async_trait::async_trait;
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    FromQueryResult, Iterable, JoinType, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Select, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entity::collaboration::{self, ActiveModel, Column, Entity as CollaborationEntity};
use crate::entity::{company, person, project};
use crate::error::{AppError, AppResult};
use crate::models::{CollabType, Collaboration, CollaborationInput, CollaborationView, Priority};
use crate::repositories::Repository;

/// Collaboration repository for database operations.
///
/// Write methods are generic over the connection so services can run them
/// inside a transaction together with the duplicate checks.
pub struct CollaborationRepository;

#[async_trait]
impl Repository<Collaboration> for CollaborationRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Collaboration> {
        Self::find_required(db, id).await
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = CollaborationEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Collaboration".to_string()));
        }

        Ok(())
    }

    async fn list(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<Collaboration>> {
        let models = CollaborationEntity::find()
            .order_by_desc(Column::CreatedAt)
            .paginate(db, limit)
            .fetch_page(offset / limit)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    async fn count(db: &DatabaseConnection) -> AppResult<u64> {
        let count = CollaborationEntity::find().count(db).await?;
        Ok(count)
    }
}

impl CollaborationRepository {
    /// Insert a single collaboration
    pub async fn insert_one<C: ConnectionTrait>(
        db: &C,
        input: &CollaborationInput,
    ) -> AppResult<Collaboration> {
        let now = OffsetDateTime::now_utc();
        let model = Self::to_active_model(Uuid::new_v4(), input, now);

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Insert a batch of collaborations in one statement.
    ///
    /// Conflicts on the (company_id, project_id) unique index are dropped by
    /// the database instead of failing the batch, so a row that appeared
    /// between the duplicate check and the insert silently shrinks the batch.
    /// Returns the generated ids; callers re-read by id to learn which rows
    /// actually landed.
    pub async fn insert_batch<C: ConnectionTrait>(
        db: &C,
        inputs: &[CollaborationInput],
    ) -> AppResult<Vec<Uuid>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let now = OffsetDateTime::now_utc();
        let mut ids = Vec::with_capacity(inputs.len());
        let models: Vec<ActiveModel> = inputs
            .iter()
            .map(|input| {
                let id = Uuid::new_v4();
                ids.push(id);
                Self::to_active_model(id, input, now)
            })
            .collect();

        let result = CollaborationEntity::insert_many(models)
            .on_conflict(
                OnConflict::columns([Column::CompanyId, Column::ProjectId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await;

        match result {
            Ok(_) => Ok(ids),
            // Every row hit the conflict target; the re-read reports zero rows
            Err(DbErr::RecordNotInserted) => Ok(ids),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace every settable field of a collaboration
    pub async fn update<C: ConnectionTrait>(
        db: &C,
        id: Uuid,
        input: &CollaborationInput,
    ) -> AppResult<Collaboration> {
        let model = CollaborationEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collaboration".to_string()))?;

        let mut active: ActiveModel = model.into();
        active.company_id = Set(input.company_id);
        active.project_id = Set(input.project_id);
        active.person_id = Set(input.person_id);
        active.responsible = Set(input.responsible.clone());
        active.comment = Set(input.comment.clone());
        active.contacted = Set(input.contacted);
        active.successful = Set(input.successful.as_bool());
        active.letter = Set(input.letter);
        active.meeting = Set(input.meeting.as_bool());
        active.priority = Set(input.priority);
        active.amount = Set(input.amount);
        active.contact_in_future = Set(input.contact_in_future.as_bool());
        active.collab_type = Set(input.collab_type);
        active.updated_at = Set(OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Find a collaboration, erroring when it does not exist
    pub async fn find_required<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<Collaboration> {
        let model = CollaborationEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collaboration".to_string()))?;

        Ok(model.into())
    }

    /// Plain rows for a set of ids
    pub async fn find_by_ids<C: ConnectionTrait>(
        db: &C,
        ids: &[Uuid],
    ) -> AppResult<Vec<Collaboration>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = CollaborationEntity::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// All collaborations of a project, oldest first
    pub async fn list_for_project<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
    ) -> AppResult<Vec<Collaboration>> {
        let models = CollaborationEntity::find()
            .filter(Column::ProjectId.eq(project_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Which of the candidate companies already collaborate on the project
    pub async fn existing_company_ids<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
        candidate_ids: &[Uuid],
    ) -> AppResult<Vec<Uuid>> {
        if candidate_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = CollaborationEntity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::CompanyId.is_in(candidate_ids.iter().copied()))
            .select_only()
            .column(Column::CompanyId)
            .distinct()
            .into_tuple::<Uuid>()
            .all(db)
            .await?;

        Ok(ids)
    }

    /// Whether a (company, project) pair is already taken, optionally ignoring
    /// one row. The excluded row is the one being updated.
    pub async fn pair_exists_excluding<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
        company_id: Uuid,
        exclude_id: Option<Uuid>,
    ) -> AppResult<bool> {
        let mut query = CollaborationEntity::find()
            .filter(Column::ProjectId.eq(project_id))
            .filter(Column::CompanyId.eq(company_id));

        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }

        let count = query.count(db).await?;
        Ok(count > 0)
    }

    /// Single joined view row
    pub async fn find_view<C: ConnectionTrait>(db: &C, id: Uuid) -> AppResult<CollaborationView> {
        let row = Self::view_select()
            .filter(Column::Id.eq(id))
            .into_model::<ViewRow>()
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Collaboration".to_string()))?;

        Ok(row.into())
    }

    /// Joined view rows for a set of ids, in one query
    pub async fn find_views_by_ids<C: ConnectionTrait>(
        db: &C,
        ids: &[Uuid],
    ) -> AppResult<Vec<CollaborationView>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = Self::view_select()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::CreatedAt)
            .into_model::<ViewRow>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Joined view rows, optionally narrowed to a project and/or company
    pub async fn list_views<C: ConnectionTrait>(
        db: &C,
        project_id: Option<Uuid>,
        company_id: Option<Uuid>,
        limit: u64,
        offset: u64,
    ) -> AppResult<Vec<CollaborationView>> {
        let mut query = Self::view_select();

        if let Some(project_id) = project_id {
            query = query.filter(Column::ProjectId.eq(project_id));
        }
        if let Some(company_id) = company_id {
            query = query.filter(Column::CompanyId.eq(company_id));
        }

        let rows = query
            .order_by_desc(Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .into_model::<ViewRow>()
            .all(db)
            .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Count collaborations, with the same filters as `list_views`
    pub async fn count_filtered<C: ConnectionTrait>(
        db: &C,
        project_id: Option<Uuid>,
        company_id: Option<Uuid>,
    ) -> AppResult<u64> {
        let mut query = CollaborationEntity::find();

        if let Some(project_id) = project_id {
            query = query.filter(Column::ProjectId.eq(project_id));
        }
        if let Some(company_id) = company_id {
            query = query.filter(Column::CompanyId.eq(company_id));
        }

        let count = query.count(db).await?;
        Ok(count)
    }

    /// Base select joining company, project and the optional contact person
    fn view_select() -> Select<CollaborationEntity> {
        CollaborationEntity::find()
            .join(JoinType::InnerJoin, collaboration::Relation::Company.def())
            .join(JoinType::InnerJoin, collaboration::Relation::Project.def())
            .join(JoinType::LeftJoin, collaboration::Relation::Person.def())
            .select_only()
            .columns(Column::iter())
            .column_as(company::Column::Name, "company_name")
            .column_as(project::Column::Name, "project_name")
            .column_as(person::Column::Name, "person_name")
    }

    fn to_active_model(id: Uuid, input: &CollaborationInput, now: OffsetDateTime) -> ActiveModel {
        ActiveModel {
            id: Set(id),
            company_id: Set(input.company_id),
            project_id: Set(input.project_id),
            person_id: Set(input.person_id),
            responsible: Set(input.responsible.clone()),
            comment: Set(input.comment.clone()),
            contacted: Set(input.contacted),
            successful: Set(input.successful.as_bool()),
            letter: Set(input.letter),
            meeting: Set(input.meeting.as_bool()),
            priority: Set(input.priority),
            amount: Set(input.amount),
            contact_in_future: Set(input.contact_in_future.as_bool()),
            collab_type: Set(input.collab_type),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Raw row shape of the joined view query
#[derive(Debug, FromQueryResult)]
struct ViewRow {
    id: Uuid,
    company_id: Uuid,
    project_id: Uuid,
    person_id: Option<Uuid>,
    responsible: Option<String>,
    comment: Option<String>,
    contacted: bool,
    successful: Option<bool>,
    letter: bool,
    meeting: Option<bool>,
    priority: Priority,
    amount: Option<Decimal>,
    contact_in_future: Option<bool>,
    collab_type: Option<CollabType>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
    company_name: String,
    project_name: String,
    person_name: Option<String>,
}

impl From<ViewRow> for CollaborationView {
    fn from(r: ViewRow) -> Self {
        Self {
            id: r.id,
            company_id: r.company_id,
            company_name: r.company_name,
            project_id: r.project_id,
            project_name: r.project_name,
            person_id: r.person_id,
            person_name: r.person_name,
            responsible: r.responsible,
            // Filled in by the caller from the user registry
            responsible_user_id: None,
            comment: r.comment,
            contacted: r.contacted,
            successful: r.successful.into(),
            letter: r.letter,
            meeting: r.meeting.into(),
            priority: r.priority,
            amount: r.amount,
            contact_in_future: r.contact_in_future.into(),
            collab_type: r.collab_type,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// Conversion from SeaORM model to our domain model
impl From<collaboration::Model> for Collaboration {
    fn from(m: collaboration::Model) -> Self {
        Self {
            id: m.id,
            company_id: m.company_id,
            project_id: m.project_id,
            person_id: m.person_id,
            responsible: m.responsible,
            comment: m.comment,
            contacted: m.contacted,
            successful: m.successful.into(),
            letter: m.letter,
            meeting: m.meeting.into(),
            priority: m.priority,
            amount: m.amount,
            contact_in_future: m.contact_in_future.into(),
            collab_type: m.collab_type,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
