use std::collections::{HashMap, HashSet};

use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Collaboration, CollaborationInput, CollaborationView, CopyFlags, Priority,
    SharedCollaborationFields, TriState,
};
use crate::repositories::{
    CollaborationRepository, CompanyRepository, PersonRepository, ProjectRepository,
};
use crate::services::{DuplicateDetector, ResponsibleResolver};

/// Result of a bulk create: the rows that landed plus the companies that were
/// skipped because they already collaborate on the project.
#[derive(Debug)]
pub struct BulkCreateOutcome {
    pub created: Vec<CollaborationView>,
    pub skipped_companies: Vec<String>,
}

/// Result of copying one project's collaborations into another
#[derive(Debug)]
pub struct CopyOutcome {
    pub source_project_id: Uuid,
    pub target_project_id: Uuid,
    pub created: u64,
    pub skipped: u64,
    pub collaborations: Vec<Collaboration>,
}

/// All paths that create or replace collaborations.
///
/// Every write runs inside one transaction together with its duplicate check,
/// and the batch insert drops conflicting rows at the database, so two
/// concurrent requests for the same (company, project) pair can never both
/// land.
pub struct ProvisioningService;

impl ProvisioningService {
    /// Create one collaboration
    pub async fn create(
        db: &DatabaseConnection,
        input: &CollaborationInput,
    ) -> AppResult<CollaborationView> {
        let txn = db.begin().await?;

        if !ProjectRepository::exists(&txn, input.project_id).await? {
            return Err(AppError::NotFound("Project".to_string()));
        }

        let check =
            DuplicateDetector::partition(&txn, input.project_id, &[input.company_id]).await?;
        if check.all_duplicates() {
            return Err(AppError::DuplicateCompanies {
                message: "Company already collaborates on this project".to_string(),
                companies: check.existing_names,
            });
        }

        if let Some(person_id) = input.person_id {
            Self::check_person_company(&txn, person_id, input.company_id).await?;
        }

        let created = CollaborationRepository::insert_one(&txn, input).await?;
        let mut view = CollaborationRepository::find_view(&txn, created.id).await?;
        ResponsibleResolver::annotate(&txn, std::slice::from_mut(&mut view)).await?;
        txn.commit().await?;

        Ok(view)
    }

    /// Replace every settable field of a collaboration.
    ///
    /// Moving the row to another (company, project) pair re-runs the
    /// duplicate check against the new pair.
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &CollaborationInput,
    ) -> AppResult<CollaborationView> {
        let txn = db.begin().await?;

        let current = CollaborationRepository::find_required(&txn, id).await?;

        let pair_changed =
            input.company_id != current.company_id || input.project_id != current.project_id;
        if pair_changed {
            if !ProjectRepository::exists(&txn, input.project_id).await? {
                return Err(AppError::NotFound("Project".to_string()));
            }

            let taken = CollaborationRepository::pair_exists_excluding(
                &txn,
                input.project_id,
                input.company_id,
                Some(id),
            )
            .await?;
            if taken {
                let names = CompanyRepository::names_by_ids(&txn, &[input.company_id]).await?;
                return Err(AppError::DuplicateCompanies {
                    message: "Company already collaborates on this project".to_string(),
                    companies: names.into_values().collect(),
                });
            }
        }

        if let Some(person_id) = input.person_id {
            Self::check_person_company(&txn, person_id, input.company_id).await?;
        }

        CollaborationRepository::update(&txn, id, input).await?;
        let mut view = CollaborationRepository::find_view(&txn, id).await?;
        ResponsibleResolver::annotate(&txn, std::slice::from_mut(&mut view)).await?;
        txn.commit().await?;

        Ok(view)
    }

    /// Create one collaboration per candidate company, all sharing the same
    /// payload, skipping companies that already collaborate on the project.
    pub async fn bulk_create(
        db: &DatabaseConnection,
        project_id: Uuid,
        company_ids: &[Uuid],
        shared: &SharedCollaborationFields,
    ) -> AppResult<BulkCreateOutcome> {
        let txn = db.begin().await?;

        if !ProjectRepository::exists(&txn, project_id).await? {
            return Err(AppError::NotFound("Project".to_string()));
        }

        let check = DuplicateDetector::partition(&txn, project_id, company_ids).await?;
        if check.all_duplicates() {
            return Err(AppError::DuplicateCompanies {
                message: "All selected companies already collaborate on this project".to_string(),
                companies: check.existing_names,
            });
        }

        let known = CompanyRepository::count_existing(&txn, &check.fresh).await?;
        if known != check.fresh.len() as u64 {
            return Err(AppError::Validation(
                "one or more companies do not exist".to_string(),
            ));
        }

        // The shared contact attaches only to the row of their own company;
        // the other companies get no contact person.
        let person_company = match shared.person_id {
            Some(person_id) => {
                let company_id = PersonRepository::company_of(&txn, person_id)
                    .await?
                    .ok_or_else(|| {
                        AppError::Validation("Contact person does not exist".to_string())
                    })?;

                let candidate = check.fresh.contains(&company_id)
                    || check.existing.contains(&company_id);
                if !candidate {
                    return Err(AppError::Validation(
                        "Contact person does not work for any selected company".to_string(),
                    ));
                }

                Some(company_id)
            }
            None => None,
        };

        let inputs: Vec<CollaborationInput> = check
            .fresh
            .iter()
            .map(|&company_id| {
                let person_id = shared
                    .person_id
                    .filter(|_| person_company == Some(company_id));
                Self::shared_to_input(company_id, project_id, person_id, shared)
            })
            .collect();

        let ids = CollaborationRepository::insert_batch(&txn, &inputs).await?;
        let mut created = CollaborationRepository::find_views_by_ids(&txn, &ids).await?;
        ResponsibleResolver::annotate(&txn, &mut created).await?;
        txn.commit().await?;

        // Response rows follow candidate order, not insert order
        let order: HashMap<Uuid, usize> = check
            .fresh
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        created.sort_by_key(|v| order.get(&v.company_id).copied().unwrap_or(usize::MAX));

        Ok(BulkCreateOutcome {
            created,
            skipped_companies: check.existing_names,
        })
    }

    /// Copy a source project's collaborations into a target project.
    ///
    /// The company always carries over; every other field carries over or
    /// falls back to its neutral default according to `flags`. Companies
    /// already collaborating in the target are skipped.
    pub async fn copy_project(
        db: &DatabaseConnection,
        source_project_id: Uuid,
        target_project_id: Uuid,
        flags: &CopyFlags,
    ) -> AppResult<CopyOutcome> {
        if source_project_id == target_project_id {
            return Err(AppError::Validation(
                "source and target project must differ".to_string(),
            ));
        }

        let txn = db.begin().await?;

        if !ProjectRepository::exists(&txn, target_project_id).await? {
            return Err(AppError::NotFound("Project".to_string()));
        }

        let source_rows =
            CollaborationRepository::list_for_project(&txn, source_project_id).await?;
        if source_rows.is_empty() {
            return Err(AppError::NotFound(
                "Source project collaborations".to_string(),
            ));
        }

        let candidates: Vec<Uuid> = source_rows.iter().map(|c| c.company_id).collect();
        let check = DuplicateDetector::partition(&txn, target_project_id, &candidates).await?;
        if check.all_duplicates() {
            // The whole source counts as skipped
            return Err(AppError::CopyAllDuplicates {
                message: "All companies already have collaborations in the target project"
                    .to_string(),
                skipped: source_rows.len() as u64,
            });
        }

        let fresh: HashSet<Uuid> = check.fresh.iter().copied().collect();
        let inputs: Vec<CollaborationInput> = source_rows
            .iter()
            .filter(|row| fresh.contains(&row.company_id))
            .map(|row| Self::apply_copy_flags(row, flags, target_project_id))
            .collect();
        let skipped = (source_rows.len() - inputs.len()) as u64;

        let ids = CollaborationRepository::insert_batch(&txn, &inputs).await?;
        let mut collaborations = CollaborationRepository::find_by_ids(&txn, &ids).await?;
        txn.commit().await?;

        // Keep source order in the response
        let order: HashMap<Uuid, usize> = candidates
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i))
            .collect();
        collaborations.sort_by_key(|c| order.get(&c.company_id).copied().unwrap_or(usize::MAX));

        Ok(CopyOutcome {
            source_project_id,
            target_project_id,
            created: collaborations.len() as u64,
            skipped,
            collaborations,
        })
    }

    /// Map one source row to the input for its copy in the target project.
    ///
    /// Pure field-by-field mapping: a raised flag carries the source value, a
    /// lowered flag falls back to the field's neutral default. `progress`
    /// gates contacted, letter and meeting together; `status` gates
    /// `successful`.
    pub fn apply_copy_flags(
        source: &Collaboration,
        flags: &CopyFlags,
        target_project_id: Uuid,
    ) -> CollaborationInput {
        CollaborationInput {
            company_id: source.company_id,
            project_id: target_project_id,
            person_id: if flags.contact_person {
                source.person_id
            } else {
                None
            },
            responsible: if flags.responsible {
                source.responsible.clone()
            } else {
                None
            },
            comment: if flags.comment {
                source.comment.clone()
            } else {
                None
            },
            contacted: if flags.progress { source.contacted } else { false },
            successful: if flags.status {
                source.successful
            } else {
                TriState::Unknown
            },
            letter: if flags.progress { source.letter } else { false },
            meeting: if flags.progress {
                source.meeting
            } else {
                TriState::Unknown
            },
            priority: if flags.priority {
                source.priority
            } else {
                Priority::Low
            },
            amount: if flags.amount { source.amount } else { None },
            contact_in_future: if flags.contact_in_future {
                source.contact_in_future
            } else {
                TriState::Unknown
            },
            collab_type: if flags.collab_type {
                source.collab_type
            } else {
                None
            },
        }
    }

    fn shared_to_input(
        company_id: Uuid,
        project_id: Uuid,
        person_id: Option<Uuid>,
        shared: &SharedCollaborationFields,
    ) -> CollaborationInput {
        CollaborationInput {
            company_id,
            project_id,
            person_id,
            responsible: shared.responsible.clone(),
            comment: shared.comment.clone(),
            contacted: shared.contacted,
            successful: shared.successful,
            letter: shared.letter,
            meeting: shared.meeting,
            priority: shared.priority,
            amount: shared.amount,
            contact_in_future: shared.contact_in_future,
            collab_type: shared.collab_type,
        }
    }

    /// The contact person must work for the collaboration's company
    async fn check_person_company<C: sea_orm::ConnectionTrait>(
        db: &C,
        person_id: Uuid,
        company_id: Uuid,
    ) -> AppResult<()> {
        let employer = PersonRepository::company_of(db, person_id)
            .await?
            .ok_or_else(|| AppError::Validation("Contact person does not exist".to_string()))?;

        if employer != company_id {
            return Err(AppError::Validation(
                "Contact person does not work for the collaboration's company".to_string(),
            ));
        }

        Ok(())
    }
}
