use std::collections::HashSet;

use sea_orm::ConnectionTrait;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::repositories::{CollaborationRepository, CompanyRepository};

/// Partition of a candidate batch into companies that are new to a project
/// and companies already collaborating on it.
#[derive(Debug, Clone)]
pub struct DuplicateCheck {
    /// Candidates with no collaboration on the project, input order preserved
    pub fresh: Vec<Uuid>,
    /// Candidates that already collaborate on the project, input order preserved
    pub existing: Vec<Uuid>,
    /// Display names for `existing`, index-aligned with it
    pub existing_names: Vec<String>,
}

impl DuplicateCheck {
    /// True when every candidate already collaborates on the project
    pub fn all_duplicates(&self) -> bool {
        self.fresh.is_empty() && !self.existing.is_empty()
    }
}

/// Computes which candidate (company, project) pairs already exist.
///
/// This is the friendly pre-check, not the enforcement: the unique index on
/// (company_id, project_id) remains the authoritative duplicate signal, so a
/// pair that slips in between this check and the write still gets rejected
/// by the database.
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// Partition candidates against a project's current collaborators.
    ///
    /// Repeated candidate ids collapse onto their first occurrence before the
    /// check, so one company can never produce two rows from a single batch.
    pub async fn partition<C: ConnectionTrait>(
        db: &C,
        project_id: Uuid,
        candidates: &[Uuid],
    ) -> AppResult<DuplicateCheck> {
        if candidates.is_empty() {
            return Err(AppError::Validation(
                "company_ids must not be empty".to_string(),
            ));
        }

        let candidates = Self::dedupe(candidates);

        let taken: HashSet<Uuid> =
            CollaborationRepository::existing_company_ids(db, project_id, &candidates)
                .await?
                .into_iter()
                .collect();

        let mut fresh = Vec::new();
        let mut existing = Vec::new();
        for id in candidates {
            if taken.contains(&id) {
                existing.push(id);
            } else {
                fresh.push(id);
            }
        }

        let names = CompanyRepository::names_by_ids(db, &existing).await?;
        let existing_names = existing
            .iter()
            .map(|id| names.get(id).cloned().unwrap_or_default())
            .collect();

        Ok(DuplicateCheck {
            fresh,
            existing,
            existing_names,
        })
    }

    /// Drop repeated ids, keeping first occurrences in order
    fn dedupe(ids: &[Uuid]) -> Vec<Uuid> {
        let mut seen = HashSet::new();
        ids.iter().copied().filter(|id| seen.insert(*id)).collect()
    }
}
