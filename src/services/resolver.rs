use sea_orm::ConnectionTrait;

use crate::error::AppResult;
use crate::models::{CollaborationView, ResolvedUser};
use crate::repositories::UserRepository;

/// Best-effort lookup from the free-text `responsible` name to a registered
/// account.
///
/// Historical collaborations carry names that predate the user registry, so a
/// miss is a normal outcome and never blocks a write.
pub struct ResponsibleResolver;

impl ResponsibleResolver {
    /// Resolve one name to an account, or None when nothing matches
    pub async fn resolve<C: ConnectionTrait>(
        db: &C,
        name: &str,
    ) -> AppResult<Option<ResolvedUser>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let user = UserRepository::find_by_full_name(db, name).await?;
        Ok(user.map(|u| u.into()))
    }

    /// Fill in `responsible_user_id` for a batch of views.
    ///
    /// One query for the distinct names, then an in-memory stitch, so the
    /// cost stays flat no matter how many rows came out of a bulk insert.
    pub async fn annotate<C: ConnectionTrait>(
        db: &C,
        views: &mut [CollaborationView],
    ) -> AppResult<()> {
        let mut names: Vec<String> = views
            .iter()
            .filter_map(|v| v.responsible.clone())
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();

        if names.is_empty() {
            return Ok(());
        }

        let ids = UserRepository::ids_by_full_names(db, &names).await?;

        for view in views.iter_mut() {
            view.responsible_user_id = view
                .responsible
                .as_deref()
                .and_then(|name| ids.get(name).copied());
        }

        Ok(())
    }
}
