//! Cross-aggregate existence validation.

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use kino_core::{AppError, ExistenceGateway, Notification};

/// Check a candidate ID set against an "exists" lookup and report the missing
/// ones.
///
/// The error message lists the missing IDs in the iteration order of the
/// requested collection, not sorted. An empty candidate set short-circuits
/// with no lookup call and no error. Gateway failures propagate as
/// infrastructure errors.
pub async fn validate_existing_ids<I>(
    label: &str,
    requested: &[I],
    gateway: &dyn ExistenceGateway<I>,
    notification: &mut Notification,
) -> Result<(), AppError>
where
    I: Clone + Display + Eq + Hash,
{
    if requested.is_empty() {
        return Ok(());
    }

    let found: HashSet<I> = gateway.exists_by_ids(requested).await?.into_iter().collect();

    let missing: Vec<String> = requested
        .iter()
        .filter(|id| !found.contains(id))
        .map(|id| id.to_string())
        .collect();

    if !missing.is_empty() {
        notification.append(format!(
            "Some {} could not be found: {}",
            label,
            missing.join(", ")
        ));
    }

    Ok(())
}
