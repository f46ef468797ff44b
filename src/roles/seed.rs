use tracing::info;

use super::{RoleStore, RoleStoreError};

/// Provision the fixed role set.
///
/// Only the ("restaurant", "web") pair is created idempotently; the two plain
/// creates insert unscoped rows every time they run, so a rerun leaves the
/// guarded pair unique but duplicates the unscoped rows.
pub async fn seed_roles(store: &dyn RoleStore) -> Result<(), RoleStoreError> {
    store.ensure_role("restaurant", "web").await?;
    store.create_role("customer").await?;
    store.create_role("restaurant").await?;
    info!("role seeding complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::MemoryRoleStore;

    #[tokio::test]
    async fn seeding_twice_is_idempotent_only_for_the_guarded_pair() {
        let store = MemoryRoleStore::default();
        seed_roles(&store).await.unwrap();
        seed_roles(&store).await.unwrap();

        let roles = store.roles().await.unwrap();

        let guarded = roles
            .iter()
            .filter(|r| r.name == "restaurant" && r.guard_name.as_deref() == Some("web"))
            .count();
        assert_eq!(guarded, 1, "guarded pair must stay unique");

        let customers = roles
            .iter()
            .filter(|r| r.name == "customer" && r.guard_name.is_none())
            .count();
        assert_eq!(customers, 2, "plain customer rows duplicate on rerun");

        let unscoped_restaurants = roles
            .iter()
            .filter(|r| r.name == "restaurant" && r.guard_name.is_none())
            .count();
        assert_eq!(unscoped_restaurants, 2, "plain restaurant rows duplicate on rerun");
    }

    #[tokio::test]
    async fn single_run_creates_three_rows() {
        let store = MemoryRoleStore::default();
        seed_roles(&store).await.unwrap();
        assert_eq!(store.roles().await.unwrap().len(), 3);
    }
}
