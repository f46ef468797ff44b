//! One-shot provisioning: seed the roles table. Run with exclusive access to
//! the role table, never as part of request handling.

use plateful::database;
use plateful::roles::seed::seed_roles;
use plateful::roles::{PgRoleStore, RoleStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let pool = database::connect().await?;
    let store = PgRoleStore::new(pool);
    seed_roles(&store).await?;

    for role in store.roles().await? {
        tracing::info!(
            id = role.id,
            name = %role.name,
            guard = role.guard_name.as_deref().unwrap_or("-"),
            "role present"
        );
    }
    Ok(())
}
