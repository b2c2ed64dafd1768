//! PostgreSQL connection pool and schema setup.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::StoreError;

/// Build a pool without opening a connection yet.
///
/// Connections are established on first use. The pool keeps retrying a
/// refused connection until its acquire timeout, which covers a database
/// that is still starting; after that the failure surfaces as
/// `StoreError::Database` from whichever statement needed it.
pub fn connect_lazy(config: &DbConfig) -> PgPool {
    debug!(?config, "creating lazy connection pool");
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(config.connect_options())
}

/// Apply the embedded migrations in `core/migrations`.
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("database schema is up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lazy_pool_opens_no_connections() {
        let config = DbConfig {
            host: "db.invalid".to_string(),
            max_connections: 4,
            ..DbConfig::default()
        };
        let pool = connect_lazy(&config);
        assert_eq!(pool.size(), 0);
        assert_eq!(pool.options().get_max_connections(), 4);
    }
}
