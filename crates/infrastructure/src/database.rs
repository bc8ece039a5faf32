use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use wishboard_core::{AppError, AppResult};

/// Connects to PostgreSQL and applies pending migrations.
pub async fn connect_and_migrate(database_url: &str) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|error| {
            AppError::Persistence(format!("failed to connect to database: {error}"))
        })?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Persistence(format!("failed to run migrations: {error}")))?;

    Ok(pool)
}
