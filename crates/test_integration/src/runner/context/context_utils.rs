use app_state::AppSettings;
use color_eyre::eyre::Result;
use common_services::database::{get_db_pool, run_migrations};
use sqlx::{Executor, PgPool};
use std::net::TcpListener;
use tempfile::TempDir;
use tracing::info;
use url::Url;

/// Points `base_settings` at the test database, a temporary media folder and a free port.
pub fn create_test_settings(
    database_url: &str,
    base_settings: &AppSettings,
) -> Result<(AppSettings, TempDir)> {
    let mut settings = base_settings.clone();

    let media_dir = TempDir::new()?;
    let port = get_free_port()?;
    settings.api.port = u32::from(port);
    settings.api.public_url = format!("http://127.0.0.1:{port}");
    settings.media.media_root = media_dir.path().to_path_buf();
    settings.secrets.database_url = database_url.to_owned();

    Ok((settings, media_dir))
}

/// Recreates `database_name` on the server behind `base_database_url` and migrates it.
/// Returns the pool for the new database and one for the `postgres` maintenance database.
pub async fn create_test_database(
    base_database_url: &str,
    database_name: &str,
    settings: &AppSettings,
) -> Result<(PgPool, PgPool, String)> {
    let db_constants = &settings.constants.database;

    let mut management_db_url = Url::parse(base_database_url)?;
    management_db_url.set_path("/postgres");
    let management_pool = get_db_pool(management_db_url.as_str(), db_constants).await?;
    force_drop_db(&management_pool, database_name).await;

    management_pool
        .execute(format!("CREATE DATABASE \"{database_name}\"").as_str())
        .await?;

    let mut test_db_url = Url::parse(base_database_url)?;
    test_db_url.set_path(&format!("/{database_name}"));
    let main_pool = get_db_pool(test_db_url.as_str(), db_constants).await?;

    run_migrations(&main_pool).await?;
    info!("Finished database migrations for {}", database_name);

    Ok((main_pool, management_pool, test_db_url.to_string()))
}

/// Drops the database if it exists, disconnecting any open sessions.
pub async fn force_drop_db(management_pool: &PgPool, db_name: &str) {
    let query = format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)");
    if let Err(e) = management_pool.execute(query.as_str()).await {
        info!("Could not drop database {}: {}", db_name, e);
    }
}

pub fn get_free_port() -> Result<u16> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
