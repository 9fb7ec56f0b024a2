use crate::runner::context::context_utils::{
    create_test_database, create_test_settings, force_drop_db,
};
use app_state::{AppSettings, load_settings_from_path};
use color_eyre::eyre::{Result, eyre};
use reqwest::Client;
use sqlx::PgPool;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Environment variable holding a Postgres url. The suite creates its own database on that server.
pub const TEST_DATABASE_URL_VAR: &str = "TEST_DATABASE_URL";
const TEST_DATABASE_NAME: &str = "photo_albums_integration_test";

/// A migrated database, a running API server and an HTTP client pointed at it.
pub struct TestContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub http_client: Client,
    management_pool: PgPool,
    _media_dir: TempDir,
    api_handle: JoinHandle<()>,
}

impl TestContext {
    /// Returns `None` when no test database is configured.
    pub async fn from_env() -> Result<Option<Self>> {
        match std::env::var(TEST_DATABASE_URL_VAR) {
            Ok(url) if !url.is_empty() => Ok(Some(Self::new(&url).await?)),
            _ => Ok(None),
        }
    }

    pub async fn new(base_database_url: &str) -> Result<Self> {
        info!("Setting up test environment...");

        let settings_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("assets/settings.yaml")
            .canonicalize()?;
        let base_settings = load_settings_from_path(&settings_path, false)?;

        let (pool, management_pool, database_url) =
            create_test_database(base_database_url, TEST_DATABASE_NAME, &base_settings).await?;
        let (settings, media_dir) = create_test_settings(&database_url, &base_settings)?;

        let api_pool = pool.clone();
        let api_settings = settings.clone();
        let api_handle = tokio::spawn(async move {
            if let Err(e) = api::serve(api_pool, api_settings).await {
                error!("API server failed: {}", e);
            }
        });

        let http_client = Client::new();
        Self::wait_for_healthy_api(&settings, &http_client).await?;

        info!("Test environment is ready.");
        Ok(Self {
            pool,
            settings,
            http_client,
            management_pool,
            _media_dir: media_dir,
            api_handle,
        })
    }

    /// Absolute url for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.api.public_url, path)
    }

    async fn wait_for_healthy_api(settings: &AppSettings, http_client: &Client) -> Result<()> {
        let health_url = format!("{}/health", settings.api.public_url);
        for attempt in 1..=20 {
            match http_client.get(&health_url).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("API is healthy after {} attempt(s).", attempt);
                    return Ok(());
                }
                Ok(response) => warn!("Health check returned {}", response.status()),
                Err(e) => warn!("Health check attempt {} failed: {}", attempt, e),
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
        Err(eyre!("API did not become healthy within the timeout period."))
    }

    /// Stops the server and drops the test database.
    pub async fn teardown(&self) {
        info!("Tearing down test environment...");
        self.api_handle.abort();
        self.pool.close().await;
        force_drop_db(&self.management_pool, TEST_DATABASE_NAME).await;
        info!("Teardown complete.");
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.api_handle.abort();
    }
}
