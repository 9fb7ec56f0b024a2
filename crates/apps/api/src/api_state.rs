use app_state::AppSettings;
use axum::extract::FromRef;
use common_services::media::MediaStorage;
use sqlx::PgPool;

/// Router state shared by every handler.
#[derive(Clone)]
pub struct ApiContext {
    pub pool: PgPool,
    pub settings: AppSettings,
    pub media: MediaStorage,
}

impl ApiContext {
    #[must_use]
    pub fn new(pool: PgPool, settings: AppSettings) -> Self {
        let media = MediaStorage::new(
            settings.media.media_root.clone(),
            &settings.api.public_url,
            settings.constants.database.stored_file_name_length,
        );
        Self {
            pool,
            settings,
            media,
        }
    }
}

impl FromRef<ApiContext> for PgPool {
    fn from_ref(state: &ApiContext) -> Self {
        state.pool.clone()
    }
}
