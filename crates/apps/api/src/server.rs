use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::ServiceExt;
use axum::extract::Request;
use axum::routing::get_service;
use color_eyre::Result;
use http::{HeaderValue, header};
use sqlx::PgPool;
use std::iter::once;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::cors;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

fn cors_layer(settings: &AppSettings) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = settings
        .api
        .allowed_origins
        .iter()
        .filter_map(|s| match s.parse() {
            Ok(hv) => Some(hv),
            Err(e) => {
                error!("Invalid CORS origin configured: {} - Error: {}", s, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_methods(cors::Any)
        .allow_origin(allowed_origins)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::USER_AGENT,
            header::CACHE_CONTROL,
            header::PRAGMA,
        ])
}

/// The full application: routes, middleware, and static media, with trailing slashes
/// trimmed before routing so `/albums/` and `/albums` reach the same handler.
pub fn create_app(api_state: ApiContext) -> NormalizePath<axum::Router> {
    let serve_dir = ServeDir::new(&api_state.settings.media.media_root);
    let cors = cors_layer(&api_state.settings);

    let router = create_router(api_state)
        .nest_service("/media", get_service(serve_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SetSensitiveRequestHeadersLayer::new(once(
            header::AUTHORIZATION,
        )));

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

pub async fn serve(pool: PgPool, settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");
    let address = settings.api.listen_address();
    let app = create_app(ApiContext::new(pool, settings));

    let listener = TcpListener::bind(&address).await?;
    info!("📷 Server listening on http://{}", listener.local_addr()?);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;
    Ok(())
}
