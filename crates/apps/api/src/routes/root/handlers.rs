use axum::extract::State;
use axum::http::StatusCode;
use sqlx::PgPool;
use tracing::error;

#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses(
        (status = 200, description = "Root message")
    )
)]
pub async fn root() -> &'static str {
    "Photo albums API. Documentation is served at /docs."
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "API is healthy and ready to accept traffic", body = String),
        (status = 503, description = "API is not healthy, likely due to a database issue.")
    )
)]
pub async fn health_check(State(pool): State<PgPool>) -> Result<&'static str, StatusCode> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .map(|_| "OK")
        .map_err(|e| {
            error!("Health check could not reach the database: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        })
}
