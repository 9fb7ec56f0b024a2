use crate::api_state::ApiContext;
use crate::auth::handlers::{obtain_token, refresh_token, register};
use app_state::RateLimitingSettings;
use axum::{Router, routing::post};
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tracing::info;

pub fn auth_public_router(rate_limiting: &RateLimitingSettings) -> Router<ApiContext> {
    let router = Router::new()
        .route("/users", post(register))
        .route("/token", post(obtain_token))
        .route("/token/refresh", post(refresh_token));

    if !rate_limiting.enabled {
        info!("Rate limiting on auth routes is disabled");
        return router;
    }

    let governor_conf = GovernorConfigBuilder::default()
        .per_second(rate_limiting.req_per_second)
        .burst_size(rate_limiting.burst_size)
        .finish()
        .expect("Could not create rate-limiting governor.");

    info!(
        "Using request limits: req_per_second={}, burst_size={}",
        rate_limiting.req_per_second, rate_limiting.burst_size
    );

    router.layer(GovernorLayer::new(governor_conf))
}
