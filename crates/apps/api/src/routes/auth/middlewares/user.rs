use crate::api_state::ApiContext;
use crate::auth::middlewares::common::{extract_context, extract_token};
use axum::extract::{FromRequestParts, State};
use axum::http::request::Parts;
use common_services::api::auth::error::AuthError;
use common_services::api::auth::service::decode_access_token;
use common_services::database::app_user::User;
use common_services::database::user_store::UserStore;
use tracing::debug;

/// Bearer-token authentication for the protected routes.
///
/// Rejects with 401 when the header is missing, the token is invalid or expired,
/// or the account behind it no longer exists. On success the `User` is placed in the
/// request extensions, where handlers pick it up as `Extension<User>`.
#[derive(Clone, Debug)]
pub struct ApiUser(pub User);

impl ApiUser {
    async fn resolve(parts: &Parts, context: &ApiContext) -> Result<User, AuthError> {
        let token = extract_token(parts)?;
        let claims = decode_access_token(&token, &context.settings.secrets.jwt)?;
        UserStore::find_by_id(&context.pool, claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

impl<S> FromRequestParts<S> for ApiUser
where
    S: Send + Sync,
    State<ApiContext>: FromRequestParts<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let context = extract_context(parts, state).await?;
        let user = Self::resolve(parts, &context).await?;
        debug!("Request authenticated as user {}", user.id);
        parts.extensions.insert(user.clone());
        Ok(Self(user))
    }
}
