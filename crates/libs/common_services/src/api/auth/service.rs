use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use crate::api::auth::interfaces::{
    AuthClaims, LoginUser, RegisterResponse, RegisterUser, Tokens,
};
use crate::api::auth::token::{PresentedToken, RefreshTokenParts};
use crate::api::users::interfaces::UserResponse;
use crate::api::users::service::USERNAME_TAKEN;
use crate::api::validation::{FieldErrors, REQUIRED};
use crate::database::DbError;
use crate::database::app_user::UserWithPassword;
use crate::database::user_store::UserStore;
use crate::media::MediaStorage;
use app_state::AppSettings;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::{Executor, PgPool, Postgres};
use tracing::{info, instrument, warn};
use validator::Validate;

/// Validates a registration payload, including the required fields.
fn validate_registration(payload: &RegisterUser) -> Result<(), FieldErrors> {
    let mut errors = payload
        .validate()
        .err()
        .map(FieldErrors::from)
        .unwrap_or_default();
    errors.require("username", payload.username.as_ref());
    errors.require("password", payload.password.as_ref());
    errors.into_result()
}

/// Creates a user and immediately issues a token pair for them.
///
/// # Errors
///
/// * `AuthError::Validation` if a field is invalid or the username is already taken.
/// * `AuthError::Database` for other database-related issues.
/// * `AuthError::Internal` for hashing or token encoding errors.
#[instrument(skip(pool, settings, media, payload))]
pub async fn register_user(
    pool: &PgPool,
    settings: &AppSettings,
    media: &MediaStorage,
    payload: RegisterUser,
) -> Result<RegisterResponse, AuthError> {
    validate_registration(&payload)?;
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    if UserStore::username_taken(pool, &username, None).await? {
        return Err(FieldErrors::single("username", USERNAME_TAKEN).into());
    }

    let hashed = hash_password(password.as_bytes())?;
    info!("Creating user username={}", username);

    let mut tx = pool.begin().await?;
    let user = match UserStore::create(
        &mut *tx,
        &username,
        payload.email.as_deref().unwrap_or_default(),
        &hashed,
        payload.first_name.as_deref().unwrap_or_default(),
        payload.last_name.as_deref().unwrap_or_default(),
        payload.bio.as_deref().unwrap_or_default(),
    )
    .await
    {
        Ok(user) => user,
        Err(DbError::UniqueViolation(_)) => {
            return Err(FieldErrors::single("username", USERNAME_TAKEN).into());
        }
        Err(e) => return Err(e.into()),
    };

    let refresh_parts = RefreshTokenParts::generate()?;
    store_refresh_token(
        &mut *tx,
        user.id,
        &refresh_parts,
        settings.constants.auth.refresh_token_expiry_days,
    )
    .await?;
    tx.commit().await?;

    let (access, expiry) = create_access_token(
        &settings.secrets.jwt,
        user.id,
        settings.constants.auth.access_token_expiry_minutes,
    )?;

    Ok(RegisterResponse {
        user: UserResponse::from_user(&user, media),
        tokens: Tokens {
            access,
            refresh: refresh_parts.raw_token,
            expiry,
        },
    })
}

/// Authenticates a user based on username and password.
///
/// # Errors
///
/// * `AuthError::InvalidCredentials` if the username or password is incorrect.
pub async fn authenticate_user(
    pool: &PgPool,
    username: &str,
    password: &str,
) -> Result<UserWithPassword, AuthError> {
    let user = UserStore::find_by_username_with_password(pool, username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let valid = verify_password(password.as_bytes(), &user.password)?;
    if !valid {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}

/// Checks credentials and issues a fresh token pair.
///
/// # Errors
///
/// * `AuthError::Validation` if username or password is missing.
/// * `AuthError::InvalidCredentials` if they don't match a user.
#[instrument(skip(pool, settings, payload))]
pub async fn obtain_tokens(
    pool: &PgPool,
    settings: &AppSettings,
    payload: &LoginUser,
) -> Result<Tokens, AuthError> {
    let mut errors = FieldErrors::new();
    errors.require("username", payload.username.as_ref());
    errors.require("password", payload.password.as_ref());
    errors.into_result()?;

    let user = authenticate_user(
        pool,
        payload.username.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )
    .await?;

    issue_tokens(pool, settings, user.id).await
}

/// Creates an access token and stores a new refresh token for `user_id`.
pub async fn issue_tokens(
    pool: &PgPool,
    settings: &AppSettings,
    user_id: i32,
) -> Result<Tokens, AuthError> {
    let (access, expiry) = create_access_token(
        &settings.secrets.jwt,
        user_id,
        settings.constants.auth.access_token_expiry_minutes,
    )?;
    let refresh_parts = RefreshTokenParts::generate()?;
    store_refresh_token(
        pool,
        user_id,
        &refresh_parts,
        settings.constants.auth.refresh_token_expiry_days,
    )
    .await?;

    Ok(Tokens {
        access,
        refresh: refresh_parts.raw_token,
        expiry,
    })
}

/// Stores a refresh token in the database.
pub async fn store_refresh_token(
    executor: impl Executor<'_, Database = Postgres>,
    user_id: i32,
    parts: &RefreshTokenParts,
    expiry_days: i64,
) -> Result<(), AuthError> {
    let exp = Utc::now() + Duration::days(expiry_days);
    sqlx::query(
        "INSERT INTO refresh_token (user_id, selector, verifier_hash, expires_at)
         VALUES ($1, $2, $3, $4)",
    )
    .bind(user_id)
    .bind(&parts.selector)
    .bind(&parts.verifier_hash)
    .bind(exp)
    .execute(executor)
    .await?;
    Ok(())
}

/// Creates a new access token for a given user ID.
/// Returns the token and its expiry in unix seconds.
///
/// # Errors
///
/// * `jsonwebtoken::Error` if token encoding fails.
pub fn create_access_token(
    jwt_secret: &str,
    user_id: i32,
    expiry_minutes: i64,
) -> Result<(String, u64), AuthError> {
    let exp = (Utc::now() + Duration::minutes(expiry_minutes)).timestamp();
    let claims = AuthClaims { sub: user_id, exp };
    let access_token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_ref()),
    )?;

    Ok((access_token, exp as u64))
}

/// Decodes and validates an access token, including its expiry.
///
/// # Errors
///
/// * `AuthError::InvalidToken` for a bad signature, a malformed token or an expired one.
pub fn decode_access_token(token: &str, jwt_secret: &str) -> Result<AuthClaims, AuthError> {
    decode::<AuthClaims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

/// Handles refresh token rotation, invalidating the old token and issuing a new pair.
///
/// # Errors
/// * `AuthError::InvalidToken` if the provided refresh token is malformed or invalid.
/// * `AuthError::RefreshTokenExpiredOrNotFound` if the refresh token is not found or has expired.
/// * `AuthError::UserNotFound` if the user associated with the token no longer exists.
#[instrument(skip(pool, settings, raw_token))]
pub async fn refresh_tokens(
    pool: &PgPool,
    settings: &AppSettings,
    raw_token: Option<&str>,
) -> Result<Tokens, AuthError> {
    let raw_token =
        raw_token.ok_or_else(|| AuthError::from(FieldErrors::single("refresh", REQUIRED)))?;
    let presented = PresentedToken::parse(raw_token)?;

    let (user_id, verifier_hash) = sqlx::query_as::<_, (i32, String)>(
        "SELECT user_id, verifier_hash FROM refresh_token
         WHERE selector = $1 AND expires_at > NOW()",
    )
    .bind(&presented.selector)
    .fetch_optional(pool)
    .await?
    .ok_or(AuthError::RefreshTokenExpiredOrNotFound)?;

    if !presented.matches(&verifier_hash)? {
        // Wrong verifier for a known selector: treat as theft and drop every session of the user.
        warn!("Refresh token verifier mismatch for user {}", user_id);
        if let Err(e) = sqlx::query("DELETE FROM refresh_token WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await
        {
            warn!("Could not revoke refresh tokens of user {}: {}", user_id, e);
        }
        return Err(AuthError::InvalidToken);
    }

    if UserStore::find_by_id(pool, user_id).await?.is_none() {
        return Err(AuthError::UserNotFound);
    }

    let mut tx = pool.begin().await?;
    let consumed = sqlx::query("DELETE FROM refresh_token WHERE selector = $1")
        .bind(&presented.selector)
        .execute(&mut *tx)
        .await?;
    if consumed.rows_affected() == 0 {
        // Lost a race with a concurrent refresh of the same token.
        return Err(AuthError::RefreshTokenExpiredOrNotFound);
    }

    let new_parts = RefreshTokenParts::generate()?;
    store_refresh_token(
        &mut *tx,
        user_id,
        &new_parts,
        settings.constants.auth.refresh_token_expiry_days,
    )
    .await?;
    tx.commit().await?;

    let (access, expiry) = create_access_token(
        &settings.secrets.jwt,
        user_id,
        settings.constants.auth.access_token_expiry_minutes,
    )?;
    Ok(Tokens {
        access,
        refresh: new_parts.raw_token,
        expiry,
    })
}
