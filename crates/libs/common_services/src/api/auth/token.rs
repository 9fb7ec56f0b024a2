//! Opaque refresh tokens in selector/verifier form.
//!
//! The client receives `base64(selector || verifier)`. The database keeps the selector in the
//! clear, for lookup, and only an Argon2 hash of the verifier.

use crate::api::auth::error::AuthError;
use crate::api::auth::hashing::{hash_password, verify_password};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rng};

const SELECTOR_LEN: usize = 16;
const VERIFIER_LEN: usize = 16;
const TOKEN_LEN: usize = SELECTOR_LEN + VERIFIER_LEN;

/// A newly issued refresh token. `raw_token` is handed to the client once and never stored.
pub struct RefreshTokenParts {
    pub raw_token: String,
    pub selector: String,
    pub verifier_hash: String,
}

impl RefreshTokenParts {
    /// # Errors
    ///
    /// * `AuthError::Internal` if hashing the verifier fails.
    pub fn generate() -> Result<Self, AuthError> {
        let mut raw_bytes = [0u8; TOKEN_LEN];
        rng().fill_bytes(&mut raw_bytes);
        let (selector_bytes, verifier_bytes) = raw_bytes.split_at(SELECTOR_LEN);

        Ok(Self {
            raw_token: URL_SAFE_NO_PAD.encode(raw_bytes),
            selector: URL_SAFE_NO_PAD.encode(selector_bytes),
            verifier_hash: hash_password(verifier_bytes)?,
        })
    }
}

/// A refresh token as sent back by a client.
#[derive(Debug)]
pub struct PresentedToken {
    pub selector: String,
    verifier: Vec<u8>,
}

impl PresentedToken {
    /// # Errors
    ///
    /// * `AuthError::InvalidToken` if the token is not base64 or has the wrong length.
    pub fn parse(raw_token: &str) -> Result<Self, AuthError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(raw_token.trim())
            .map_err(|_| AuthError::InvalidToken)?;
        if bytes.len() != TOKEN_LEN {
            return Err(AuthError::InvalidToken);
        }

        let (selector_bytes, verifier_bytes) = bytes.split_at(SELECTOR_LEN);
        Ok(Self {
            selector: URL_SAFE_NO_PAD.encode(selector_bytes),
            verifier: verifier_bytes.to_vec(),
        })
    }

    /// Whether the verifier half matches the stored hash.
    pub fn matches(&self, verifier_hash: &str) -> Result<bool, AuthError> {
        Ok(verify_password(&self.verifier, verifier_hash)?)
    }
}
