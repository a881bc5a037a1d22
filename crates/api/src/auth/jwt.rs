//! Access- and refresh-token signing and verification.
//!
//! Both token classes are HS256 JWTs carrying the same [`Claims`] shape, but
//! each class has its own secret and lifetime so a token of one class never
//! verifies as the other. Refresh tokens are persisted only as their SHA-256
//! digest (see [`hash_refresh_token`]).

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use socialconnect_core::types::DbId;
use uuid::Uuid;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// The user's role name (`"User"` or `"Admin"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Random token id; keeps two tokens minted in the same second distinct.
    pub jti: String,
}

/// Secrets and lifetimes for both token classes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    /// Access token lifetime in seconds (default: 3600).
    pub access_token_expiry_secs: i64,
    /// Refresh token lifetime in seconds (default: 14 days).
    pub refresh_token_expiry_secs: i64,
}

/// Default access token lifetime: one hour.
pub const DEFAULT_ACCESS_EXPIRY_SECS: i64 = 3600;
/// Default refresh token lifetime: fourteen days.
pub const DEFAULT_REFRESH_EXPIRY_SECS: i64 = 14 * 24 * 3600;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default   |
    /// |--------------------------|----------|-----------|
    /// | `JWT_ACCESS_SECRET`      | **yes**  | --        |
    /// | `JWT_REFRESH_SECRET`     | **yes**  | --        |
    /// | `JWT_ACCESS_EXPIRES_IN`  | no       | `3600`    |
    /// | `JWT_REFRESH_EXPIRES_IN` | no       | `1209600` |
    ///
    /// # Panics
    ///
    /// Panics if either secret is missing or empty, if the two secrets are
    /// equal, or if a lifetime is not a valid `i64`.
    pub fn from_env() -> Self {
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .expect("JWT_ACCESS_SECRET must be set in the environment");
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .expect("JWT_REFRESH_SECRET must be set in the environment");
        assert!(!access_secret.is_empty(), "JWT_ACCESS_SECRET must not be empty");
        assert!(!refresh_secret.is_empty(), "JWT_REFRESH_SECRET must not be empty");
        assert_ne!(
            access_secret, refresh_secret,
            "JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ"
        );

        let access_token_expiry_secs: i64 = std::env::var("JWT_ACCESS_EXPIRES_IN")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_SECS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRES_IN must be a valid i64");

        let refresh_token_expiry_secs: i64 = std::env::var("JWT_REFRESH_EXPIRES_IN")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_SECS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRES_IN must be a valid i64");

        Self {
            access_secret,
            refresh_secret,
            access_token_expiry_secs,
            refresh_token_expiry_secs,
        }
    }
}

fn sign(
    user_id: DbId,
    role: &str,
    secret: &str,
    lifetime_secs: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: now + lifetime_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Sign a short-lived access token for `user_id`.
pub fn generate_access_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        user_id,
        role,
        &config.access_secret,
        config.access_token_expiry_secs,
    )
}

/// Sign a long-lived refresh token for `user_id`.
pub fn generate_refresh_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        user_id,
        role,
        &config.refresh_secret,
        config.refresh_token_expiry_secs,
    )
}

/// Verify an access token's signature and expiry, returning its [`Claims`].
pub fn validate_access_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify(token, &config.access_secret)
}

/// Verify a refresh token's signature and expiry, returning its [`Claims`].
///
/// This only checks the cryptography; whether the session is still usable is
/// decided by the session row.
pub fn validate_refresh_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    verify(token, &config.refresh_secret)
}

/// Compute the SHA-256 hex digest under which a refresh token is stored.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_token_expiry_secs: DEFAULT_ACCESS_EXPIRY_SECS,
            refresh_token_expiry_secs: DEFAULT_REFRESH_EXPIRY_SECS,
        }
    }

    #[test]
    fn access_token_round_trips_claims() {
        let config = test_config();
        let token = generate_access_token(42, "Admin", &config).expect("signing should succeed");

        let claims = validate_access_token(&token, &config).expect("token should verify");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.exp - claims.iat, DEFAULT_ACCESS_EXPIRY_SECS);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn refresh_token_uses_its_own_lifetime() {
        let config = test_config();
        let token = generate_refresh_token(7, "User", &config).expect("signing should succeed");

        let claims = validate_refresh_token(&token, &config).expect("token should verify");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.exp - claims.iat, DEFAULT_REFRESH_EXPIRY_SECS);
    }

    #[test]
    fn token_classes_do_not_cross_verify() {
        let config = test_config();
        let access = generate_access_token(1, "User", &config).unwrap();
        let refresh = generate_refresh_token(1, "User", &config).unwrap();

        assert!(validate_refresh_token(&access, &config).is_err());
        assert!(validate_access_token(&refresh, &config).is_err());
    }

    #[test]
    fn tokens_minted_together_are_distinct() {
        let config = test_config();
        let a = generate_refresh_token(1, "User", &config).unwrap();
        let b = generate_refresh_token(1, "User", &config).unwrap();
        assert_ne!(a, b);
        assert_ne!(hash_refresh_token(&a), hash_refresh_token(&b));
    }

    #[test]
    fn expired_token_fails() {
        let config = test_config();

        // Well past the default 60-second leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: "User".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.access_secret.as_bytes()),
        )
        .unwrap();

        assert!(validate_access_token(&token, &config).is_err());
    }

    #[test]
    fn tampered_token_fails() {
        let config = test_config();
        let mut token = generate_access_token(1, "User", &config).unwrap();
        token.push('x');
        assert!(validate_access_token(&token, &config).is_err());
        assert!(validate_access_token("not-a-jwt", &config).is_err());
    }

    #[test]
    fn refresh_hash_is_stable_hex() {
        let hash = hash_refresh_token("some-token");
        assert_eq!(hash, hash_refresh_token("some-token"));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
