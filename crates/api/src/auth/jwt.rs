//! Signed session tokens.
//!
//! A token carries everything needed to rebuild an [`Identity`], so
//! resolving a session never touches the database.

use contractly_core::identity::Identity;
use contractly_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `iss` claim stamped on and required of every session token.
pub const TOKEN_ISSUER: &str = "contractly";

const DEFAULT_EXPIRY_HOURS: i64 = 24;

/// Claims inside a session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The vendor's user id.
    pub sub: DbId,
    pub name: String,
    /// Vendor type name as stored (`photographer`, `caterer`, `florist`).
    pub vendor_type: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    /// Random per-login id, handy for correlating log lines.
    pub jti: String,
}

/// Token signing settings plus the flags of the cookie that carries it.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: bool,
}

impl JwtConfig {
    /// | Env Var            | Default    |
    /// |--------------------|------------|
    /// | `JWT_SECRET`       | (required) |
    /// | `JWT_EXPIRY_HOURS` | `24`       |
    /// | `COOKIE_SECURE`    | `false`    |
    ///
    /// Panics when `JWT_SECRET` is missing or empty, or a value does not
    /// parse.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set to a non-empty value");

        let expiry_hours = match std::env::var("JWT_EXPIRY_HOURS") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|_| panic!("JWT_EXPIRY_HOURS must be an integer, got '{raw}'")),
            Err(_) => DEFAULT_EXPIRY_HOURS,
        };
        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "True"))
            .unwrap_or(false);

        Self {
            secret,
            expiry_hours,
            cookie_secure,
        }
    }

    /// Session lifetime in seconds; also the cookie's `Max-Age`.
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation
    }
}

/// Sign a session token for `identity`.
pub fn generate_token(
    identity: &Identity,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: identity.user_id,
        name: identity.name.clone(),
        vendor_type: identity.vendor_type.as_str().to_string(),
        iss: TOKEN_ISSUER.to_string(),
        iat: now,
        exp: now + config.expiry_secs(),
        jti: Uuid::new_v4().to_string(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, expiry and issuer, returning the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &JwtConfig::validation(),
    )
    .map(|data| data.claims)
}
