//! HS256 access tokens.

use bagline_core::types::RecordId;
use chrono::Utc;
use jsonwebtoken::errors::Error as JwtError;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEFAULT_EXPIRY_HOURS: i64 = 24 * 7;

/// Payload of every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: RecordId,
    /// Role label at issue time, e.g. `"Operador"`.
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    fn issued_at(user_id: RecordId, role: &str, now: i64, lifetime_secs: i64) -> Self {
        Self {
            sub: user_id,
            role: role.to_string(),
            exp: now + lifetime_secs,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }
}

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_EXPIRY_HOURS`
    /// (default 168).
    ///
    /// # Panics
    ///
    /// On a missing or empty secret, or a non-numeric expiry.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let expiry_hours = match std::env::var("JWT_EXPIRY_HOURS") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|_| panic!("JWT_EXPIRY_HOURS must be an integer, got '{raw}'")),
            Err(_) => DEFAULT_EXPIRY_HOURS,
        };

        Self {
            secret,
            expiry_hours,
        }
    }

    /// Token lifetime as reported to clients in `expires_in`.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiry_hours * 3600
    }

    /// Sign a fresh token for `user_id`.
    pub fn issue(&self, user_id: RecordId, role: &str) -> Result<String, JwtError> {
        let claims = Claims::issued_at(
            user_id,
            role,
            Utc::now().timestamp(),
            self.expires_in_secs(),
        );
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
    }

    /// Check signature, algorithm and expiry, then return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);
        jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
    }
}
