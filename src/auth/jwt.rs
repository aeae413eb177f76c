//! JWT issuance for successful logins.

use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub exp: i64,
    pub iat: i64,
    pub jti: String, // unique per issued token
}

#[derive(Clone)]
pub struct JwtSecret {
    secret: String,
    ttl: Duration,
}

impl JwtSecret {
    pub fn new(secret: String, ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::hours(24));
        Self { secret, ttl }
    }

    pub fn issue(&self, user_id: Uuid) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: now
                .checked_add_signed(self.ttl)
                .ok_or_else(|| AppError::Internal(anyhow::anyhow!("token expiry out of range")))?
                .timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!("sign token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    fn secret(key: &str) -> JwtSecret {
        JwtSecret::new(key.to_string(), std::time::Duration::from_secs(3600))
    }

    fn claims(key: &str, token: &str) -> jsonwebtoken::errors::Result<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(key.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
    }

    #[test]
    fn token_carries_subject_and_lifetime() {
        let user_id = Uuid::new_v4();
        let token = secret("test-secret").issue(user_id).unwrap();
        let claims = claims("test-secret", &token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn each_issue_yields_a_fresh_token() {
        let jwt = secret("test-secret");
        let user_id = Uuid::new_v4();
        assert_ne!(jwt.issue(user_id).unwrap(), jwt.issue(user_id).unwrap());
    }

    #[test]
    fn token_is_signed_with_the_configured_secret() {
        let token = secret("one").issue(Uuid::new_v4()).unwrap();
        assert!(claims("two", &token).is_err());
    }

    #[test]
    fn unrepresentable_expiry_is_an_error_not_a_panic() {
        let jwt = JwtSecret {
            secret: "test-secret".to_string(),
            ttl: Duration::days(365 * 1_000_000),
        };
        assert!(matches!(jwt.issue(Uuid::new_v4()), Err(AppError::Internal(_))));
    }
}
