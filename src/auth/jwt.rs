use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PortagenError;

const JWT_ISSUER: &str = "portagen.api.login";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys derived from the configured secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: TimeDelta,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: TimeDelta::days(ttl_days),
        }
    }

    pub fn issue(&self, user_id: Uuid) -> Result<String, PortagenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            iss: JWT_ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding,
        )?)
    }

    /// Any decode failure (bad signature, expiry, wrong issuer) is a 401.
    pub fn verify(&self, token: &str) -> Result<Claims, PortagenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;
        validation.set_issuer(&[JWT_ISSUER]);

        jsonwebtoken::decode::<Claims>(token.trim(), &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "rejected bearer token");
                PortagenError::Unauthorized("Not authorized, token failed")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let keys = TokenKeys::new("secret", 30);
        let id = Uuid::new_v4();
        let token = keys.issue(id).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = TokenKeys::new("secret", 30).issue(Uuid::new_v4()).unwrap();
        let err = TokenKeys::new("other", 30).verify(&token).unwrap_err();
        assert!(matches!(err, PortagenError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("secret", -2);
        let token = keys.issue(Uuid::new_v4()).unwrap();
        assert!(keys.verify(&token).is_err());
    }
}
