pub mod password;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::types::Role;

/// Access token payload. Nothing else is carried: no issuer, no refresh data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userID")]
    pub user_id: i64,
    #[serde(rename = "userType")]
    pub role: Role,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64, role: Role, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            role,
            exp: expires_at.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("JWT secret is empty")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(#[source] jsonwebtoken::errors::Error),

    /// Malformed, wrongly signed, expired, or missing a required claim.
    #[error("invalid token: {0}")]
    AuthInvalid(#[source] jsonwebtoken::errors::Error),
}

/// HMAC-SHA256 signing and verification keys derived from the server secret.
#[derive(Clone)]
pub struct JwtKeys {
    inner: Arc<KeyPair>,
}

struct KeyPair {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }

        Ok(Self {
            inner: Arc::new(KeyPair {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
        })
    }

    /// Signs an access token for `user_id` that expires at `expires_at`.
    pub fn issue(&self, user_id: i64, role: Role, expires_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims::new(user_id, role, expires_at);
        encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)
            .map_err(AuthError::TokenGeneration)
    }

    /// Verifies signature, algorithm and expiry, then extracts the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        decode::<Claims>(token, &self.inner.decoding, &validation)
            .map(|data| data.claims)
            .map_err(AuthError::AuthInvalid)
    }
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("JwtKeys(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn keys() -> JwtKeys {
        JwtKeys::new("test-secret").unwrap()
    }

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let exp = Utc::now() + Duration::hours(1);
        let token = keys().issue(7, Role::Student, exp).unwrap();

        let claims = keys().verify(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.exp, exp.timestamp());
    }

    #[test]
    fn rejects_empty_secret() {
        assert!(matches!(JwtKeys::new(""), Err(AuthError::InvalidSecret)));
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = JwtKeys::new("other-secret")
            .unwrap()
            .issue(1, Role::Admin, Utc::now() + Duration::hours(1))
            .unwrap();

        assert!(matches!(keys().verify(&token), Err(AuthError::AuthInvalid(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let token = keys().issue(1, Role::Admin, Utc::now() - Duration::minutes(5)).unwrap();
        assert!(matches!(keys().verify(&token), Err(AuthError::AuthInvalid(_))));
    }

    #[test]
    fn rejects_other_hmac_algorithm() {
        let claims = Claims::new(1, Role::Admin, Utc::now() + Duration::hours(1));
        let token = encode(
            &Header::new(Algorithm::HS384),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(keys().verify(&token).is_err());
    }

    #[test]
    fn rejects_missing_claims_and_unknown_role() {
        let key = EncodingKey::from_secret(b"test-secret");
        let exp = (Utc::now() + Duration::hours(1)).timestamp();

        let payloads = [
            json!({ "userType": "ADMIN", "exp": exp }),
            json!({ "userID": 1, "exp": exp }),
            json!({ "userID": 1, "userType": "ADMIN" }),
            json!({ "userID": 1, "userType": "TEACHER", "exp": exp }),
        ];

        for payload in payloads {
            let token = encode(&Header::default(), &payload, &key).unwrap();
            assert!(keys().verify(&token).is_err(), "accepted {payload}");
        }
    }

    #[test]
    fn rejects_garbage() {
        assert!(keys().verify("not-a-token").is_err());
        assert!(keys().verify("").is_err());
    }
}
