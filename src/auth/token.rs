//! Session tokens. Login and registration hand out one HS256 JWT whose
//! payload is the caller's public `uuid`; it lives `JWT_TTL_MINUTES`
//! (8h by default) and there is no refresh.

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub uuid: Uuid,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    pub fn issue(&self, user_uuid: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = SessionClaims {
            uuid: user_uuid,
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(%user_uuid, "session token issued");
        Ok(token)
    }

    /// The user a token was issued to. Fails on bad signature or expiry.
    pub fn user_uuid(&self, token: &str) -> anyhow::Result<Uuid> {
        let data = decode::<SessionClaims>(token, &self.decoding, &Validation::default())?;
        Ok(data.claims.uuid)
    }
}

impl From<&JwtConfig> for SessionKeys {
    fn from(cfg: &JwtConfig) -> Self {
        Self::new(&cfg.secret, cfg.ttl_minutes)
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        SessionKeys::from(&state.config.jwt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_names_its_user() {
        let keys = SessionKeys::new("secret", 480);
        let user_uuid = Uuid::new_v4();
        let token = keys.issue(user_uuid).unwrap();
        assert_eq!(keys.user_uuid(&token).unwrap(), user_uuid);
    }

    #[test]
    fn payload_carries_uuid_and_lifetime() {
        let keys = SessionKeys::new("secret", 480);
        let user_uuid = Uuid::new_v4();
        let token = keys.issue(user_uuid).unwrap();

        let raw = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::default(),
        )
        .unwrap()
        .claims;
        assert_eq!(raw["uuid"], user_uuid.to_string());
        let lifetime = raw["exp"].as_i64().unwrap() - raw["iat"].as_i64().unwrap();
        assert_eq!(lifetime, 8 * 60 * 60);
    }

    #[test]
    fn other_secret_is_rejected() {
        let token = SessionKeys::new("one", 5).issue(Uuid::new_v4()).unwrap();
        assert!(SessionKeys::new("two", 5).user_uuid(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::new("secret", -10);
        let token = keys.issue(Uuid::new_v4()).unwrap();
        assert!(keys.user_uuid(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(SessionKeys::new("secret", 5).user_uuid("not.a.jwt").is_err());
    }
}
