//! Session tokens
//!
//! Signed, compact bearer tokens identifying an admin: HS256 JWT over
//! `{sub, email, name, iat, exp}`. The expiry is part of the signed payload,
//! so a copied token string dies with it — the cookie's Max-Age is transport
//! convenience, not the security boundary.
//!
//! `verify` fails closed: anything malformed, tampered, or expired comes
//! back as `TokenError::Invalid`, never a panic and never partial claims.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::TokenConfig;
use crate::models::Admin;

/// Signed claim set carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Admin id.
    pub sub: i64,
    pub email: String,
    pub name: String,
    /// Issued at (unix timestamp).
    pub iat: usize,
    /// Expires at (unix timestamp).
    pub exp: usize,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::days(config.ttl_days),
        }
    }

    /// Lifetime of issued tokens, in whole seconds. The login route uses
    /// this for the cookie Max-Age so both expire together.
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    pub fn issue(&self, admin: &Admin) -> anyhow::Result<String> {
        self.issue_with_ttl(admin, self.ttl)
    }

    fn issue_with_ttl(&self, admin: &Admin, ttl: Duration) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: admin.id,
            email: admin.email.clone(),
            name: admin.name.clone(),
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        tracing::debug!(admin_id = admin.id, "session token issued");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        match decode::<TokenClaims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => {
                tracing::debug!(error = %err, "token verification failed");
                Err(TokenError::Invalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn admin() -> Admin {
        Admin {
            id: 7,
            email: "a@x.com".into(),
            username: Some("a".into()),
            name: "A".into(),
            password: "ct".into(),
            img: None,
            phone: None,
            is_central_admin: false,
            two_factor: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(secret: &str) -> TokenService {
        TokenService::new(&TokenConfig {
            secret: secret.into(),
            ttl_days: 7,
        })
    }

    #[test]
    fn issue_and_verify_round_trips_claims() {
        let tokens = service("dev-secret");
        let token = tokens.issue(&admin()).expect("issue");

        let claims = tokens.verify(&token).expect("verify");
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.name, "A");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn any_flipped_character_invalidates_the_token() {
        let tokens = service("dev-secret");
        let token = tokens.issue(&admin()).expect("issue");

        let bytes = token.as_bytes();
        // Sample positions across header, payload and signature.
        for idx in [0, 3, bytes.len() / 2, bytes.len() - 4, bytes.len() - 1] {
            let mut tampered = token.clone().into_bytes();
            tampered[idx] = if tampered[idx] == b'A' { b'B' } else { b'A' };
            let tampered = String::from_utf8(tampered).unwrap();
            if tampered == token {
                continue;
            }
            assert!(
                tokens.verify(&tampered).is_err(),
                "tampering at byte {} must invalidate the token",
                idx
            );
        }
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = service("dev-secret").issue(&admin()).expect("issue");
        assert!(service("other-secret").verify(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = service("dev-secret");
        let token = tokens
            .issue_with_ttl(&admin(), Duration::days(-1))
            .expect("issue");
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected_not_panicked_on() {
        let tokens = service("dev-secret");
        for garbage in ["", "not-a-jwt", "a.b", "a.b.c.d", "....."] {
            assert!(tokens.verify(garbage).is_err());
        }
    }
}
