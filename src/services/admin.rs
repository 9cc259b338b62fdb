//! Admin service
//!
//! Signup, login, and principal resolution on top of the admin repository,
//! the credential codec and the token service. Login reproduces the legacy
//! decrypt-and-compare check (see `services::credential`), and resolution
//! keeps "admin gone" distinct from "bad token" so the auth gate can log
//! the difference.

use std::sync::Arc;

use crate::db::repositories::{AdminRepository, StoreError};
use crate::models::{validate, Admin, NewAdmin};
use crate::services::credential::CredentialCodec;
use crate::services::token::TokenService;

#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    /// Signup with an email that is already registered.
    #[error("Admin already exists")]
    AdminExists,

    /// No admin with the given email.
    #[error("Admin does not exist")]
    AdminNotFound,

    /// Password mismatch at login.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Input for creating an admin account.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub email: String,
    pub name: String,
    pub username: Option<String>,
    pub password: String,
    pub img: Option<String>,
    pub phone: Option<String>,
}

pub struct AdminService {
    admins: Arc<dyn AdminRepository>,
    codec: CredentialCodec,
    tokens: Arc<TokenService>,
}

impl AdminService {
    pub fn new(
        admins: Arc<dyn AdminRepository>,
        codec: CredentialCodec,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            admins,
            codec,
            tokens,
        }
    }

    /// Create an admin account, storing the password as ciphertext.
    pub async fn signup(&self, input: SignupInput) -> Result<Admin, AdminServiceError> {
        if !validate::is_valid_email(&input.email) {
            return Err(AdminServiceError::Validation("Invalid email address".into()));
        }
        if input.name.trim().is_empty() {
            return Err(AdminServiceError::Validation("Name is required".into()));
        }
        if input.password.is_empty() {
            return Err(AdminServiceError::Validation("Password is required".into()));
        }

        if self.admins.exists_by_email(&input.email).await.map_err(internal)? {
            return Err(AdminServiceError::AdminExists);
        }

        let ciphertext = self
            .codec
            .encrypt(&input.password)
            .map_err(|e| AdminServiceError::Internal(anyhow::anyhow!(e)))?;

        let admin = self
            .admins
            .create(&NewAdmin {
                email: input.email,
                username: input.username,
                name: input.name,
                password: ciphertext,
                img: input.img,
                phone: input.phone,
            })
            .await
            .map_err(|e| match e {
                StoreError::Duplicate(_) => AdminServiceError::AdminExists,
                other => internal(other),
            })?;

        tracing::info!(admin_id = admin.id, "admin account created");
        Ok(admin)
    }

    /// Decrypt-and-compare login. Returns the admin and a fresh session
    /// token on success.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(Admin, String), AdminServiceError> {
        let admin = self
            .admins
            .find_by_email(email)
            .await
            .map_err(internal)?
            .ok_or(AdminServiceError::AdminNotFound)?;

        // An undecryptable stored credential (rotated secret, corrupt row)
        // reads as a failed login, not a server error.
        let stored = match self.codec.decrypt(&admin.password) {
            Ok(plaintext) => plaintext,
            Err(err) => {
                tracing::error!(admin_id = admin.id, error = %err, "stored credential unreadable");
                return Err(AdminServiceError::InvalidCredentials);
            }
        };

        if stored != password {
            return Err(AdminServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(&admin).map_err(AdminServiceError::Internal)?;
        tracing::info!(admin_id = admin.id, "admin logged in");
        Ok((admin, token))
    }

    /// Resolve a verified token's email claim to the full admin record.
    pub async fn resolve(&self, email: &str) -> Result<Admin, AdminServiceError> {
        self.admins
            .find_by_email(email)
            .await
            .map_err(internal)?
            .ok_or(AdminServiceError::AdminNotFound)
    }

    pub async fn list(&self) -> Result<Vec<Admin>, AdminServiceError> {
        self.admins.list().await.map_err(internal)
    }
}

fn internal(err: StoreError) -> AdminServiceError {
    AdminServiceError::Internal(anyhow::anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TokenConfig;
    use crate::db::create_test_pool;
    use crate::db::repositories::SqlxAdminRepository;

    async fn setup() -> AdminService {
        let pool = create_test_pool().await.unwrap();
        AdminService::new(
            SqlxAdminRepository::boxed(pool),
            CredentialCodec::new("test-credential-secret"),
            Arc::new(TokenService::new(&TokenConfig {
                secret: "test-token-secret".into(),
                ttl_days: 7,
            })),
        )
    }

    fn signup_input() -> SignupInput {
        SignupInput {
            email: "a@x.com".into(),
            name: "A".into(),
            username: Some("a".into()),
            password: "pw123".into(),
            img: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn signup_stores_ciphertext_not_plaintext() {
        let service = setup().await;
        let admin = service.signup(signup_input()).await.expect("signup");

        assert_ne!(admin.password, "pw123");
        assert!(!admin.password.contains("pw123"));
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let service = setup().await;
        service.signup(signup_input()).await.unwrap();

        let err = service.signup(signup_input()).await.unwrap_err();
        assert!(matches!(err, AdminServiceError::AdminExists));
    }

    #[tokio::test]
    async fn signup_rejects_bad_input() {
        let service = setup().await;

        let mut input = signup_input();
        input.email = "not-an-email".into();
        assert!(matches!(
            service.signup(input).await.unwrap_err(),
            AdminServiceError::Validation(_)
        ));

        let mut input = signup_input();
        input.password = String::new();
        assert!(matches!(
            service.signup(input).await.unwrap_err(),
            AdminServiceError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn login_round_trip() {
        let service = setup().await;
        service.signup(signup_input()).await.unwrap();

        let (admin, token) = service.login("a@x.com", "pw123").await.expect("login");
        assert_eq!(admin.email, "a@x.com");
        assert!(!token.is_empty());
    }

    #[tokio::test]
    async fn login_wrong_password_fails() {
        let service = setup().await;
        service.signup(signup_input()).await.unwrap();

        let err = service.login("a@x.com", "wrong").await.unwrap_err();
        assert!(matches!(err, AdminServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_unknown_email_is_distinct_failure() {
        let service = setup().await;
        let err = service.login("ghost@x.com", "pw123").await.unwrap_err();
        assert!(matches!(err, AdminServiceError::AdminNotFound));
    }

    #[tokio::test]
    async fn resolve_distinguishes_missing_principal() {
        let service = setup().await;
        service.signup(signup_input()).await.unwrap();

        assert!(service.resolve("a@x.com").await.is_ok());
        assert!(matches!(
            service.resolve("ghost@x.com").await.unwrap_err(),
            AdminServiceError::AdminNotFound
        ));
    }
}
