//! Business services
//!
//! The auth pipeline lives here: the reversible credential codec, the
//! session token issuer/verifier, and the admin service tying them to the
//! admin repository. `email` renders and dispatches the transactional mail.

pub mod admin;
pub mod credential;
pub mod email;
pub mod token;

pub use admin::{AdminService, AdminServiceError, SignupInput};
pub use credential::{CredentialCodec, CredentialError};
pub use email::EmailService;
pub use token::{TokenClaims, TokenError, TokenService};
