//! Database layer
//!
//! SQLite access for the Atrium backend: connection pool, embedded
//! migrations, and one repository per stored entity. Content kinds all share
//! a single generic repository (`repositories::content`); admins and quote
//! requests have dedicated ones.

pub mod migrations;
pub mod pool;
pub mod repositories;

pub use pool::{create_pool, create_test_pool};
