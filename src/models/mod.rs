//! Data models
//!
//! Entity types for the Atrium backend. `content` defines the generic
//! content record plus the `Resource` trait; the per-kind modules define the
//! typed payloads stored inside a record's `data` column.

pub mod about;
pub mod address;
pub mod admin;
pub mod banner;
pub mod career;
pub mod content;
pub mod content_block;
pub mod gallery;
pub mod industry;
pub mod project;
pub mod quote;
pub mod service_item;
pub mod slider;
pub mod team;
pub mod validate;

pub use about::About;
pub use address::Address;
pub use admin::{Admin, NewAdmin};
pub use banner::Banner;
pub use career::Career;
pub use content::{AuthorRef, ContentRecord, Resource};
pub use content_block::ContentBlock;
pub use gallery::GalleryItem;
pub use industry::{Industry, IndustryCategory};
pub use project::Project;
pub use quote::{NewQuote, QuoteRequest, QuoteStats, QuoteStatus};
pub use service_item::ServiceItem;
pub use slider::Slider;
pub use team::TeamMember;
