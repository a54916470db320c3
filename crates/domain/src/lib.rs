extern crate self as storylink_domain;

pub mod common;
pub mod entity;
pub mod error;
pub mod ids;
pub mod link;

pub use entity::{Entity, EntityType};
pub use error::DomainError;
pub use ids::EntityId;
pub use link::{DetectedLink, Span};
