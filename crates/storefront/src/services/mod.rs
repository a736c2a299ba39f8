//! Business logic services for storefront.
//!
//! # Services
//!
//! - `context` - Shop context resolution (shop, customer, language)

pub mod context;

pub use context::{ContextError, ContextService, translation_context};
