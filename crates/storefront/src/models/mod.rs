//! Domain models for the storefront.
//!
//! Shop, customer and cart types shared with rule evaluation live in
//! `emporium_core`; this module holds the storefront-only entities.

pub mod country_state;
pub mod customer_group;

pub use country_state::AreaCountryStateTranslation;
pub use customer_group::CustomerGroup;
