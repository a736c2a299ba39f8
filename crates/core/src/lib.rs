//! Emporium Core - Shared domain types and cart rules.
//!
//! This crate provides the types and pure logic used across Emporium:
//! - `storefront` - Database loaders, benchmark providers and the HTTP API
//! - `cli` - Command-line tools for migrations and benchmarks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. Everything here can be tested without a database.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and prices
//! - [`context`] - Shop, category, customer and translation context
//! - [`cart`] - Calculated cart snapshot handed to rules
//! - [`rule`] - Cart rule predicates and their boolean combinators
//! - [`shipping`] - Shipment eligibility filter per shop
//! - [`sort`] - Ordering loaded entities by the caller's requested keys
//! - [`events`] - Events emitted after database writes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod context;
pub mod events;
pub mod rule;
pub mod shipping;
pub mod sort;
pub mod types;

pub use cart::{CalculatedCart, CalculatedLineItem, CartPrice};
pub use context::{Category, CategoryPath, Customer, Shop, ShopContext, TranslationContext};
pub use rule::{Match, Rule, RuleScope};
pub use types::*;
