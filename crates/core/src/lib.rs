//! RocketShoes Core - Shared types library.
//!
//! This crate provides the types shared by all RocketShoes components:
//! - `storefront` - Client-side cart state management
//! - `catalog` - Stock and product catalog API
//! - `cli` - Command-line front end for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, catalog products and stock records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
