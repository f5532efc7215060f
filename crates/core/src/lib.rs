//! WishShop Core - Shared domain types library.
//!
//! This crate provides the types shared by every WishShop component:
//! - `storefront` - Cart, wishlist and session containers plus the catalog facade
//! - `cli` - Command-line driver for the storefront state layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. Products are referenced by the state layer but owned by the
//! external catalog.
//!
//! # Modules
//!
//! - [`types`] - Newtype ids, prices, emails, products, cart lines and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
