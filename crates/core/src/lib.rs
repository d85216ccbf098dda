//! Sahara Core - Shared types library.
//!
//! This crate provides common types used across all Sahara components:
//! - `catalog` - Item catalog service (port 8082)
//! - `cart` - Shopping cart service (port 8083)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
