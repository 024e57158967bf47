//! Fino Integrino Core - Shared types library.
//!
//! This crate provides common types used across all Fino Integrino components:
//! - `content` - Typed client over the content database
//! - `storefront` - Public marketing site
//! - `admin` - Content administration panel
//! - `cli` - Command-line tools for migrations, seeding and content checks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe ids, content entities, write models and validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
