//! Fino Integrino Storefront library.
//!
//! Server-rendered marketing site. Each page section resolves its content
//! through a [`content::ContentProvider`] chosen once at startup: published
//! JSON documents, or the content store behind
//! [`fino_integrino_content::ContentClient`]. Any resolution failure renders
//! the section's default copy instead.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod state;
