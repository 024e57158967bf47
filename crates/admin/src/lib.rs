//! Fino Integrino admin library.
//!
//! The content administration panel: four tabs (images, hero, products,
//! retailers) editing the content store through
//! [`ContentClient`](fino_integrino_content::ContentClient).
//!
//! The editing rules live in [`panel`] and know nothing about HTTP. The
//! [`routes`] module turns them into server-rendered pages with
//! post/redirect/get and a session flash message.
//!
//! # Security
//!
//! Every panel route requires a session login against an argon2 password
//! hash. Sessions are stored in `PostgreSQL` with SameSite=Strict cookies.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod panel;
pub mod password;
pub mod routes;
pub mod state;
