//! Grocify storefront library.
//!
//! Registration, login and order intake behind an axum router. The binary in
//! `main.rs` adds process concerns (configuration, tracing, Sentry, signals);
//! everything else lives here so integration tests can drive the real app.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
