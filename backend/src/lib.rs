//! # Model Service
//!
//! CRUD HTTP service for a single domain entity, the *example model*, backed
//! by a relational store.
//!
//! ## Architecture
//!
//! - [`models`]: the entity, its identifier and input validation
//! - [`db`]: repository trait, Postgres and in-memory implementations, service functions
//! - [`config`]: startup configuration (listener and repository selection)
//! - [`http`]: Axum-based router, handlers and error mapping
//!
//! The repository is built once at startup and handed to the router
//! explicitly; there is no global state.

pub mod config;
pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;
