//! HTTP server module.
//!
//! This module provides an axum-based HTTP server that exposes example model
//! CRUD as a REST API on top of the service layer and repository pattern.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Request parsing and validation                        │
//! │  - JSON serialization/deserialization                    │
//! │  - CORS, body limit, error mapping                       │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (db::services)                            │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db::repositories)                     │
//! │  - LocalRepository / PostgresRepository                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Endpoints
//!
//! | Method | Path             | Success                          |
//! |--------|------------------|----------------------------------|
//! | GET    | `/health`        | 200, or 503 if the store is down |
//! | GET    | `/alive`         | 200, empty body                  |
//! | GET    | `/entities`      | 200, JSON array                  |
//! | POST   | `/entities`      | 201, created entity              |
//! | GET    | `/entities/{id}` | 200, entity                      |
//! | PUT    | `/entities/{id}` | 200, updated entity              |
//! | DELETE | `/entities/{id}` | 204                              |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, AppError};
pub use router::create_router;
pub use state::AppState;
