//! Web layer for the train search service.
//!
//! Provides the search form, a search endpoint answering in JSON or HTML,
//! and a health check.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
