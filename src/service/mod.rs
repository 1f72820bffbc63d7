//! HTTP service exposing search, direct navigation, and help search.
//!
//! Routes:
//! - `GET /health`
//! - `GET /api/search?q=...&dataset=...`
//! - `GET /api/navigate/:segment?dataset=...`
//! - `GET /api/help?q=...&limit=...`

pub mod handlers;
pub mod server;
pub mod types;
pub mod validation;

pub use server::{create_app, router, AppState};
pub use types::*;
