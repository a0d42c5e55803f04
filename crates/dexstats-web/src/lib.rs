//! Dashboard HTTP server for Dexstats.
//!
//! This crate provides an Axum HTTP server that serves:
//!
//! - **Page routes** (`/`, `/index`, and each enabled page) rendered
//!   from a fresh view-model through `minijinja` templates
//! - **Auth redirects** (`/login`, `/logout`) when Discord login is on
//!
//! # Architecture
//!
//! The route table is fixed when [`build_router`] runs, from the
//! [`FeatureGate`](dexstats_core::FeatureGate) in [`AppState`]. Handlers
//! share the state read-only; every request composes its own view-model,
//! so concurrent requests never observe each other's data.

pub mod error;
pub mod handlers;
pub mod render;
pub mod router;
pub mod server;
pub mod session;
pub mod state;

// Re-export primary types for convenience.
pub use error::WebError;
pub use render::{RenderError, TemplateRenderer};
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use session::{MemorySessionStore, SESSION_COOKIE, Session, SessionError, SessionStore};
pub use state::AppState;
