//! Cloze API crate - axum HTTP server and route handlers.
//!
//! Provides the web surface for the Cloze application: the exercise page,
//! the masking form, audio transcription, answer judgment, and health
//! checks.

pub mod error;
pub mod handlers;
pub mod page;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
