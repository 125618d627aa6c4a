//! Web layer for the dock tracker.
//!
//! Serves the favourites list and map picker pages plus the JSON endpoints
//! their scripts call.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
