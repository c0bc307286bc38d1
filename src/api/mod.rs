//! Local session API.
//!
//! Exposes the assessment workflow to the front end as JSON endpoints
//! nested under `/api/`. The router is composable: `session_api_router()`
//! returns a `Router` that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::session_api_router;
pub use server::{start_session_server, ServerSession, SessionApiServer};
pub use types::ApiContext;
