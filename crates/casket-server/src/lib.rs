//! HTTP server for Casket.
//!
//! Exposes the object store at `/data/{repository}/{oid}`:
//!
//! - `PUT /data/{repository}` stores the body, `201` with `{"size", "oid"}`
//! - `GET /data/{repository}/{oid}` returns the raw bytes
//! - `DELETE /data/{repository}/{oid}` removes the object
//!
//! Missing repositories or objects are `404`, a repeated write is `409`, and
//! any other method on an object path is `405`.

pub mod config;
pub mod error;
pub mod handler;
pub mod request;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::CasketServer;
pub use state::AppState;
