//! Foundation types for Casket.
//!
//! Every other Casket crate depends on `casket-types` for the object
//! identifier shared by the addresser, the store and the HTTP layer.
//!
//! # Key Types
//!
//! - [`ObjectId`] — Content-addressed identifier (BLAKE3 hash)
//! - [`TypeError`] — Failures parsing identifiers from their text form

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
