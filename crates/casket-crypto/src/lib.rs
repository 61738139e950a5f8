//! Content addressing for Casket.
//!
//! Maps object bytes to their [`ObjectId`](casket_types::ObjectId). Hashing
//! wraps the `blake3` crate; there is no custom cryptography here.

pub mod hasher;

pub use hasher::ContentHasher;
