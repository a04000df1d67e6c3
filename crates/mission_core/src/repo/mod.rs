//! Persistence layer for the genre hierarchy.
//!
//! # Responsibility
//! - Define the `GenreStore` contract consumed by the service layer.
//! - Keep JSON document shape and lenient legacy decoding inside the
//!   persistence boundary.
//!
//! # Invariants
//! - A save writes the whole hierarchy as one document.
//! - Readers never observe a partially written file document.
//! - Malformed individual records are dropped; malformed containers fail.

pub mod decode;
pub mod genre_store;
pub mod json_store;
pub mod memory_store;
