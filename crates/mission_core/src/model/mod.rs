//! Genre / Mission / Task domain model.
//!
//! # Responsibility
//! - Define the three-level hierarchy persisted in the JSON document.
//! - Provide default constructors and derived progress computation.
//! - Provide presentation ordering helpers that never reorder stored lists.
//!
//! # Invariants
//! - Every entity carries a process-local stable handle that is never persisted.
//! - A mission is complete only when it has tasks and every task is done.

pub mod entity;
pub mod ordering;
