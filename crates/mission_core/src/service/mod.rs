//! Core use-case services.
//!
//! # Responsibility
//! - Expose the sanctioned mutation surface over the loaded hierarchy.
//! - Keep presentation callers decoupled from storage details.

pub mod mission_service;
