//! Caller-facing use-case services.
//!
//! # Responsibility
//! - Keep the mutate-then-refetch contract in one place for UI callers.

pub mod user_service;
