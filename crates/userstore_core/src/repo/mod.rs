//! Persistence access layer.
//!
//! # Responsibility
//! - Own the single store connection and run fixed CRUD statements on it.
//! - Translate SQLite failures into the store error taxonomy.
//!
//! # Invariants
//! - No other code path touches the connection.
//! - Update and delete on a missing id are silent no-ops, not errors.

pub mod user_repo;
