//! Record types handed between the store and its callers.
//!
//! # Responsibility
//! - Define the plain value shape of one stored user.
//!
//! # Invariants
//! - Records carry no behavior tied to storage; copies are independent snapshots.

pub mod user;
