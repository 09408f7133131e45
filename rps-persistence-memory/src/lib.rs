//! Repositories that keep everything in process memory.
//!
//! Nothing survives a restart. Used when no database is configured and by the
//! integration tests.

pub mod games;
pub mod stats;
pub mod users;
