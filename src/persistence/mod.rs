//! Persistence layer: PostgreSQL connection pool, schema migrations,
//! and the health probe.
//!
//! The pool (`sqlx::PgPool`) is the only shared resource in the process.
//! It is constructed once at startup from [`crate::config::RegistryConfig`]
//! and injected into the services, never reached as ambient global state.

pub mod postgres;

pub use postgres::{HealthSnapshot, connect, health_snapshot, run_migrations};
