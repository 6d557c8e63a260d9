//! Domain Layer - everylog
//!
//! Core types of the multi-tenant logging service: users own organizations
//! and projects, projects issue API keys that let log producers write
//! records, and session tokens let the owning user read them back.
//!
//! ## Architecture
//!
//! The domain layer:
//! - Defines entities (rows with identity) and value objects
//! - Defines the error taxonomy every other layer reports through
//! - Defines ports (store, clock, session token codec) implemented elsewhere
//! - Has no knowledge of HTTP, SQL drivers or configuration files

/// Domain constants (session lifetime, key length, privilege levels)
pub mod constants;
/// Entities with identity
pub mod entities;
/// Error taxonomy
pub mod error;
/// Port traits implemented by providers and infrastructure
pub mod ports;
/// Immutable value objects
pub mod value_objects;

pub use error::{Error, Result};
