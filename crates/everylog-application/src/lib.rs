//! Application Layer - everylog
//!
//! The access-control core and the use cases built on it.
//!
//! ## Architecture
//!
//! - `domain_services::orchestrator` - runs compound writes in one unit of work
//! - `domain_services::permission` - maps a credential to a grant, fail-closed
//! - `domain_services::session` - password authentication and session tokens
//! - `domain_services::query_filter` - caller-scoped parameterized listings
//! - `use_cases` - user, project, org, log and invite services
//! - `ports::registry` - link-time registry of store providers
//!
//! ## Dependencies
//!
//! This crate depends only on `everylog-domain` and pure libraries. Stores,
//! codecs and clocks are injected through the domain ports.

pub mod domain_services;
pub mod ports;
pub mod use_cases;

pub use domain_services::*;
pub use use_cases::*;
