//! Domain Value Objects
//!
//! Immutable values without identity.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Credential`] | What a caller presents to reach a project |
//! | [`Grant`] | Resolved permission: a permitted-project row and its owner |
//! | [`SessionClaims`] | Claims embedded in a signed session token |
//! | [`SessionToken`] | Freshly minted session token and its expiry |
//! | [`LogFilter`], [`OrgFilter`], [`InviteFilter`] | Optional listing filters |
//! | [`FilteredQuery`] | Parameterized statement plus its predicates |

/// Credentials and grants
pub mod credential;
/// Optional listing filters supplied by callers
pub mod filters;
/// Parameterized queries and predicate evaluation
pub mod query;
/// Session token values
pub mod session;

pub use credential::{Credential, Grant};
pub use filters::{InviteFilter, LogFilter, OrgFilter};
pub use query::{FilterOp, FilterValue, Filterable, FilteredQuery, Predicate};
pub use session::{SessionClaims, SessionGrant, SessionToken};
