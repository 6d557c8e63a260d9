//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | StoreProvider | Opens units of work against a backing store |
//! | UnitOfWork | One atomic scope over all store operations |
//! | CredentialStore | Users, secrets, session tokens, API keys |
//! | GrantStore | Projects, permitted-project grants, orgs, memberships |
//! | RecordStore | Log records and invites |

/// Store provider port
pub mod store;

pub use store::{
    CredentialStore, GrantStore, RecordStore, StoreError, StoreProvider, StoreResult, UnitOfWork,
};
