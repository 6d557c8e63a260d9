//! Infrastructure Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | Clock | Current time, injectable for expiry tests |
//! | SessionTokenCodec | Signs and verifies session tokens |
//! | ApiKeyGenerator | Produces fresh API key material |

/// Clock port
pub mod clock;
/// API key generation port
pub mod keys;
/// Session token codec port
pub mod session;

pub use clock::Clock;
pub use keys::ApiKeyGenerator;
pub use session::SessionTokenCodec;
