//! Session Token Codec Port
//!
//! Signing and signature verification only. Expiry is checked by the caller
//! against its own [`super::Clock`], so a codec must not reject a token for
//! being expired.

use crate::error::Result;
use crate::value_objects::SessionClaims;

/// Signs and verifies session tokens
pub trait SessionTokenCodec: Send + Sync {
    /// Sign `claims`; failures are `Error::Encoding`
    fn encode(&self, claims: &SessionClaims) -> Result<String>;

    /// Verify the signature and return the embedded claims; any failure is
    /// `Error::InvalidToken`
    fn decode(&self, token: &str) -> Result<SessionClaims>;
}
