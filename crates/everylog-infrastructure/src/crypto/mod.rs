//! Cryptographic services
//!
//! - [`JwtSessionCodec`]: HS256 signing and verification of session tokens
//! - [`RandomApiKeyGenerator`]: hex API keys from OS randomness

pub mod api_key;
pub mod session;

pub use api_key::RandomApiKeyGenerator;
pub use session::JwtSessionCodec;
