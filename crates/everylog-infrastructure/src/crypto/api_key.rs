//! Secure API key generation

use everylog_domain::constants::API_KEY_LENGTH;
use everylog_domain::error::{Error, Result};
use everylog_domain::ports::ApiKeyGenerator;
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Hex-encoded keys drawn from the operating system RNG
#[derive(Debug, Clone, Copy)]
pub struct RandomApiKeyGenerator {
    byte_len: usize,
}

impl RandomApiKeyGenerator {
    /// Generator producing keys of `hex_len` characters (rounded down to even)
    pub fn new(hex_len: usize) -> Self {
        Self {
            byte_len: hex_len / 2,
        }
    }
}

impl Default for RandomApiKeyGenerator {
    fn default() -> Self {
        Self::new(API_KEY_LENGTH)
    }
}

impl ApiKeyGenerator for RandomApiKeyGenerator {
    fn generate(&self) -> Result<String> {
        let mut bytes = vec![0u8; self.byte_len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| Error::internal(format!("OS random source failed: {e}")))?;
        Ok(hex::encode(bytes))
    }
}
