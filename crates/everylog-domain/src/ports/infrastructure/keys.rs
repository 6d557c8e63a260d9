use crate::error::Result;

/// Source of API key material
pub trait ApiKeyGenerator: Send + Sync {
    /// A fresh key drawn from OS randomness
    fn generate(&self) -> Result<String>;
}
