//! Provider-specific constants

/// Registry name of the PostgreSQL provider
pub const POSTGRES_PROVIDER_NAME: &str = "postgres";

/// Registry name of the in-memory provider
pub const MEMORY_PROVIDER_NAME: &str = "memory";

/// Message carried by failures armed through `MemoryStore::fail_on`
pub const INJECTED_FAILURE_MESSAGE: &str = "injected failure";

/// Statement used by the PostgreSQL health check
pub const POSTGRES_HEALTH_QUERY: &str = "SELECT 1";

/// Reference DDL for the PostgreSQL provider
pub const POSTGRES_SCHEMA: &str = include_str!("store/postgres/schema.sql");
