/// Database configuration and connection management
pub mod database;

/// Local state storage location from environment variables
pub mod storage;

/// Budget, task and event templates loaded from config.toml
pub mod templates;
