// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod execution_client;
pub mod file_store;
pub mod memory_store;
