// Application layer - Dashboard persistence and hydration use cases
pub mod dashboard_service;
pub mod dashboard_store;
pub mod execution_repository;
pub mod key_value_store;
pub mod metadata_hydrator;
