//! Persistence for the settlement economy.
//!
//! Three collections are stored independently and always whole: settlements,
//! the blueprint catalog, and spears. The service layer talks to them only
//! through the [`Repository`] trait.
//!
//! # Modules
//!
//! - [`repository`] -- The [`Repository`] trait
//! - [`json`] -- [`JsonFileRepository`], one JSON file per collection
//! - [`memory`] -- [`InMemoryRepository`] for tests and ephemeral runs
//! - [`error`] -- [`StoreError`]

pub mod error;
pub mod json;
pub mod memory;
pub mod repository;

// Re-export primary types for convenience.
pub use error::StoreError;
pub use json::{
    DEFAULT_DISTRICTS_FILE, DEFAULT_SETTLEMENTS_FILE, DEFAULT_SPEARS_FILE, JsonFileRepository,
};
pub use memory::InMemoryRepository;
pub use repository::Repository;
