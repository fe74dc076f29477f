//! Service orchestration and configuration for the settlement economy.
//!
//! This crate ties the world rules to a [`Repository`]: each service call
//! loads the collections it needs, applies the rules in memory, and saves the
//! result once.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `settlement-config.yaml` into
//!   strongly-typed structs.
//! - [`service`] -- [`SettlementService`], one method per user-facing
//!   operation.
//! - [`error`] -- [`ServiceError`].
//!
//! [`Repository`]: settlement_store::Repository

pub mod config;
pub mod error;
pub mod service;

// Re-export primary types at crate root.
pub use config::{ConfigError, SettlementConfig};
pub use error::ServiceError;
pub use service::SettlementService;
