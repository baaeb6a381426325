//! td-core - Core library for tenantdb
//!
//! This crate provides configuration parsing, the tenant store, and the
//! strongly-typed tenant identifier shared by the other tenantdb crates.

pub mod checksum;
pub mod config;
pub mod error;
pub mod tenant;
pub mod tenant_id;

pub use checksum::compute_checksum;
pub use config::{Config, DatabaseConfig, DiscoveryConfig, SslMode, VerifyConfig};
pub use error::{CoreError, CoreResult};
pub use tenant::{TenantConfig, TenantStore};
pub use tenant_id::TenantId;
