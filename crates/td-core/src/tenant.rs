//! Tenant configuration records and the in-memory tenant store.
//!
//! The store is built once from [`Config`] and handed to whichever command
//! needs to resolve a tenant; nothing reads tenant settings from process-wide
//! state.

use crate::config::{Config, DatabaseConfig};
use crate::error::{CoreError, CoreResult};
use crate::tenant_id::TenantId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration record for one tenant
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TenantConfig {
    /// Tenant database connection
    pub database: DatabaseConfig,

    /// Public API URL of the tenant's backend project
    #[serde(default)]
    pub supabase_url: Option<String>,

    /// Anonymous API key of the tenant's backend project
    #[serde(default, skip_serializing)]
    pub supabase_anon_key: Option<String>,
}

impl TenantConfig {
    /// Record with only a database connection.
    pub fn with_database(database: DatabaseConfig) -> Self {
        Self {
            database,
            supabase_url: None,
            supabase_anon_key: None,
        }
    }
}

/// Mapping from tenant id to its configuration record.
#[derive(Debug, Clone, Default)]
pub struct TenantStore {
    tenants: BTreeMap<TenantId, TenantConfig>,
}

impl TenantStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from the `tenants` section of a loaded config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            tenants: config.tenants.clone(),
        }
    }

    /// Register (or replace) a tenant, returning the previous record.
    pub fn insert(&mut self, id: TenantId, tenant: TenantConfig) -> CoreResult<Option<TenantConfig>> {
        tenant.database.validate(&format!("tenant '{id}'"))?;
        Ok(self.tenants.insert(id, tenant))
    }

    /// Look up a tenant by id.
    pub fn get(&self, id: &str) -> CoreResult<&TenantConfig> {
        self.tenants
            .get(id)
            .ok_or_else(|| CoreError::TenantNotFound {
                id: id.to_string(),
                available: if self.tenants.is_empty() {
                    "(none)".to_string()
                } else {
                    self.ids().collect::<Vec<_>>().join(", ")
                },
            })
    }

    /// Iterate over registered tenant ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.tenants.keys().map(TenantId::as_str)
    }

    /// Number of registered tenants.
    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    /// Whether the store has no tenants.
    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

#[cfg(test)]
#[path = "tenant_test.rs"]
mod tests;
