//! CLI command implementations

pub(crate) mod common;
pub(crate) mod discover;
pub(crate) mod migrate;
pub(crate) mod split;
pub(crate) mod tenants;
pub(crate) mod verify;
