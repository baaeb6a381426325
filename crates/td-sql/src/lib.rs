//! td-sql - SQL layer for tenantdb
//!
//! Turns migration text into an ordered list of executable statements and
//! recognises table-creation statements. There is deliberately no SQL
//! tokenizer here; see [`split`] for the limitations that follow from that.

pub mod splitter;
pub mod statement;

pub use splitter::split;
pub use statement::{Statement, TableRef};
