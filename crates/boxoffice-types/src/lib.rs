//! Shared type definitions for the box-office catalog service.
//!
//! This crate is the single source of truth for the record and key types
//! used across the workspace. The indexer builds on them and the server
//! serializes them straight onto the wire.
//!
//! # Modules
//!
//! - [`category`] -- The indexed dimensions and their normalized keys
//! - [`movie`] -- Opaque movie records with typed accessors
//! - [`amount`] -- Numeric aggregates for revenue and ticket totals

pub mod amount;
pub mod category;
pub mod movie;

// Re-export all public types at crate root for convenience.
pub use amount::Amount;
pub use category::{Category, CategoryKey, UnknownCategory};
pub use movie::{Movie, REVENUE_FIELD, TICKETS_FIELD};
