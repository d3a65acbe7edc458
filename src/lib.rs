//! Employee payroll ledger.
//!
//! This crate loads employee records from a flat text file, computes pay,
//! tax, leave and performance state per employee according to the rules of
//! each employment category, and answers search, aggregation and ranking
//! queries over the loaded set. An HTTP API exposes the same operations.

#![warn(missing_docs)]

pub mod api;
pub mod codec;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
