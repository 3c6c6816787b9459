//! Explainer Core - shared abstractions for the query grader
//!
//! This crate provides the fundamental traits and types that the other
//! explainer crates depend on. It defines:
//!
//! - `Connection` - Trait for a live database connection
//! - `DatabaseConfig` - Where and how to connect
//! - `ExplainerError` - The error taxonomy shared by drivers and analyzers
//! - Common types like `Value`, `Row`, `QueryResult`

mod config;
mod connection;
mod error;
mod types;

pub use config::*;
pub use connection::*;
pub use error::*;
pub use types::*;
