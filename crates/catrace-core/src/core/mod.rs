//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Data Models** ([`models`]) - Points, identifiers, neighbor pairs, scored
//!   triples, and assembled chains
//! - **Geometry** ([`utils`]) - Distances and vertex angles between points
//! - **File I/O** ([`io`]) - Reading point records and writing ordered chains

pub mod io;
pub mod models;
pub mod utils;
