//! # Engine Module
//!
//! The algorithms that turn a set of points into a chain, organised as tasks
//! sharing a read-only [`context::Context`].
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Distance thresholds, bound mode and the angle window
//! - **Tasks** ([`tasks`]) - Neighbor graph, angle scoring, chain assembly and validation
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Error Handling** ([`error`]) - Engine-level failures, including stalled assembly
//!
//! Every task is synchronous and deterministic: the same points and
//! configuration always produce the same result.

pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod tasks;
