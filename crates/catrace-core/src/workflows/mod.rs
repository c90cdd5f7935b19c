//! # Workflows Module
//!
//! Top-level entry points of the library. Each workflow validates its inputs,
//! runs the engine tasks in order, reports phases through a
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter), and returns
//! a result that borrows the caller's points.
//!
//! - **Reconstruction** ([`reconstruct`]) - Neighbor graph, chain assembly and
//!   angle validation of the assembled chain.
//! - **Survey** ([`survey`]) - Close-contact listing and angle scoring of every
//!   reachable triple, without assembling a chain.

pub mod reconstruct;
pub mod survey;
