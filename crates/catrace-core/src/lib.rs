//! # catrace Core Library
//!
//! Reconstructs the order of a chain of points, such as the C-alpha trace of a
//! protein backbone, from an unordered list of 3D coordinates.
//!
//! ## Architectural Philosophy
//!
//! The library keeps a strict three-layer architecture so that each piece can be
//! tested on its own.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Point`, `NeighborPair`,
//!   `Chain`), pure geometry helpers, and point-record I/O.
//!
//! - **[`engine`]: The Logic Core.** Validated configuration, progress reporting,
//!   and the individual tasks: neighbor graph construction, angle scoring, chain
//!   assembly and chain validation.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together into
//!   complete procedures such as reconstructing a chain from a point list.

pub mod core;
pub mod engine;
pub mod workflows;
