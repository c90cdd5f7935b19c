//! Reading point lists and writing assembled chains.
//!
//! Formats implement the [`traits::PointFile`] trait; [`records::RecordFile`]
//! is the whitespace-separated `id x y z [label]` format.

pub mod records;
pub mod traits;
