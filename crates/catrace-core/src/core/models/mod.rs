//! # Core Models Module
//!
//! Value types shared by every stage of chain reconstruction.
//!
//! ## Key Components
//!
//! - [`point`] - Immutable, id-identified 3D point with a label
//! - [`ids`] - [`ids::PointId`] and the order-independent [`ids::PairKey`]
//! - [`pair`] - A neighbor pair and the distance that qualified it
//! - [`triple`] - Three points scored by the angle at their middle point
//! - [`chain`] - The reconstructed, ordered path of points
//!
//! ## Usage
//!
//! ```ignore
//! use catrace::core::models::point::Point;
//!
//! let ca = Point::new(1, 12.1, 4.3, -0.8, "CA")?;
//! let parsed = Point::from_fields(&["2", "15.9", "4.1", "-0.2"])?;
//! assert!(!ca.is_same_as(&parsed));
//! ```

pub mod chain;
pub mod ids;
pub mod pair;
pub mod point;
pub mod triple;
