//! Grid primitives shared by the wavefront crates.
//!
//! This crate provides the leaf types the distance-field engine is built on:
//! integer points and half-open rectangles, the cardinal and outward
//! direction sets walked during relaxation, and the radius shapes used by
//! field-of-view collaborators.

pub mod dir;
pub mod geom;
pub mod radius;

pub use dir::Direction;
pub use geom::{Point, Range, RangeIter};
pub use radius::Radius;
