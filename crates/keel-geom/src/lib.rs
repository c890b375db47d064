//! Geometry primitives for 2D and 3D code: axis-aligned rectangles and boxes, rays, and
//! rectangle/rectangle collision manifolds.
//!
//! Everything here is a thin, closed-form layer over [`keel_linalg`]'s vector types. The
//! conventions match the rest of the workspace: `f32` coordinates, Y pointing down in 2D, and
//! explicit tolerances wherever a comparison is approximate.

mod aabb;
mod collide;
mod ray;
mod rect;

pub use aabb::Aabb;
pub use collide::{collide, Contact};
pub use ray::Ray;
pub use rect::Rect;
