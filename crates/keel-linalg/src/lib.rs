//! Dense vector and matrix arithmetic for geometry and physics-adjacent code.
//!
//! # Overview
//!
//! Two families of types live here:
//!
//! - [`Vector`] and [`Matrix`] are fixed-size, generic over their component type, and meant for
//!   the 1- to 4-dimensional values that geometry code passes around by the thousands. Their
//!   operations (dot/cross products, 2x2/3x3 determinants and inverses, rotations) are all
//!   closed-form.
//! - [`MatBuf`] is a dynamically-sized `f32` matrix. It carries the row-reduction engine:
//!   echelon and reduced-echelon transforms, determinants beyond 3x3, and inversion via an
//!   augmented identity. Where the fixed-size types panic on misuse, `MatBuf` reports shape
//!   violations as [`ShapeError`] values, since its dimensions are usually data-driven.
//!
//! # Goals & Non-Goals
//!
//! - Every tolerance is explicit. Comparisons and zero tests take an epsilon parameter (pass
//!   `0.0` for exact); there is no hidden global tolerance, so numerical behavior is reproducible
//!   across platforms. The [`approx`] module provides the comparison machinery.
//! - Derived operations have value semantics: computing a determinant, inverse, or echelon form
//!   never mutates the receiver. In-place mutation is a separate, explicitly named surface.
//! - Single-precision floating point only for the dynamically-sized type. Arbitrary-precision
//!   and symbolic linear algebra are out of scope.
//! - Don't have any unstable public dependencies, and keep the dependency footprint small enough
//!   for the crate to be exposed in other libraries' public APIs.

pub mod approx;

mod error;
mod mat;
mod matrix;
mod traits;
mod vector;

pub use error::ShapeError;
pub use mat::*;
pub use matrix::*;
pub use traits::*;
pub use vector::*;
