//! Affine transform and rotation algebra with value semantics.
//!
//! # Motivation
//!
//! This library provides the fixed-size vector, matrix, quaternion and bounding
//! box types used by the transform pipeline, with an emphasis on constructing
//! and decomposing rotations (Euler angles, axis-angle, direction-plus-twist)
//! and on a uniform tolerance policy for near-zero and near-equal comparisons.
//!
//! Existing Rust libraries were not a good fit here:
//!
//! - General-purpose linear algebra crates pay a large complexity cost for
//!   flexibility this library does not need (dynamic dimensions, storage
//!   abstraction).
//! - Graphics-focused crates use the column-vector convention, while all
//!   persisted data and every composition call site of this SDK assume the
//!   row-vector convention (see below).
//! - The closed-form decompositions carry designed tie-breaks at their
//!   singularities that downstream code depends on, so they have to be owned
//!   here rather than delegated.
//!
//! # Conventions
//!
//! Vectors are *row* vectors: a vector is transformed by right-multiplication
//! (`v * m`), and the matrix product `a * b` means "transform by `a`, then by
//! `b`". This matches application order and is the opposite of the more common
//! column-vector convention. The column form `m * v` is deliberately not
//! provided.
//!
//! All types are plain `Copy` values with no interior state; every operation
//! is a pure function over small fixed-size structures.
//!
//! # Goals & Non-Goals
//!
//! - Be generic over the floating-point element type (`f32`/`f64`), with the
//!   tolerance table expressed as a trait rather than per-type
//!   specializations.
//! - Keep dimensions in const generics; no dynamically-sized objects.
//! - No GPU/SIMD batching and no synchronization: single-threaded value math.
//! - Precondition violations (zero-length normalization, singular inversion)
//!   are documented, not turned into a recoverable error taxonomy.

pub mod approx;
pub mod tol;

mod affine;
mod bbox;
mod matrix;
mod quat;
mod serde_impls;
mod traits;
mod vector;

pub use affine::*;
pub use bbox::*;
pub use matrix::*;
pub use quat::*;
pub use traits::*;
pub use vector::*;
