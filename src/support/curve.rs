//! Sampled curves and the numerics used to compare them.
//!
//! A [`Curve`] is an ordered list of `(x, y)` samples, typically one metric
//! recorded across a parameter sweep. Two curves sampled at different `x`
//! values can still be compared: [`Curve::intersections`] locates where
//! one crosses the other.

mod fit;
mod intersection;

use thiserror::Error;

pub use fit::{Line, interpolate, linspace};
pub use intersection::{Intersection, intersections};

/// Errors that can occur when building a [`Curve`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CurveError {
    #[error("x and y have different lengths: {x_len} and {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[error("sample {index} has a non-finite x value")]
    NonFiniteX { index: usize },
}

/// A sampled curve of `(x, y)` pairs.
///
/// Samples keep their insertion order and `x` values need not be sorted,
/// but every `x` must be finite so the samples can be ordered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    /// Creates a curve from parallel `x` and `y` vectors.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError`] if the lengths differ or an `x` is not finite.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, CurveError> {
        if x.len() != y.len() {
            return Err(CurveError::LengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        if let Some(index) = x.iter().position(|v| !v.is_finite()) {
            return Err(CurveError::NonFiniteX { index });
        }
        Ok(Self { x, y })
    }

    /// Creates a curve from `(x, y)` points.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NonFiniteX`] if an `x` is not finite.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Result<Self, CurveError> {
        let (x, y) = points.into_iter().unzip();
        Self::new(x, y)
    }

    /// Appends a sample.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NonFiniteX`] if `x` is not finite.
    pub fn push(&mut self, x: f64, y: f64) -> Result<(), CurveError> {
        if !x.is_finite() {
            return Err(CurveError::NonFiniteX {
                index: self.x.len(),
            });
        }
        self.x.push(x);
        self.y.push(y);
        Ok(())
    }

    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterates over the samples as `(x, y)` pairs.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Returns the index of the first sample at exactly `x`.
    #[must_use]
    pub fn index_of(&self, x: f64) -> Option<usize> {
        self.x.iter().position(|&v| v == x)
    }

    /// Returns the `y` of the first sample at exactly `x`.
    #[must_use]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        self.index_of(x).map(|i| self.y[i])
    }

    /// Returns the `x` locations where this curve crosses `other`.
    ///
    /// See [`intersections`].
    #[must_use]
    pub fn intersections(&self, other: &Curve) -> Vec<Intersection> {
        intersections(self, other)
    }
}
