//! Axis edge sequences and the coarse starting grid.
//!
//! An [`AxisEdges`] holds the ascending boundary values that define one axis
//! of the coarse grid. Because cell containment is half-open, a point sitting
//! exactly on the outermost edge would never be captured; the mandatory
//! outward-extension policy replaces the last edge with
//! `max(0.01, 1.01 * edge)` so the maximum observed value still falls inside
//! the final interval. Callers that have already extended their edges use
//! [`AxisEdges::new`]; [`AxisEdges::with_extension`] applies the policy as
//! the documented fallback.

use itertools::iproduct;

use crate::cell::Cell;
use crate::error::{Axis, QuadBinError};

/// Validated ascending sequence of bin boundaries for one axis.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisEdges {
    axis: Axis,
    values: Vec<f64>,
}

impl AxisEdges {
    /// Wraps an already-extended edge sequence. Requires at least two finite,
    /// strictly ascending entries.
    pub fn new(axis: Axis, values: Vec<f64>) -> Result<Self, QuadBinError> {
        if values.len() < 2 {
            return Err(QuadBinError::EdgesTooShort {
                axis,
                len: values.len(),
            });
        }
        for (index, v) in values.iter().enumerate() {
            if !v.is_finite() {
                return Err(QuadBinError::NonFiniteEdge { axis, index });
            }
        }
        for index in 0..values.len() - 1 {
            if values[index] >= values[index + 1] {
                return Err(QuadBinError::NonAscendingEdges { axis, index });
            }
        }
        Ok(Self { axis, values })
    }

    /// Applies the outward-extension policy to the outermost edge, then
    /// validates: `last = max(0.01, 1.01 * last)`.
    pub fn with_extension(axis: Axis, mut values: Vec<f64>) -> Result<Self, QuadBinError> {
        if let Some(last) = values.last_mut() {
            *last = (1.01 * *last).max(0.01);
        }
        Self::new(axis, values)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of intervals (cells along this axis), `len - 1`.
    pub fn intervals(&self) -> usize {
        self.values.len() - 1
    }

    pub fn min(&self) -> f64 {
        self.values[0]
    }

    pub fn max(&self) -> f64 {
        *self.values.last().expect("edges hold >= 2 entries")
    }

    /// Consecutive `(lo, hi)` interval pairs.
    pub fn iter_intervals(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.values.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Cartesian product of the two edge sequences: the coarse active set the
/// refinement loop starts from. Cells are emitted x-major, matching the
/// interval order of each axis.
pub fn coarse_cells(x_edges: &AxisEdges, y_edges: &AxisEdges) -> Vec<Cell> {
    iproduct!(x_edges.iter_intervals(), y_edges.iter_intervals())
        .map(|((x0, x1), (y0, y1))| Cell { x0, x1, y0, y1 })
        .collect()
}

/// The coarse bounding rectangle spanned by both edge sequences.
pub fn coarse_bounds(x_edges: &AxisEdges, y_edges: &AxisEdges) -> Cell {
    Cell {
        x0: x_edges.min(),
        x1: x_edges.max(),
        y0: y_edges.min(),
        y1: y_edges.max(),
    }
}
