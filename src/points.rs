//! Borrowed views over the caller's coordinate arrays.
//!
//! The core never owns the scatter data: a [`PointSet`] borrows two
//! equal-length slices for the lifetime of one mesh construction. The only
//! owned copy is [`FilteredPoints`], the hot-path subset the refinement loop
//! scans; classification always runs over the original, unfiltered view.

use crate::cell::Cell;
use crate::error::QuadBinError;

/// Read-only view over paired x/y coordinate slices.
#[derive(Debug, Clone, Copy)]
pub struct PointSet<'a> {
    x: &'a [f64],
    y: &'a [f64],
}

impl<'a> PointSet<'a> {
    /// Borrows the coordinate slices, enforcing equal lengths.
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Result<Self, QuadBinError> {
        if x.len() != y.len() {
            return Err(QuadBinError::PointLengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &'a [f64] {
        self.x
    }

    pub fn y(&self) -> &'a [f64] {
        self.y
    }

    #[inline]
    pub fn get(&self, i: usize) -> (f64, f64) {
        (self.x[i], self.y[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Copies out the finite points contained by `bounds` (half-open).
    ///
    /// Purely an optimization for the refinement loop: dropped points are
    /// not lost, they re-enter classification unfiltered and receive
    /// [`BinId::OutOfMesh`](crate::cell::BinId::OutOfMesh) there.
    pub fn filter_to_bounds(&self, bounds: &Cell) -> FilteredPoints {
        let mut fx = Vec::with_capacity(self.len());
        let mut fy = Vec::with_capacity(self.len());
        for (x, y) in self.iter() {
            if x.is_finite() && y.is_finite() && bounds.contains(x, y) {
                fx.push(x);
                fy.push(y);
            }
        }
        let dropped = self.len() - fx.len();
        FilteredPoints {
            x: fx,
            y: fy,
            dropped,
        }
    }
}

/// Owned subset of a [`PointSet`] restricted to the coarse bounds.
#[derive(Debug, Clone)]
pub struct FilteredPoints {
    x: Vec<f64>,
    y: Vec<f64>,
    dropped: usize,
}

impl FilteredPoints {
    pub fn as_point_set(&self) -> PointSet<'_> {
        PointSet {
            x: &self.x,
            y: &self.y,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Points excluded from the hot path (non-finite or out of bounds).
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
