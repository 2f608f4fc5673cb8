//! `Cell` and `BinId`: the rectangle and bin-assignment primitives.
//!
//! A [`Cell`] is an axis-aligned rectangle `(x0, x1) x (y0, y1)` with
//! half-open containment: a point belongs to the cell iff
//! `x0 <= x < x1 && y0 <= y < y1`, so shared cell boundaries never claim a
//! point twice. [`BinId`] is the per-point assignment: a valid index into a
//! frozen mesh, or [`BinId::OutOfMesh`] for points no cell contains. Using a
//! tagged type instead of a raw integer with a magic sentinel makes
//! "forgot to check the sentinel" unrepresentable.

use crate::error::QuadBinError;

/// Per-point bin assignment: either an index into [`Mesh`](crate::mesh::Mesh)
/// cells, or the reserved marker for points outside every cell (including
/// non-finite coordinates).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum BinId {
    /// Index of the containing leaf cell.
    Bin(usize),
    /// The point is non-finite or not contained by any cell.
    OutOfMesh,
}

impl BinId {
    /// Returns the cell index, or `None` for [`BinId::OutOfMesh`].
    #[inline]
    pub fn index(self) -> Option<usize> {
        match self {
            BinId::Bin(i) => Some(i),
            BinId::OutOfMesh => None,
        }
    }

    /// True iff this is the out-of-mesh marker.
    #[inline]
    pub fn is_out_of_mesh(self) -> bool {
        matches!(self, BinId::OutOfMesh)
    }
}

/// Axis-aligned rectangle with strictly positive extent on both axes.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Cell {
    /// Creates a cell, enforcing `x0 < x1` and `y0 < y1` on finite bounds.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Result<Self, QuadBinError> {
        let finite = x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite();
        if !finite || x0 >= x1 || y0 >= y1 {
            return Err(QuadBinError::DegenerateCell { x0, x1, y0, y1 });
        }
        Ok(Self { x0, x1, y0, y1 })
    }

    /// Half-open containment: left/bottom edges inclusive, right/top exclusive.
    ///
    /// NaN coordinates compare false on every branch and are never contained.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.x0 <= x && x < self.x1 && self.y0 <= y && y < self.y1
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Un-transformed area `dx * dy`, regardless of any display scale.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Splits the cell at its midpoint into 4 quadrant children, ordered
    /// `[bottom-left, bottom-right, top-right, top-left]`. The children
    /// exactly tile the parent by construction.
    pub fn split(&self) -> [Cell; 4] {
        let xm = 0.5 * (self.x0 + self.x1);
        let ym = 0.5 * (self.y0 + self.y1);
        let Cell { x0, x1, y0, y1 } = *self;
        [
            Cell { x0, x1: xm, y0, y1: ym },
            Cell { x0: xm, x1, y0, y1: ym },
            Cell { x0: xm, x1, y0: ym, y1 },
            Cell { x0, x1: xm, y0: ym, y1 },
        ]
    }

    /// True iff the two cells intersect with strictly positive area.
    /// Shared edges do not count as overlap.
    pub fn overlaps(&self, other: &Cell) -> bool {
        self.x0.max(other.x0) < self.x1.min(other.x1)
            && self.y0.max(other.y0) < self.y1.min(other.y1)
    }
}
