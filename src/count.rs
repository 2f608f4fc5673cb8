//! Per-cell occupancy counting: the refinement loop's hot kernel.
//!
//! Each cell's scan is independent and writes a disjoint output slot, so
//! the kernel parallelizes per cell with no locking.

use rayon::prelude::*;

use crate::cell::Cell;
use crate::points::PointSet;

/// Counts, for every cell, the points it contains under half-open
/// containment. Pure: no side effects, identical inputs give identical
/// counts. An empty cell slice yields an empty output; points matching no
/// cell simply do not count.
pub fn count_occupancy(cells: &[Cell], points: PointSet<'_>) -> Vec<u64> {
    cells
        .par_iter()
        .map(|cell| points.iter().filter(|&(x, y)| cell.contains(x, y)).count() as u64)
        .collect()
}
