//! The frozen mesh artifact.
//!
//! A [`Mesh`] is the flat, ordered collection of every leaf cell retired
//! across all refinement generations. It is exclusively owned and mutated by
//! the [`MeshBuilder`](crate::builder::MeshBuilder) during construction;
//! once frozen it exposes only shared access and can be handed to any number
//! of downstream readers without synchronization.

use crate::builder::BuildReport;
use crate::cell::Cell;
use crate::error::QuadBinError;
use crate::invariants::DebugInvariants;

/// Immutable adaptive mesh: ordered leaf cells tiling the coarse bounding
/// rectangle, plus the build report for observability.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    cells: Vec<Cell>,
    bounds: Cell,
    report: BuildReport,
}

impl Mesh {
    /// Seals the retired cells into an immutable mesh. Builder-only.
    pub(crate) fn freeze(cells: Vec<Cell>, bounds: Cell, report: BuildReport) -> Self {
        Self {
            cells,
            bounds,
            report,
        }
    }

    /// The leaf cells in retirement order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The coarse bounding rectangle the cells tile.
    pub fn bounds(&self) -> Cell {
        self.bounds
    }

    /// Per-cell un-transformed areas, in cell order.
    pub fn areas(&self) -> Vec<f64> {
        self.cells.iter().map(Cell::area).collect()
    }

    /// Per-generation statistics recorded during construction.
    pub fn report(&self) -> &BuildReport {
        &self.report
    }
}

impl DebugInvariants for Mesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "mesh");
    }

    /// Checks the two structural invariants: the cells tile the coarse
    /// bounds (area sum matches, up to float accumulation) and no two cells
    /// intersect with positive area.
    fn validate_invariants(&self) -> Result<(), QuadBinError> {
        let expected = self.bounds.area();
        let actual: f64 = self.cells.iter().map(Cell::area).sum();
        let tol = 1e-9 * expected.abs().max(1.0);
        if (actual - expected).abs() > tol {
            return Err(QuadBinError::TilingViolation { expected, actual });
        }
        for (i, a) in self.cells.iter().enumerate() {
            for (j, b) in self.cells.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    return Err(QuadBinError::OverlappingCells { first: i, second: j });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::BuildReport;

    fn cell(x0: f64, x1: f64, y0: f64, y1: f64) -> Cell {
        Cell::new(x0, x1, y0, y1).unwrap()
    }

    #[test]
    fn valid_tiling_passes_invariants() {
        let bounds = cell(0.0, 2.0, 0.0, 1.0);
        let mesh = Mesh::freeze(
            vec![cell(0.0, 1.0, 0.0, 1.0), cell(1.0, 2.0, 0.0, 1.0)],
            bounds,
            BuildReport::default(),
        );
        assert!(mesh.validate_invariants().is_ok());
    }

    #[test]
    fn area_gap_is_a_tiling_violation() {
        let bounds = cell(0.0, 2.0, 0.0, 1.0);
        let mesh = Mesh::freeze(
            vec![cell(0.0, 1.0, 0.0, 1.0)],
            bounds,
            BuildReport::default(),
        );
        assert!(matches!(
            mesh.validate_invariants(),
            Err(QuadBinError::TilingViolation { .. })
        ));
    }

    #[test]
    fn overlap_is_detected() {
        let bounds = cell(0.0, 2.0, 0.0, 1.0);
        let mesh = Mesh::freeze(
            vec![cell(0.0, 1.5, 0.0, 1.0), cell(1.0, 1.5, 0.0, 1.0)],
            bounds,
            BuildReport::default(),
        );
        assert!(matches!(
            mesh.validate_invariants(),
            Err(QuadBinError::OverlappingCells { first: 0, second: 1 })
        ));
    }
}
