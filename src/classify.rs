//! Point Classifier: assigns every point the index of its containing leaf
//! cell.
//!
//! Runs over the *original, unfiltered* coordinate arrays: points the
//! builder's prefilter dropped re-enter here and receive
//! [`BinId::OutOfMesh`]. Each point is scanned against all cells (the scan
//! also counts how many cells claim the point, which is the tiling check);
//! points are independent, so the kernel parallelizes per point.
//!
//! Post-pass checks are non-fatal and collected as [`ClassifyWarning`]s
//! alongside the results, so a batch over many point sets is never halted
//! by one bad cell:
//! - out-of-mesh assignments are surfaced with count and percentage
//!   (silent data loss otherwise),
//! - retained cells no point landed in are surfaced (benign, but worth
//!   knowing),
//! - a point contained by more than one cell means the mesh tiling is
//!   broken; results are returned but flagged untrusted.

use std::fmt;

use rayon::prelude::*;

use crate::cell::BinId;
use crate::mesh::Mesh;
use crate::points::PointSet;

/// Non-fatal observations from one classification pass.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ClassifyWarning {
    /// Points assigned [`BinId::OutOfMesh`]: non-finite coordinates or
    /// outside every cell. Data loss for downstream aggregation.
    OutOfMesh { count: usize, fraction: f64 },
    /// Retained cells with zero assigned points.
    EmptyCells { count: usize },
    /// Points contained by more than one cell: a mesh tiling violation.
    /// Treat the classification as untrusted.
    MultiContainment { points: usize },
}

impl fmt::Display for ClassifyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyWarning::OutOfMesh { count, fraction } => write!(
                f,
                "{count} points ({:.2}%) fell outside the mesh",
                fraction * 100.0
            ),
            ClassifyWarning::EmptyCells { count } => {
                write!(f, "{count} mesh cells received no points")
            }
            ClassifyWarning::MultiContainment { points } => write!(
                f,
                "{points} points matched more than one cell (tiling violation)"
            ),
        }
    }
}

/// Result of classifying one point set against a frozen mesh.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Classification {
    bins: Vec<BinId>,
    visits: Vec<u64>,
    warnings: Vec<ClassifyWarning>,
}

impl Classification {
    /// Per-point bin assignment, in input order.
    pub fn bins(&self) -> &[BinId] {
        &self.bins
    }

    /// Per-cell count of assigned points. Sums to the number of
    /// non-sentinel assignments.
    pub fn visits(&self) -> &[u64] {
        &self.visits
    }

    pub fn warnings(&self) -> &[ClassifyWarning] {
        &self.warnings
    }

    /// False iff any point matched more than one cell, which implies a mesh
    /// tiling violation; downstream consumers should distrust the results.
    pub fn is_trusted(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, ClassifyWarning::MultiContainment { .. }))
    }
}

/// Classifies every point against the frozen mesh.
///
/// Deterministic: the same points against the same mesh always produce the
/// same bin assignments. Warnings are logged via `log::warn!` and returned.
pub fn classify(mesh: &Mesh, points: PointSet<'_>) -> Classification {
    let cells = mesh.cells();
    // (assigned bin, number of cells claiming the point) per point.
    let scanned: Vec<(BinId, u32)> = (0..points.len())
        .into_par_iter()
        .map(|i| {
            let (x, y) = points.get(i);
            if !x.is_finite() || !y.is_finite() {
                return (BinId::OutOfMesh, 0);
            }
            let mut assigned = BinId::OutOfMesh;
            let mut matches = 0u32;
            for (index, cell) in cells.iter().enumerate() {
                if cell.contains(x, y) {
                    if matches == 0 {
                        assigned = BinId::Bin(index);
                    }
                    matches += 1;
                }
            }
            (assigned, matches)
        })
        .collect();

    let mut bins = Vec::with_capacity(scanned.len());
    let mut visits = vec![0u64; cells.len()];
    let mut out_of_mesh = 0usize;
    let mut multi = 0usize;
    for &(bin, matches) in &scanned {
        if let Some(index) = bin.index() {
            visits[index] += 1;
        } else {
            out_of_mesh += 1;
        }
        if matches > 1 {
            multi += 1;
        }
        bins.push(bin);
    }

    let mut warnings = Vec::new();
    if out_of_mesh > 0 {
        let fraction = out_of_mesh as f64 / points.len().max(1) as f64;
        let warning = ClassifyWarning::OutOfMesh {
            count: out_of_mesh,
            fraction,
        };
        log::warn!("{warning}");
        warnings.push(warning);
    }
    let empty = visits.iter().filter(|&&v| v == 0).count();
    if empty > 0 {
        let warning = ClassifyWarning::EmptyCells { count: empty };
        log::warn!("{warning}");
        warnings.push(warning);
    }
    if multi > 0 {
        let warning = ClassifyWarning::MultiContainment { points: multi };
        log::warn!("{warning}; results are untrusted");
        warnings.push(warning);
    }

    Classification {
        bins,
        visits,
        warnings,
    }
}
