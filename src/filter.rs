//! Cell Quality Filter: quantile-based mask over the frozen mesh.
//!
//! Two independent tests, each optional:
//! - **size**: keep cells whose area is strictly below the `size_quantile`
//!   of the area distribution (suppresses coarse cells too large to be
//!   informative),
//! - **density**: keep cells whose `count / area` is strictly above the
//!   `density_quantile` of the density distribution (suppresses cells too
//!   sparse to be reliable).
//!
//! Both run on un-transformed geometry regardless of any display scale.
//! An unset threshold is a no-op; both set means logical AND. Pure and
//! recomputable: no state beyond the inputs.

use crate::error::QuadBinError;
use crate::mesh::Mesh;

/// Optional quantile thresholds, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CellFilterThresholds {
    pub density_quantile: Option<f64>,
    pub size_quantile: Option<f64>,
}

impl CellFilterThresholds {
    /// Validates both quantiles into `[0, 1]`.
    pub fn new(
        density_quantile: Option<f64>,
        size_quantile: Option<f64>,
    ) -> Result<Self, QuadBinError> {
        for (name, value) in [
            ("density", density_quantile),
            ("size", size_quantile),
        ] {
            if let Some(value) = value {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    return Err(QuadBinError::QuantileOutOfRange { name, value });
                }
            }
        }
        Ok(Self {
            density_quantile,
            size_quantile,
        })
    }

    /// No filtering at all: every cell passes.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Derives the per-cell keep mask from the mesh geometry and the visit
/// counts of one classification pass.
///
/// `visits` must cover exactly the mesh cells. Raising `density_quantile`
/// never lets more cells pass the density test; raising `size_quantile`
/// never lets fewer cells pass the size test.
pub fn quality_mask(
    mesh: &Mesh,
    visits: &[u64],
    thresholds: &CellFilterThresholds,
) -> Result<Vec<bool>, QuadBinError> {
    if visits.len() != mesh.len() {
        return Err(QuadBinError::VisitLengthMismatch {
            cells: mesh.len(),
            visits: visits.len(),
        });
    }
    let mut mask = vec![true; mesh.len()];
    if mesh.is_empty() {
        return Ok(mask);
    }

    let areas = mesh.areas();
    if let Some(q) = thresholds.size_quantile {
        let cutoff = quantile(&areas, q);
        for (keep, &area) in mask.iter_mut().zip(areas.iter()) {
            *keep &= area < cutoff;
        }
    }
    if let Some(q) = thresholds.density_quantile {
        let densities: Vec<f64> = visits
            .iter()
            .zip(areas.iter())
            .map(|(&count, &area)| count as f64 / area)
            .collect();
        let cutoff = quantile(&densities, q);
        for (keep, &density) in mask.iter_mut().zip(densities.iter()) {
            *keep &= density > cutoff;
        }
    }
    Ok(mask)
}

/// Linear-interpolation quantile over a non-empty sample.
fn quantile(values: &[f64], q: f64) -> f64 {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite quantile inputs"));
    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = rank - lo as f64;
        sorted[lo] + frac * (sorted[hi] - sorted[lo])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{MeshBuilder, MeshBuilderConfig};
    use crate::edges::AxisEdges;
    use crate::error::Axis;
    use crate::points::PointSet;

    fn uniform_mesh() -> Mesh {
        let points = PointSet::new(&[], &[]).unwrap();
        MeshBuilder::new(
            points,
            AxisEdges::new(Axis::X, vec![0.0, 1.0, 2.0, 4.0]).unwrap(),
            AxisEdges::new(Axis::Y, vec![0.0, 1.0]).unwrap(),
            MeshBuilderConfig::default(),
        )
        .unwrap()
        .build()
        .unwrap()
    }

    #[test]
    fn unset_thresholds_keep_everything() {
        let mesh = uniform_mesh();
        let visits = vec![0u64; mesh.len()];
        let mask = quality_mask(&mesh, &visits, &CellFilterThresholds::none()).unwrap();
        assert!(mask.iter().all(|&k| k));
    }

    #[test]
    fn size_test_is_strictly_below() {
        // Areas are [1, 1, 2]; the q=1.0 cutoff is 2, so only the two unit
        // cells pass the strict comparison.
        let mesh = uniform_mesh();
        let visits = vec![1u64; mesh.len()];
        let thresholds = CellFilterThresholds::new(None, Some(1.0)).unwrap();
        let mask = quality_mask(&mesh, &visits, &thresholds).unwrap();
        assert_eq!(mask, vec![true, true, false]);
    }

    #[test]
    fn density_test_is_strictly_above() {
        let mesh = uniform_mesh();
        // Densities: [10, 2, 0.5] over areas [1, 1, 2].
        let visits = vec![10, 2, 1];
        let thresholds = CellFilterThresholds::new(Some(0.0), None).unwrap();
        let mask = quality_mask(&mesh, &visits, &thresholds).unwrap();
        assert_eq!(mask, vec![true, true, false]);
    }

    #[test]
    fn both_thresholds_and_together() {
        let mesh = uniform_mesh();
        let visits = vec![10, 2, 1];
        let thresholds = CellFilterThresholds::new(Some(0.0), Some(1.0)).unwrap();
        let mask = quality_mask(&mesh, &visits, &thresholds).unwrap();
        assert_eq!(mask, vec![true, true, false]);
    }

    #[test]
    fn rejects_out_of_range_quantiles() {
        assert!(matches!(
            CellFilterThresholds::new(Some(1.5), None),
            Err(QuadBinError::QuantileOutOfRange { name: "density", .. })
        ));
        assert!(matches!(
            CellFilterThresholds::new(None, Some(-0.1)),
            Err(QuadBinError::QuantileOutOfRange { name: "size", .. })
        ));
    }

    #[test]
    fn rejects_mismatched_visits() {
        let mesh = uniform_mesh();
        let err = quality_mask(&mesh, &[1], &CellFilterThresholds::none()).unwrap_err();
        assert!(matches!(err, QuadBinError::VisitLengthMismatch { .. }));
    }
}
