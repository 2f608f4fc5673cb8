//! Mesh Builder: the Refining -> Done loop that grows the adaptive mesh.
//!
//! Each generation counts the active cells, quadrant-splits every cell whose
//! occupancy exceeds `min_per_bin`, retires the rest into the mesh, and
//! recurses on the children. Zero splits is the termination signal: all
//! survivors are retired and the mesh freezes. Generations are strictly
//! sequential; only the counting kernel inside a generation is parallel.
//!
//! Two hardening measures guard long constructions: a generation cap that
//! aborts with [`QuadBinError::NonConvergence`] (a pathological `min_per_bin`
//! can otherwise refine forever), and a cooperative [`CancelToken`] checked
//! at generation boundaries. Neither ever publishes a partial mesh.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::count::count_occupancy;
use crate::edges::{AxisEdges, coarse_bounds, coarse_cells};
use crate::error::QuadBinError;
use crate::invariants::DebugInvariants;
use crate::mesh::Mesh;
use crate::points::PointSet;

/// Tuning knobs for one mesh construction.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct MeshBuilderConfig {
    /// Maximum tolerated occupancy per retained cell; cells above it split.
    pub min_per_bin: u64,
    /// Hard cap on refinement generations before construction aborts.
    pub max_generations: usize,
}

impl Default for MeshBuilderConfig {
    fn default() -> Self {
        Self {
            min_per_bin: 1000,
            // A midpoint split halves each side; 32 halvings exhaust f64
            // spacing for any practical coarse grid.
            max_generations: 32,
        }
    }
}

/// Cooperative cancellation flag, checked at generation boundaries.
///
/// Clone the token and hand one handle to the constructing thread; calling
/// [`CancelToken::cancel`] from anywhere makes the builder abort with
/// [`QuadBinError::Cancelled`] before its next generation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Per-generation refinement statistics.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct GenerationStats {
    pub generation: usize,
    /// Active cells counted this generation.
    pub active_cells: usize,
    /// Cells whose occupancy exceeded `min_per_bin` and were split.
    pub split_cells: usize,
    /// Cells retired into the mesh this generation.
    pub retired_cells: usize,
    pub elapsed: Duration,
}

/// Observability record for a whole construction.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BuildReport {
    pub generations: Vec<GenerationStats>,
    pub total_elapsed: Duration,
    /// Points excluded from the refinement hot path (non-finite or outside
    /// the coarse bounds); they re-enter classification unfiltered.
    pub prefiltered_points: usize,
}

/// Builds a frozen [`Mesh`] from borrowed points and coarse axis edges.
#[derive(Debug)]
pub struct MeshBuilder<'a> {
    points: PointSet<'a>,
    x_edges: AxisEdges,
    y_edges: AxisEdges,
    config: MeshBuilderConfig,
    cancel: Option<CancelToken>,
}

impl<'a> MeshBuilder<'a> {
    /// Validates the configuration and captures the inputs. The edge
    /// sequences are expected to carry the outward extension already (see
    /// [`AxisEdges::with_extension`]).
    pub fn new(
        points: PointSet<'a>,
        x_edges: AxisEdges,
        y_edges: AxisEdges,
        config: MeshBuilderConfig,
    ) -> Result<Self, QuadBinError> {
        if config.min_per_bin == 0 {
            return Err(QuadBinError::ZeroMinPerBin);
        }
        Ok(Self {
            points,
            x_edges,
            y_edges,
            config,
            cancel: None,
        })
    }

    /// Attaches a cooperative cancellation token.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Runs the refinement loop to completion and freezes the mesh.
    ///
    /// Errors ([`QuadBinError::NonConvergence`], [`QuadBinError::Cancelled`])
    /// abort immediately; no partial mesh is ever published.
    pub fn build(self) -> Result<Mesh, QuadBinError> {
        let start = Instant::now();
        let bounds = coarse_bounds(&self.x_edges, &self.y_edges);
        let filtered = self.points.filter_to_bounds(&bounds);
        if filtered.dropped() > 0 {
            log::debug!(
                "prefiltered {} of {} points outside coarse bounds",
                filtered.dropped(),
                self.points.len()
            );
        }
        let scan = filtered.as_point_set();

        let mut active = coarse_cells(&self.x_edges, &self.y_edges);
        let mut retired = Vec::new();
        let mut stats = Vec::new();
        let mut generation = 0usize;

        loop {
            if let Some(token) = &self.cancel {
                if token.is_cancelled() {
                    return Err(QuadBinError::Cancelled { generation });
                }
            }

            let gen_start = Instant::now();
            let counts = count_occupancy(&active, scan);
            let mut children = Vec::new();
            let mut split_cells = 0usize;
            let mut retired_cells = 0usize;
            for (cell, &count) in active.iter().zip(counts.iter()) {
                if count > self.config.min_per_bin {
                    children.extend_from_slice(&cell.split());
                    split_cells += 1;
                } else {
                    retired.push(*cell);
                    retired_cells += 1;
                }
            }

            let elapsed = gen_start.elapsed();
            log::info!(
                "generation {generation}: active={} split={split_cells} retired={retired_cells} \
                 elapsed={elapsed:?}",
                active.len(),
            );
            stats.push(GenerationStats {
                generation,
                active_cells: active.len(),
                split_cells,
                retired_cells,
                elapsed,
            });

            if split_cells == 0 {
                break;
            }
            generation += 1;
            if generation >= self.config.max_generations {
                return Err(QuadBinError::NonConvergence {
                    generations: self.config.max_generations,
                    active: children.len(),
                });
            }
            active = children;
        }

        let report = BuildReport {
            generations: stats,
            total_elapsed: start.elapsed(),
            prefiltered_points: filtered.dropped(),
        };
        let mesh = Mesh::freeze(retired, bounds, report);
        mesh.debug_assert_invariants();
        Ok(mesh)
    }
}
