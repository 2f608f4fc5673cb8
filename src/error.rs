//! QuadBinError: unified error type for quadbin public APIs
//!
//! All fatal conditions surface through this enum so callers handle one
//! error type across construction, refinement, and filtering. Non-fatal
//! conditions (data loss, tiling suspicions) are *not* errors; they are
//! collected as [`ClassifyWarning`](crate::classify::ClassifyWarning)
//! values alongside results so batch workflows are not halted by one bad
//! point set.

use std::fmt;
use thiserror::Error;

/// Which coordinate axis an edge sequence belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Unified error type for quadbin operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QuadBinError {
    /// An axis edge sequence has fewer than two entries.
    #[error("{axis}-axis edge sequence needs at least 2 entries, got {len}")]
    EdgesTooShort { axis: Axis, len: usize },
    /// An axis edge sequence contains a NaN or infinite value.
    #[error("{axis}-axis edge at index {index} is not finite")]
    NonFiniteEdge { axis: Axis, index: usize },
    /// An axis edge sequence is not strictly ascending.
    #[error("{axis}-axis edges must be strictly ascending at index {index}")]
    NonAscendingEdges { axis: Axis, index: usize },
    /// The x and y coordinate slices have different lengths.
    #[error("point arrays must have equal length: x has {x_len}, y has {y_len}")]
    PointLengthMismatch { x_len: usize, y_len: usize },
    /// `min_per_bin` must be a positive occupancy threshold.
    #[error("min_per_bin must be positive")]
    ZeroMinPerBin,
    /// A quantile threshold fell outside `[0, 1]`.
    #[error("{name} quantile must lie in [0, 1], got {value}")]
    QuantileOutOfRange { name: &'static str, value: f64 },
    /// A cell was constructed with non-positive extent on some axis.
    #[error("degenerate cell bounds: ({x0}, {x1}) x ({y0}, {y1})")]
    DegenerateCell { x0: f64, x1: f64, y0: f64, y1: f64 },
    /// A visit-count slice did not match the mesh it describes.
    #[error("visit counts cover {visits} cells but the mesh has {cells}")]
    VisitLengthMismatch { cells: usize, visits: usize },
    /// The refinement loop exceeded its generation cap without converging.
    /// No partial mesh is published.
    #[error(
        "refinement did not converge within {generations} generations \
         ({active} cells still over-populated); check min_per_bin"
    )]
    NonConvergence { generations: usize, active: usize },
    /// Cooperative cancellation was observed at a generation boundary.
    #[error("mesh construction cancelled at generation {generation}")]
    Cancelled { generation: usize },
    /// Mesh invariant validation found a tiling gap or overlap.
    #[error("mesh tiling violation: retired area {actual} != coarse area {expected}")]
    TilingViolation { expected: f64, actual: f64 },
    /// Two mesh cells intersect with positive area.
    #[error("mesh cells {first} and {second} overlap with positive area")]
    OverlappingCells { first: usize, second: usize },
}
