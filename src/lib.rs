//! # quadbin
//!
//! quadbin adaptively partitions a large, irregularly distributed 2-D
//! scatter of points into a non-uniform mesh of rectangular cells such that
//! no retained cell holds more than a configured maximum occupancy, for
//! downstream per-cell statistical aggregation over unevenly dense data.
//!
//! The pipeline: borrowed points plus coarse axis edges go through the
//! [`builder::MeshBuilder`] refinement loop (count occupancy, quadrant-split
//! over-populated cells, retire the rest, repeat) into a frozen
//! [`mesh::Mesh`]; [`classify::classify`] assigns every original point its
//! containing leaf cell; [`category::BinCategories`] and
//! [`filter::quality_mask`] are pure views over the results for grouping
//! and cell suppression.
//!
//! ## Determinism and concurrency
//!
//! Generations are strictly sequential; the counting and classification
//! kernels are data-parallel (rayon) with disjoint output slots, so results
//! are deterministic regardless of thread count. The frozen mesh is
//! immutable and freely shareable.
//!
//! ## Usage
//!
//! ```rust
//! use quadbin::prelude::*;
//!
//! let x = [0.2, 0.4, 1.3, 1.7];
//! let y = [0.5, 0.6, 0.2, 0.9];
//! let points = PointSet::new(&x, &y)?;
//! let x_edges = AxisEdges::with_extension(Axis::X, vec![0.0, 1.0, 2.0])?;
//! let y_edges = AxisEdges::with_extension(Axis::Y, vec![0.0, 1.0])?;
//!
//! let config = MeshBuilderConfig { min_per_bin: 2, ..Default::default() };
//! let mesh = MeshBuilder::new(points, x_edges, y_edges, config)?.build()?;
//!
//! let classification = classify(&mesh, points);
//! let categories = BinCategories::from_bins(classification.bins());
//! let mask = quality_mask(&mesh, classification.visits(), &CellFilterThresholds::none())?;
//! assert_eq!(mask.len(), mesh.len());
//! assert!(categories.len() <= mesh.len());
//! # Ok::<(), quadbin::error::QuadBinError>(())
//! ```

pub mod builder;
pub mod category;
pub mod cell;
pub mod classify;
pub mod count;
pub mod edges;
pub mod error;
pub mod filter;
pub mod invariants;
pub mod mesh;
pub mod points;

pub use invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::builder::{
        BuildReport, CancelToken, GenerationStats, MeshBuilder, MeshBuilderConfig,
    };
    pub use crate::category::BinCategories;
    pub use crate::cell::{BinId, Cell};
    pub use crate::classify::{Classification, ClassifyWarning, classify};
    pub use crate::count::count_occupancy;
    pub use crate::edges::AxisEdges;
    pub use crate::error::{Axis, QuadBinError};
    pub use crate::filter::{CellFilterThresholds, quality_mask};
    pub use crate::invariants::DebugInvariants;
    pub use crate::mesh::Mesh;
    pub use crate::points::PointSet;
}
