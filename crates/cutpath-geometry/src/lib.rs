//! # Cutpath Geometry
//!
//! Trajectory reconstruction pipeline for cutpath.
//!
//! Turns the entities of a CAD drawing into continuous cutting trajectories:
//!
//! 1. **import** - read DXF entities into [`Entity`] values
//! 2. **extract** - discretise each entity into a [`Segment`](cutpath_core::Segment)
//! 3. **spline** - fit and resample SPLINE entities
//! 4. **cluster** - snap endpoints closer than ε onto one centroid
//! 5. **merge** - chain snapped segments into maximal trajectories
//! 6. **export** / **preview** - write the XY text format or an SVG preview
//!
//! [`ProcessingContext`] strings the stages together for one run.

pub mod cluster;
pub mod context;
pub mod entity;
pub mod export;
pub mod extract;
pub mod import;
pub mod merge;
pub mod options;
pub mod preview;
pub mod spline;

pub use cluster::{cluster_endpoints, Cluster, Clustering};
pub use context::ProcessingContext;
pub use entity::{
    ArcEntity, CircleEntity, Entity, EntityKind, LineEntity, PolylineEntity, SplineEntity,
};
pub use export::{export_to_text, write_trajectories};
pub use extract::{arc_sweep_degrees, EntityExtractor};
pub use import::{DxfImporter, ImportedDrawing};
pub use merge::merge_segments;
pub use options::{
    validate_tolerance, ProcessingOptions, DEFAULT_ARC_SAMPLES, DEFAULT_CIRCLE_SAMPLES,
    DEFAULT_SPLINE_SAMPLES,
};
pub use preview::{render_preview, render_svg};
pub use spline::SplineFitter;
