//! # Processing Context
//!
//! Owns the state of one pipeline run: the current segment list, the last
//! clustering report and the trajectories of the last merge. Each stage
//! replaces its output wholesale; nothing is appended across calls.
//!
//! A context is `Send` but carries no interior synchronisation. Use one
//! context per job.

use crate::cluster::{cluster_endpoints, Clustering};
use crate::entity::Entity;
use crate::export;
use crate::extract::EntityExtractor;
use crate::import::DxfImporter;
use crate::merge::merge_segments;
use crate::options::ProcessingOptions;
use crate::preview;
use cutpath_core::{PipelineStage, Result, Segment, Statistics, Trajectory, TrajectoryError};
use std::path::{Path, PathBuf};

/// Source label used when entities are loaded from memory.
const IN_MEMORY_SOURCE: &str = "<in-memory>";

/// State of one pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessingContext {
    options: ProcessingOptions,
    source: Option<PathBuf>,
    segments: Vec<Segment>,
    original_segment_count: usize,
    clustering: Option<Clustering>,
    trajectories: Vec<Trajectory>,
}

impl ProcessingContext {
    /// Create an empty context.
    ///
    /// # Errors
    /// `InvalidTolerance` or `InvalidOptions` when the options are out of range.
    pub fn new(options: ProcessingOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            source: None,
            segments: Vec::new(),
            original_segment_count: 0,
            clustering: None,
            trajectories: Vec::new(),
        })
    }

    pub fn with_tolerance(tolerance: f64) -> Result<Self> {
        Self::new(ProcessingOptions::with_tolerance(tolerance))
    }

    pub fn options(&self) -> &ProcessingOptions {
        &self.options
    }

    pub fn tolerance(&self) -> f64 {
        self.options.tolerance
    }

    /// Drawing the current segments came from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    /// Report of the last clustering run
    pub fn clustering(&self) -> Option<&Clustering> {
        self.clustering.as_ref()
    }

    /// Read a DXF drawing and extract its segments.
    ///
    /// Replaces any previous segments and discards earlier trajectories.
    /// Returns the number of segments extracted.
    ///
    /// # Errors
    /// `FileRead` when the drawing cannot be read, `NoValidEntities` when no
    /// entity yields a usable segment.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let drawing = DxfImporter::import_file(path)?;
        self.replace_segments(&drawing.entities, path)
    }

    /// Extract segments from entities built in memory.
    pub fn load_entities(&mut self, entities: &[Entity]) -> Result<usize> {
        self.replace_segments(entities, Path::new(IN_MEMORY_SOURCE))
    }

    fn replace_segments(&mut self, entities: &[Entity], source: &Path) -> Result<usize> {
        let segments = EntityExtractor::new(self.options).extract_all(entities);
        if segments.is_empty() {
            return Err(TrajectoryError::NoValidEntities {
                path: source.to_path_buf(),
            });
        }

        tracing::info!(
            source = %source.display(),
            entities = entities.len(),
            segments = segments.len(),
            "Loaded segments"
        );

        self.source = Some(source.to_path_buf());
        self.original_segment_count = segments.len();
        self.segments = segments;
        self.clustering = None;
        self.trajectories.clear();

        Ok(self.original_segment_count)
    }

    /// Snap near-coincident endpoints; the snapped segments replace the
    /// current list.
    ///
    /// # Errors
    /// `EmptyState` when no segments are loaded.
    pub fn cluster_endpoints(&mut self) -> Result<&Clustering> {
        let clustering = cluster_endpoints(&self.segments, self.options.tolerance)?;
        self.segments = clustering.segments.clone();
        Ok(&*self.clustering.insert(clustering))
    }

    /// Merge the current segments into fresh trajectories.
    ///
    /// # Errors
    /// `EmptyState` when no segments are loaded.
    pub fn merge_geometries(&mut self) -> Result<&[Trajectory]> {
        self.trajectories = merge_segments(&self.segments)?;
        Ok(&self.trajectories)
    }

    /// Load, cluster and merge as one call.
    ///
    /// The run is all-or-nothing: on failure the context keeps its previous
    /// state and the root cause is wrapped in `Processing`.
    pub fn process_file(&mut self, path: impl AsRef<Path>) -> Result<Statistics> {
        let path = path.as_ref();
        let wrap = |source: TrajectoryError| TrajectoryError::Processing {
            path: path.to_path_buf(),
            source: Box::new(source),
        };

        let mut run = Self::new(self.options).map_err(wrap)?;
        run.load(path).map_err(wrap)?;
        run.cluster_endpoints().map_err(wrap)?;
        run.merge_geometries().map_err(wrap)?;

        *self = run;
        let stats = self.statistics();
        tracing::info!(
            path = %path.display(),
            segments = stats.original_segment_count,
            clusters = stats.cluster_count,
            trajectories = stats.final_trajectory_count,
            "Processed drawing"
        );
        Ok(stats)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            original_segment_count: self.original_segment_count,
            final_trajectory_count: self.trajectories.len(),
            cluster_count: self
                .clustering
                .as_ref()
                .map_or(0, Clustering::cluster_count),
            tolerance_used: self.options.tolerance,
        }
    }

    /// Write the trajectories in the plain-text XY format.
    ///
    /// # Errors
    /// `EmptyState` when nothing has been merged, `Io` on write failure.
    pub fn export_to_text(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        export::export_to_text(&self.trajectories, path)
    }

    /// Render the trajectories as SVG, saving them when a path is given.
    pub fn render_preview(&self, save_path: Option<&Path>) -> Result<String> {
        if self.trajectories.is_empty() {
            return Err(TrajectoryError::empty(PipelineStage::Preview));
        }
        preview::render_preview(&self.trajectories, save_path)
    }
}
