use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use spire_common::{GeometryControl, SeedPoint, Vertex};

use crate::arena::OutputArena;
use crate::error::GeometryError;
use crate::tower::expand_tower;

/// Largest vertex buffer addressable with 16-bit indices.
pub const MAX_VERTICES: usize = 1 << 16;
/// Six indices per side face at full vertex capacity.
pub const MAX_INDICES: usize = MAX_VERTICES * 6;

/// Buffer sizes and worker pool settings for a [`GeometryEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub vertex_capacity: usize,
    pub index_capacity: usize,
    /// Worker threads for the expansion pass; `None` lets rayon decide.
    pub worker_threads: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            vertex_capacity: MAX_VERTICES,
            index_capacity: MAX_INDICES,
            worker_threads: None,
        }
    }
}

/// Outcome of one [`GeometryEngine::update`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MeshStats {
    pub vertex_count: usize,
    pub index_count: usize,
    /// Towers whose triangles made it into the index buffer.
    pub towers_emitted: usize,
    /// Towers cut for lack of buffer space.
    pub towers_dropped: usize,
    pub elapsed: Duration,
}

impl MeshStats {
    pub fn triangle_count(&self) -> usize {
        self.index_count / 3
    }
}

/// The published mesh of the last completed pass.
#[derive(Debug, Clone, Copy)]
pub struct MeshView<'a> {
    pub vertices: &'a [Vertex],
    pub indices: &'a [u16],
}

impl MeshView<'_> {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Expands seed points into tower meshes on a dedicated worker pool.
///
/// Both output buffers are allocated once at construction. Each
/// [`update`](Self::update) rewrites a prefix of them; the prefix lengths are
/// the vertex and index counts a renderer should draw.
pub struct GeometryEngine {
    config: EngineConfig,
    pool: rayon::ThreadPool,
    vertices: OutputArena<Vertex>,
    indices: OutputArena<u16>,
    last_stats: MeshStats,
}

impl std::fmt::Debug for GeometryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeometryEngine")
            .field("config", &self.config)
            .field("workers", &self.pool.current_num_threads())
            .field("last_stats", &self.last_stats)
            .finish()
    }
}

impl GeometryEngine {
    /// Validate the control block against the seed points and allocate buffers.
    pub fn new(
        config: EngineConfig,
        control: &GeometryControl,
        points: &[SeedPoint],
    ) -> Result<Self, GeometryError> {
        validate(control, points)?;
        if config.vertex_capacity > MAX_VERTICES {
            return Err(GeometryError::VertexCapacityTooLarge {
                requested: config.vertex_capacity,
                max: MAX_VERTICES,
            });
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.worker_threads.unwrap_or(0))
            .thread_name(|i| format!("spire-geometry-{i}"))
            .build()?;

        tracing::info!(
            points = points.len(),
            vertex_capacity = config.vertex_capacity,
            index_capacity = config.index_capacity,
            workers = pool.current_num_threads(),
            "geometry engine ready"
        );

        Ok(Self {
            config,
            pool,
            vertices: OutputArena::with_capacity(config.vertex_capacity),
            indices: OutputArena::with_capacity(config.index_capacity),
            last_stats: MeshStats::default(),
        })
    }

    /// Run one generation pass.
    ///
    /// Every seed point's angle takes one step toward `control.desired_angle`,
    /// then its tower is written into the shared buffers. Returns once all
    /// workers have finished.
    pub fn update(
        &mut self,
        control: &GeometryControl,
        points: &mut [SeedPoint],
    ) -> Result<MeshStats, GeometryError> {
        validate(control, points)?;
        let _span = tracing::info_span!("geometry_update", points = points.len()).entered();
        let started = Instant::now();

        let vertex_writer = self.vertices.writer();
        let index_writer = self.indices.writer();

        let towers_emitted: usize = self.pool.install(|| {
            points
                .par_iter_mut()
                .map(|point| usize::from(expand_tower(control, point, &vertex_writer, &index_writer)))
                .sum()
        });

        let vertex_count = vertex_writer.commit();
        let index_count = index_writer.commit();
        let towers_dropped = points.len() - towers_emitted;

        let stats = MeshStats {
            vertex_count,
            index_count,
            towers_emitted,
            towers_dropped,
            elapsed: started.elapsed(),
        };

        if towers_dropped > 0 {
            tracing::warn!(
                dropped = towers_dropped,
                vertex_capacity = self.vertices.capacity(),
                index_capacity = self.indices.capacity(),
                "mesh buffers full; towers dropped this tick"
            );
        }
        tracing::debug!(
            vertices = vertex_count,
            indices = index_count,
            towers = towers_emitted,
            elapsed_us = stats.elapsed.as_micros() as u64,
            "geometry pass complete"
        );

        self.last_stats = stats;
        Ok(stats)
    }

    pub fn mesh(&self) -> MeshView<'_> {
        MeshView {
            vertices: self.vertices.as_slice(),
            indices: self.indices.as_slice(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn last_stats(&self) -> &MeshStats {
        &self.last_stats
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn worker_count(&self) -> usize {
        self.pool.current_num_threads()
    }
}

fn validate(control: &GeometryControl, points: &[SeedPoint]) -> Result<(), GeometryError> {
    if points.is_empty() {
        return Err(GeometryError::NoSeedPoints);
    }
    if control.point_count as usize != points.len() {
        return Err(GeometryError::PointCountMismatch {
            expected: control.point_count as usize,
            actual: points.len(),
        });
    }
    if control.side_count < 3 || control.level_count == 0 {
        return Err(GeometryError::DegenerateControl {
            sides: control.side_count,
            levels: control.level_count,
        });
    }
    Ok(())
}
