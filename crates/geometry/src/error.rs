/// Configuration errors. All of them come from caller setup, never from
/// per-tick data, and are reported before any geometry is written.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("no seed points provided")]
    NoSeedPoints,
    #[error("control expects {expected} seed points, got {actual}")]
    PointCountMismatch { expected: usize, actual: usize },
    #[error("degenerate control: {sides} sides, {levels} levels (need at least 3 sides and 1 level)")]
    DegenerateControl { sides: u32, levels: u32 },
    #[error("vertex capacity {requested} exceeds the 16-bit index range ({max})")]
    VertexCapacityTooLarge { requested: usize, max: usize },
    #[error("failed to start geometry worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
