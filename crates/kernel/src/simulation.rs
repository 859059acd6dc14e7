use glam::Vec2;
use spire_camera::OrbitRig;
use spire_common::{GeometryControl, SceneUniforms, SeedPoint};
use spire_geometry::{GeometryEngine, MeshStats, MeshView};
use spire_input::{DeltaControl, InputEvent, ValueBinding};

use crate::config::{CURL_RANGE, ControlParams, DIRECTION_RANGE, SHAPE_RANGE, SimulationConfig};
use crate::error::SimulationError;
use crate::frame::FrameSubmission;
use crate::light::RovingLight;
use crate::scatter::scatter_seed_points;

/// The three delta controls a simulation exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    /// Horizontal drags steer heading, vertical drags steer tilt.
    Direction,
    /// Segment length (x) and thickness (y) deltas.
    Shape,
    /// Per-level twist (x) and tilt (y).
    Curl,
}

impl ControlId {
    pub const ALL: [ControlId; 3] = [ControlId::Direction, ControlId::Shape, ControlId::Curl];

    fn index(self) -> usize {
        match self {
            ControlId::Direction => 0,
            ControlId::Shape => 1,
            ControlId::Curl => 2,
        }
    }
}

fn direction_binding() -> ValueBinding<ControlParams> {
    ValueBinding {
        get: |p| Vec2::new(p.direction.y, p.direction.x),
        set: |p, v| p.direction = Vec2::new(v.y, v.x),
    }
}

fn shape_binding() -> ValueBinding<ControlParams> {
    ValueBinding {
        get: |p| Vec2::new(p.length, p.thickness),
        set: |p, v| {
            p.length = v.x;
            p.thickness = v.y;
        },
    }
}

fn curl_binding() -> ValueBinding<ControlParams> {
    ValueBinding {
        get: |p| Vec2::new(p.curl_twist, p.curl_tilt),
        set: |p, v| {
            p.curl_twist = v.x;
            p.curl_tilt = v.y;
        },
    }
}

/// Owns all per-run state and advances it one tick at a time.
///
/// Nothing here is global: the driver holds the `Simulation` and passes input
/// events in, then asks for a [`FrameSubmission`] to draw.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    params: ControlParams,
    control: GeometryControl,
    points: Vec<SeedPoint>,
    engine: GeometryEngine,
    rig: OrbitRig,
    light: RovingLight,
    controls: [DeltaControl<ControlParams>; 3],
    tick: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let points = scatter_seed_points(&config);
        let control = config.geometry_control();
        let engine = GeometryEngine::new(config.engine, &control, &points)?;
        let rig = OrbitRig::new(config.camera, config.viewport.x, config.viewport.y);

        let w = config.widget_size;
        let controls = [
            DeltaControl::new("Direction", DIRECTION_RANGE.0, DIRECTION_RANGE.1, 5.0, w, direction_binding()),
            DeltaControl::new("Len,Thk", SHAPE_RANGE.0, SHAPE_RANGE.1, 0.5, w, shape_binding()),
            DeltaControl::new("Curl", CURL_RANGE.0, CURL_RANGE.1, 0.1, w, curl_binding()),
        ];

        tracing::info!(
            points = points.len(),
            sides = control.side_count,
            levels = control.level_count,
            seed = config.seed,
            "simulation created"
        );

        Ok(Self {
            params: config.params.clamped(),
            config,
            control,
            points,
            engine,
            rig,
            light: RovingLight::default(),
            controls,
            tick: 0,
        })
    }

    /// Advance one tick: apply held controls, regenerate the mesh, then move
    /// the camera spin and the light.
    pub fn step(&mut self) -> Result<MeshStats, SimulationError> {
        let _span = tracing::info_span!("simulation_step", tick = self.tick + 1).entered();

        for control in &self.controls {
            control.update(&mut self.params);
        }
        self.params = self.params.clamped();
        self.params.apply_to(&mut self.control);

        let stats = self.engine.update(&self.control, &mut self.points)?;
        self.rig.tick();
        self.light.advance();
        self.tick += 1;

        tracing::trace!(
            vertices = stats.vertex_count,
            indices = stats.index_count,
            "tick complete"
        );
        Ok(stats)
    }

    pub fn handle_input(&mut self, event: &InputEvent) {
        self.rig.handle(event);
    }

    /// Press or drag a delta control at a widget-local position.
    pub fn touch_control(&mut self, id: ControlId, point: Vec2) {
        self.controls[id.index()].touch(point);
    }

    pub fn release_control(&mut self, id: ControlId) {
        self.controls[id.index()].release();
    }

    pub fn control_widget(&self, id: ControlId) -> &DeltaControl<ControlParams> {
        &self.controls[id.index()]
    }

    pub fn set_params(&mut self, params: ControlParams) {
        self.params = params.clamped();
    }

    /// The mesh from the last tick plus this frame's camera and light.
    pub fn frame(&self) -> FrameSubmission<'_> {
        let mesh = self.engine.mesh();
        FrameSubmission {
            vertices: mesh.vertices,
            indices: mesh.indices,
            uniforms: SceneUniforms::new(self.rig.view_projection(), self.light.direction()),
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn params(&self) -> &ControlParams {
        &self.params
    }

    pub fn control(&self) -> &GeometryControl {
        &self.control
    }

    pub fn points(&self) -> &[SeedPoint] {
        &self.points
    }

    pub fn mesh(&self) -> MeshView<'_> {
        self.engine.mesh()
    }

    pub fn last_stats(&self) -> &MeshStats {
        self.engine.last_stats()
    }

    pub fn worker_count(&self) -> usize {
        self.engine.worker_count()
    }

    pub fn rig(&self) -> &OrbitRig {
        &self.rig
    }

    pub fn light(&self) -> &RovingLight {
        &self.light
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}
