use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};
use spire_input::InputEvent;

use crate::arcball::ArcBall;

/// Projection and gesture tuning for [`OrbitRig`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Closest allowed zoom distance.
    pub zoom_min: f32,
    /// Farthest allowed zoom distance.
    pub zoom_max: f32,
    /// World units per pixel of two-finger pan.
    pub pan_scale: f32,
    /// Spin rate per pixel of one-finger pan.
    pub pace_scale: f32,
    pub initial_translation: Vec3,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 65.0,
            near: 0.1,
            far: 3000.0,
            zoom_min: 1.0,
            zoom_max: 1000.0,
            pan_scale: 0.05,
            pace_scale: 0.1,
            initial_translation: Vec3::new(1.6, -3.1, 1000.0),
        }
    }
}

impl RigConfig {
    /// Force a zoom distance into `[zoom_min, zoom_max]`. An inverted range
    /// yields `zoom_max` rather than panicking.
    pub fn clamp_zoom(&self, z: f32) -> f32 {
        z.max(self.zoom_min).min(self.zoom_max)
    }
}

/// Orbit camera driven by input events.
///
/// Direct pointer drags go straight to the arcball. A one-finger pan sets a
/// spin rate ("pace") that [`tick`](Self::tick) applies as a small drag from
/// the viewport center every tick; a two-finger pan slides the scene and a
/// pinch zooms.
#[derive(Debug, Clone)]
pub struct OrbitRig {
    config: RigConfig,
    arcball: ArcBall,
    translation: Vec3,
    pace: Vec2,
    projection: Mat4,
    peak_pan_touches: u32,
}

impl OrbitRig {
    pub fn new(config: RigConfig, width: f32, height: f32) -> Self {
        let translation = config.initial_translation;
        let mut rig = Self {
            config,
            arcball: ArcBall::new(width, height),
            translation: Vec3::new(
                translation.x,
                translation.y,
                config.clamp_zoom(translation.z),
            ),
            pace: Vec2::ZERO,
            projection: Mat4::IDENTITY,
            peak_pan_touches: 0,
        };
        rig.update_projection();
        rig
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    pub fn arcball(&self) -> &ArcBall {
        &self.arcball
    }

    pub fn translation(&self) -> Vec3 {
        self.translation
    }

    pub fn pace(&self) -> Vec2 {
        self.pace
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn handle(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown(p) => self.arcball.drag_start(p),
            InputEvent::PointerMove(p) => self.arcball.drag_move(p),
            InputEvent::Pan {
                translation,
                touches,
            } => self.pan(translation, touches),
            InputEvent::Pinch(scale) => self.zoom(scale),
            InputEvent::Tap => self.pace = Vec2::ZERO,
            InputEvent::Resize { width, height } => self.resize(width, height),
        }
    }

    fn pan(&mut self, translation: Vec2, touches: u32) {
        if touches == 0 {
            self.peak_pan_touches = 0;
        } else if touches > self.peak_pan_touches {
            self.peak_pan_touches = touches;
        }

        match touches {
            // Lifting one finger off a two-finger slide must not start a spin
            1 if self.peak_pan_touches < 2 => {
                self.pace = translation * self.config.pace_scale;
            }
            2 => {
                self.translation.x = translation.x * self.config.pan_scale;
                self.translation.y = -translation.y * self.config.pan_scale;
            }
            _ => {}
        }
    }

    /// Apply a pinch scale; spreading the fingers (`scale > 1`) moves closer.
    pub fn zoom(&mut self, scale: f32) {
        let z = self.translation.z * (1.0 + (1.0 - scale) / 10.0);
        self.translation.z = self.config.clamp_zoom(z);
        tracing::trace!(zoom = self.translation.z, "zoom");
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.arcball.set_viewport(width, height);
        self.update_projection();
        tracing::debug!(width, height, "camera viewport resized");
    }

    fn update_projection(&mut self) {
        let size = self.arcball.viewport();
        let aspect = if size.y > 0.0 { size.x / size.y } else { 1.0 };
        self.projection = spire_transform::perspective_fov(
            self.config.fov_y_degrees,
            aspect,
            self.config.near,
            self.config.far,
        );
    }

    /// Advance the continuous spin by one tick.
    pub fn tick(&mut self) {
        if self.pace == Vec2::ZERO {
            return;
        }
        let center = self.arcball.center();
        self.arcball.drag_start(center);
        self.arcball.drag_move(center - self.pace);
    }

    pub fn reset(&mut self) {
        self.arcball.reset();
        self.pace = Vec2::ZERO;
        self.translation = self.config.initial_translation;
        self.translation.z = self.config.clamp_zoom(self.translation.z);
    }

    /// `projection * translate(translation) * rotation`.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * spire_transform::translate_vec(self.translation) * self.arcball.transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat3;

    fn rig() -> OrbitRig {
        OrbitRig::new(RigConfig::default(), 801.0, 601.0)
    }

    #[test]
    fn default_rig_view_projection_is_finite() {
        let r = rig();
        let vp = r.view_projection();
        assert!(vp.is_finite());
        assert_eq!(r.translation(), Vec3::new(1.6, -3.1, 1000.0));
    }

    #[test]
    fn pinch_zoom_is_clamped() {
        let mut r = rig();
        // Pinching in (scale < 1) pushes the camera away
        for _ in 0..50 {
            r.zoom(0.0);
        }
        assert_eq!(r.translation().z, 1000.0);
        for _ in 0..500 {
            r.handle(&InputEvent::Pinch(5.0));
        }
        assert_eq!(r.translation().z, 1.0);
    }

    #[test]
    fn inverted_zoom_range_does_not_panic() {
        let config = RigConfig {
            zoom_min: 10.0,
            zoom_max: 5.0,
            ..RigConfig::default()
        };
        let mut r = OrbitRig::new(config, 800.0, 600.0);
        r.zoom(0.5);
        r.reset();
        assert_eq!(r.translation().z, 5.0);
    }

    #[test]
    fn two_finger_pan_translates() {
        let mut r = rig();
        r.handle(&InputEvent::Pan {
            translation: Vec2::new(20.0, 40.0),
            touches: 2,
        });
        assert!((r.translation().x - 1.0).abs() < 1e-6);
        assert!((r.translation().y + 2.0).abs() < 1e-6);
        assert_eq!(r.pace(), Vec2::ZERO);
    }

    #[test]
    fn one_finger_pan_after_two_does_not_spin() {
        let mut r = rig();
        r.handle(&InputEvent::Pan {
            translation: Vec2::new(5.0, 5.0),
            touches: 2,
        });
        r.handle(&InputEvent::Pan {
            translation: Vec2::new(30.0, 0.0),
            touches: 1,
        });
        assert_eq!(r.pace(), Vec2::ZERO);

        // After all fingers lift, a fresh one-finger pan spins again
        r.handle(&InputEvent::Pan {
            translation: Vec2::ZERO,
            touches: 0,
        });
        r.handle(&InputEvent::Pan {
            translation: Vec2::new(30.0, 0.0),
            touches: 1,
        });
        assert_eq!(r.pace(), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn pace_spins_every_tick_and_tap_stops_it() {
        let mut r = rig();
        r.handle(&InputEvent::Pan {
            translation: Vec2::new(50.0, 0.0),
            touches: 1,
        });
        r.tick();
        let once = r.arcball().rotation();
        assert_ne!(once, Mat3::IDENTITY);
        r.tick();
        let twice = r.arcball().rotation();
        // Each tick composes the same increment on top of the last
        assert!(twice.abs_diff_eq(once * once, 1e-4));

        r.handle(&InputEvent::Tap);
        r.tick();
        assert_eq!(r.arcball().rotation(), twice);
    }

    #[test]
    fn pointer_events_drive_arcball() {
        let mut r = rig();
        r.handle(&InputEvent::PointerDown(Vec2::new(400.0, 300.0)));
        r.handle(&InputEvent::PointerMove(Vec2::new(500.0, 300.0)));
        assert_ne!(r.arcball().rotation(), Mat3::IDENTITY);
        r.reset();
        assert_eq!(r.arcball().rotation(), Mat3::IDENTITY);
    }

    #[test]
    fn resize_updates_projection_aspect() {
        let mut r = rig();
        r.handle(&InputEvent::Resize {
            width: 1000.0,
            height: 500.0,
        });
        let p = r.projection();
        // x scale is y scale divided by aspect
        assert!((p.y_axis.y / p.x_axis.x - 2.0).abs() < 1e-5);
    }
}
