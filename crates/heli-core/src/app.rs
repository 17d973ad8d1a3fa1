//! Application state owned by the host and lent to event handlers and the
//! frame driver.

use crate::assembly::{build_scene, SceneHandles};
use crate::constants::HELICOPTER_START;
use crate::error::CoreError;
use crate::frame::MotionState;
use crate::input::{InputParams, InputTracker};
use crate::scene::Scene;
use crate::state::{Camera, Viewport};
use glam::{Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct AppState {
    pub scene: Scene,
    pub handles: SceneHandles,
    pub camera: Camera,
    pub motion: MotionState,
    pub input: InputTracker,
    viewport: Viewport,
}

impl AppState {
    pub fn new(viewport: Viewport, input: InputParams) -> Result<Self, CoreError> {
        let (scene, handles) = build_scene()?;
        Ok(Self {
            scene,
            handles,
            camera: Camera::new(viewport.aspect()),
            motion: MotionState::default(),
            input: InputTracker::new(input),
            viewport,
        })
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn light_position(&self) -> Vec3 {
        self.scene.sun.position
    }

    /// Apply a new viewport: camera aspect follows it. Returns whether
    /// anything changed.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        let changed = viewport != self.viewport;
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
        if changed {
            log::debug!(
                "[resize] {}x{} @{}",
                viewport.width(),
                viewport.height(),
                viewport.pixel_ratio()
            );
        }
        changed
    }

    pub fn on_pointer_down(&mut self, pointer: Vec2) {
        self.input.pointer_down(pointer);
    }

    pub fn on_pointer_move(&mut self, pointer: Vec2) -> bool {
        self.input.pointer_move(pointer, &mut self.scene.sun.position)
    }

    pub fn on_pointer_up(&mut self) {
        self.input.pointer_up();
    }

    pub fn on_pointer_leave(&mut self) {
        self.input.pointer_leave();
    }

    pub fn on_key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key, &mut self.camera.position)
    }

    /// Copy the motion state into the rotor and helicopter transforms.
    pub(crate) fn sync_motion(&mut self) {
        let SceneHandles {
            helicopter,
            main_rotor,
            tail_rotor,
            ..
        } = self.handles;
        match self.scene.transform_mut(main_rotor) {
            Ok(t) => t.rotation.y = self.motion.main_rotor_angle,
            Err(e) => log::warn!("[frame] main rotor not updated: {}", e),
        }
        match self.scene.transform_mut(tail_rotor) {
            Ok(t) => t.rotation.z = self.motion.tail_rotor_angle,
            Err(e) => log::warn!("[frame] tail rotor not updated: {}", e),
        }
        match self.scene.transform_mut(helicopter) {
            Ok(t) => t.position.x = HELICOPTER_START.x + self.motion.vehicle_x as f32,
            Err(e) => log::warn!("[frame] helicopter not moved: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;
    use crate::transform::Transform;

    #[test]
    fn stale_rotor_handle_does_not_stop_the_other_updates() {
        let mut app = AppState::new(Viewport::new(4, 3, 1.0).unwrap(), InputParams::default()).unwrap();
        // An id one past the end of the real scene.
        let mut bigger = app.scene.clone();
        let stale = bigger.add("extra", NodeKind::Group, Transform::default()).unwrap();
        assert!(app.scene.node(stale).is_err());

        app.handles.main_rotor = stale;
        app.motion.tail_rotor_angle = 0.5;
        app.motion.vehicle_x = 1.0;
        app.sync_motion();

        let tail = app.scene.node(app.handles.tail_rotor).unwrap();
        assert_eq!(tail.transform.rotation.z, 0.5);
        let heli = app.scene.node(app.handles.helicopter).unwrap();
        assert_eq!(heli.transform.position.x, HELICOPTER_START.x + 1.0);
    }
}
