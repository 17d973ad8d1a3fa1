use crate::constants::{CAMERA_STEP, DRAG_DEGREES_PER_PIXEL};
use crate::transform::euler_xyz;
use glam::{Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputParams {
    /// Light rotation per pixel of pointer travel.
    pub degrees_per_pixel: f32,
    /// Camera translation per recognized key press.
    pub camera_step: f32,
}

impl Default for InputParams {
    fn default() -> Self {
        Self {
            degrees_per_pixel: DRAG_DEGREES_PER_PIXEL,
            camera_step: CAMERA_STEP,
        }
    }
}

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    pub last_pointer: Vec2,
}

/// Camera movement bound to a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyBinding {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Back,
}

impl KeyBinding {
    #[inline]
    pub fn for_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(KeyBinding::Up),
            "ArrowDown" => Some(KeyBinding::Down),
            "ArrowLeft" => Some(KeyBinding::Left),
            "ArrowRight" => Some(KeyBinding::Right),
            "w" => Some(KeyBinding::Forward),
            "s" => Some(KeyBinding::Back),
            _ => None,
        }
    }

    /// Unit camera offset for this binding.
    #[inline]
    pub fn direction(self) -> Vec3 {
        match self {
            KeyBinding::Up => Vec3::Y,
            KeyBinding::Down => Vec3::NEG_Y,
            KeyBinding::Left => Vec3::NEG_X,
            KeyBinding::Right => Vec3::X,
            KeyBinding::Forward => Vec3::NEG_Z,
            KeyBinding::Back => Vec3::Z,
        }
    }
}

/// Incremental rotation for a pointer delta: vertical travel pitches about X,
/// horizontal travel yaws about Y.
#[inline]
pub fn drag_rotation(delta: Vec2, degrees_per_pixel: f32) -> Quat {
    euler_xyz(Vec3::new(
        (delta.y * degrees_per_pixel).to_radians(),
        (delta.x * degrees_per_pixel).to_radians(),
        0.0,
    ))
}

/// Turns pointer drags into light rotation and key presses into camera steps.
#[derive(Clone, Debug, Default)]
pub struct InputTracker {
    params: InputParams,
    drag: DragState,
}

impl InputTracker {
    pub fn new(params: InputParams) -> Self {
        Self {
            params,
            drag: DragState::default(),
        }
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.dragging
    }

    /// Begin a drag anchored at the press position, so the first move rotates
    /// by the distance travelled since the press.
    pub fn pointer_down(&mut self, pointer: Vec2) {
        self.drag = DragState {
            dragging: true,
            last_pointer: pointer,
        };
        log::debug!("[drag] begin at ({:.0},{:.0})", pointer.x, pointer.y);
    }

    /// Rotate `light` about the origin by the pointer travel since the last
    /// event. Returns whether the light moved.
    pub fn pointer_move(&mut self, pointer: Vec2, light: &mut Vec3) -> bool {
        if !self.drag.dragging {
            return false;
        }
        let delta = pointer - self.drag.last_pointer;
        *light = drag_rotation(delta, self.params.degrees_per_pixel) * *light;
        self.drag.last_pointer = pointer;
        true
    }

    pub fn pointer_up(&mut self) {
        self.end_drag("release");
    }

    pub fn pointer_leave(&mut self) {
        self.end_drag("leave");
    }

    fn end_drag(&mut self, why: &str) {
        if self.drag.dragging {
            log::debug!("[drag] end on {}", why);
        }
        self.drag.dragging = false;
    }

    /// Step `camera` for a bound key. Returns whether the key was recognized.
    pub fn key_down(&self, key: &str, camera: &mut Vec3) -> bool {
        match KeyBinding::for_key(key) {
            Some(binding) => {
                *camera += binding.direction() * self.params.camera_step;
                log::debug!("[keys] {:?} -> camera {:?}", binding, camera);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_lookup_covers_six_bindings() {
        let keys = ["ArrowUp", "ArrowDown", "ArrowLeft", "ArrowRight", "w", "s"];
        assert!(keys.iter().all(|k| KeyBinding::for_key(k).is_some()));
        assert_eq!(KeyBinding::for_key("a"), None);
        assert_eq!(KeyBinding::for_key("Enter"), None);
        assert_eq!(KeyBinding::for_key(""), None);
    }

    #[test]
    fn key_lookup_is_case_sensitive() {
        assert_eq!(KeyBinding::for_key("W"), None);
        assert_eq!(KeyBinding::for_key("S"), None);
        assert_eq!(KeyBinding::for_key("arrowup"), None);
    }

    #[test]
    fn opposite_bindings_cancel() {
        let pairs = [
            (KeyBinding::Up, KeyBinding::Down),
            (KeyBinding::Left, KeyBinding::Right),
            (KeyBinding::Forward, KeyBinding::Back),
        ];
        for (a, b) in pairs {
            assert_eq!(a.direction() + b.direction(), Vec3::ZERO);
        }
    }
}
