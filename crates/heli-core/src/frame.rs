//! Fixed-step frame driver.
//!
//! The host calls [`FrameDriver::tick`] once per display refresh. Each tick
//! schedules the next one before doing any work, advances the animation by
//! exactly one step and renders.

use crate::app::AppState;
use crate::constants::{HELICOPTER_SPEED, MAIN_ROTOR_SPEED, TAIL_ROTOR_SPEED};
use crate::scene::Scene;
use crate::state::Camera;
use std::f32::consts::TAU;

/// Host hook that arranges for `tick` to be called again on the next refresh.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

pub trait SceneRenderer {
    type Error;

    fn render(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionParams {
    pub main_rotor_speed: f32,
    pub tail_rotor_speed: f32,
    pub forward_speed: f64,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            main_rotor_speed: MAIN_ROTOR_SPEED,
            tail_rotor_speed: TAIL_ROTOR_SPEED,
            forward_speed: HELICOPTER_SPEED,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MotionState {
    /// Radians in [0, 2π).
    pub main_rotor_angle: f32,
    /// Radians in [0, 2π).
    pub tail_rotor_angle: f32,
    /// Offset along +X from the start position. Grows without bound.
    pub vehicle_x: f64,
    pub frames: u64,
}

impl MotionState {
    pub fn step(&mut self, params: &MotionParams) {
        self.main_rotor_angle = (self.main_rotor_angle + params.main_rotor_speed).rem_euclid(TAU);
        self.tail_rotor_angle = (self.tail_rotor_angle + params.tail_rotor_speed).rem_euclid(TAU);
        self.vehicle_x += params.forward_speed;
        self.frames += 1;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    /// Nothing requested yet.
    Idle,
    /// Waiting for the host to invoke the next tick.
    Scheduled,
    /// Inside a tick.
    Running,
}

#[derive(Clone, Debug)]
pub struct FrameDriver {
    params: MotionParams,
    phase: LoopPhase,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(MotionParams::default())
    }
}

impl FrameDriver {
    pub fn new(params: MotionParams) -> Self {
        Self {
            params,
            phase: LoopPhase::Idle,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Request the first tick.
    pub fn start<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        scheduler.request_frame();
        self.phase = LoopPhase::Scheduled;
        log::info!("[frame] loop started");
    }

    /// Advance the animation one step without scheduling or rendering.
    pub fn advance(&self, app: &mut AppState) {
        app.motion.step(&self.params);
        app.sync_motion();
    }

    /// One frame: schedule the next tick, advance, render.
    ///
    /// A render error is returned as-is; the next tick has already been
    /// requested by then.
    pub fn tick<S, R>(
        &mut self,
        app: &mut AppState,
        scheduler: &mut S,
        renderer: &mut R,
    ) -> Result<(), R::Error>
    where
        S: FrameScheduler + ?Sized,
        R: SceneRenderer + ?Sized,
    {
        self.phase = LoopPhase::Running;
        scheduler.request_frame();
        self.advance(app);
        let rendered = renderer.render(&app.scene, &app.camera);
        self.phase = LoopPhase::Scheduled;
        rendered
    }
}
