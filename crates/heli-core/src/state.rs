//! Camera and viewport state shared by the core and the web frontend.
//!
//! These types avoid platform-specific APIs so the update logic can be
//! exercised on the host.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_Y_DEGREES, CAMERA_NEAR, CAMERA_START};
use crate::error::CoreError;
use glam::{Mat4, Vec3};

/// Right-handed perspective camera looking down its local -Z axis.
///
/// Only the position changes at runtime; the orientation stays fixed.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: CAMERA_START,
            fov_y_degrees: CAMERA_FOV_Y_DEGREES,
            aspect,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Size of the output surface in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    pixel_ratio: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyViewport { width, height });
        }
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Ok(Self {
            width,
            height,
            pixel_ratio,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Backing-store size in physical pixels, never zero.
    pub fn surface_size(&self) -> (u32, u32) {
        let w = (self.width as f32 * self.pixel_ratio).round() as u32;
        let h = (self.height as f32 * self.pixel_ratio).round() as u32;
        (w.max(1), h.max(1))
    }
}
