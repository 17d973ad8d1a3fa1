use glam::Vec3;

// Shared scene and motion tuning constants.

// Motion (per frame, no delta-time scaling)
pub const MAIN_ROTOR_SPEED: f32 = 0.2; // rad/frame about the rotor's Y axis
pub const TAIL_ROTOR_SPEED: f32 = 0.5; // rad/frame about the rotor's Z axis
pub const HELICOPTER_SPEED: f64 = 0.02; // units/frame along +X

// Input
pub const DRAG_DEGREES_PER_PIXEL: f32 = 1.0;
pub const CAMERA_STEP: f32 = 1.0;

// Camera
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 5.0, 15.0);
pub const CAMERA_FOV_Y_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;

// Lights
pub const AMBIENT_INTENSITY: f32 = 0.8;
pub const SUN_INTENSITY: f32 = 1.0;
pub const SUN_START: Vec3 = Vec3::new(10.0, 10.0, 10.0);
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];

// Helicopter layout
pub const HELICOPTER_START: Vec3 = Vec3::new(0.0, 2.0, 0.0);
pub const FUSELAGE_RADIUS: f32 = 1.0;
pub const FUSELAGE_LENGTH: f32 = 6.0;
pub const COCKPIT_RADIUS: f32 = 1.0;
pub const COCKPIT_OFFSET: Vec3 = Vec3::new(2.5, 0.0, 0.0);
pub const MAIN_ROTOR_SIZE: [f32; 3] = [10.0, 0.1, 0.5];
pub const MAIN_ROTOR_HEIGHT: f32 = 1.2;
pub const TAIL_BOOM_RADIUS: f32 = 0.2;
pub const TAIL_BOOM_LENGTH: f32 = 8.0;
pub const TAIL_BOOM_OFFSET: Vec3 = Vec3::new(-5.0, 0.0, 0.0);
pub const TAIL_ROTOR_SIZE: [f32; 3] = [2.0, 0.1, 0.3];
pub const TAIL_ROTOR_OFFSET: Vec3 = Vec3::new(-9.0, 0.0, 0.0);
pub const SKID_SIZE: [f32; 3] = [0.1, 0.1, 4.0];
pub const SKID_HEIGHT: f32 = -1.1;
pub const SKID_CONNECTOR_SIZE: [f32; 3] = [0.1, 1.0, 0.1];
pub const SKID_CONNECTOR_HEIGHT: f32 = -0.6;
pub const SKID_SPAN_Z: f32 = 1.5; // skids sit at ±this on Z
pub const SKID_CONNECTOR_XS: [f32; 2] = [0.0, 2.0];

// Tessellation
pub const ROUND_SEGMENTS: u32 = 32;
pub const SKY_WIDTH_SEGMENTS: u32 = 60;
pub const SKY_HEIGHT_SEGMENTS: u32 = 40;

// Environment
pub const GROUND_SIZE: f32 = 100.0;
pub const GROUND_HEIGHT: f32 = -2.0;
pub const SKY_RADIUS: f32 = 500.0;
