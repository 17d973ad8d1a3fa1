/// Browser-side wiring and presentation constants.
///
/// Scene geometry and motion live in `heli_core::constants`; this file only
/// holds what the web host needs to find its page elements and assets.
// Page
pub const CANVAS_ID: &str = "webgl";

// Assets, relative to the page
pub const BODY_TEXTURE_URL: &str = "textures/body.jpg";
pub const ROTOR_TEXTURE_URL: &str = "textures/rotor-texture.jpg";
pub const GROUND_TEXTURE_URL: &str = "textures/ground.jpg";
pub const SKY_TEXTURE_URL: &str = "textures/sky.jpg";
pub const HELICOPTER_SOUND_URL: &str = "sounds/helicopter-sound.mp3";

// Audio
pub const SOUND_VOLUME: f32 = 1.0;

// Rendering
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

// Frame statistics
pub const STATS_INTERVAL_SEC: f32 = 5.0;

// Scene pass sample count (resolved into the swapchain)
pub const MSAA_SAMPLES: u32 = 4;
