pub mod app;
pub mod assembly;
pub mod constants;
pub mod error;
pub mod frame;
pub mod input;
pub mod mesh;
pub mod scene;
pub mod state;
pub mod transform;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use app::AppState;
pub use assembly::{build_scene, SceneHandles};
pub use error::CoreError;
pub use frame::{FrameDriver, FrameScheduler, LoopPhase, MotionParams, MotionState, SceneRenderer};
pub use input::{InputParams, InputTracker, KeyBinding};
pub use mesh::{MeshData, Shape, Vertex};
pub use scene::{Material, MeshDesc, NodeId, Scene, Shading, TextureSlot};
pub use state::{Camera, Viewport};
pub use transform::Transform;
