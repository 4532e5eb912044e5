//! block-ngin
//!
//! A small wgpu renderer shell for a block game. It opens a window, builds a
//! shader program from a vertex/fragment pair of WGSL files and runs a
//! fixed-timestep loop that clears the screen and draws a textured block
//! until the window is closed or Escape is pressed.
//!
//! High-level modules
//! - `camera`: fly camera, its controller and the view/projection uniform
//! - `clock`: frame clock with a fixed tick accumulator
//! - `config`: start-up settings and their defaults
//! - `context`: GPU device, surface and camera resources of the window
//! - `data_structures`: block registry, meshes and textures
//! - `pipelines`: render pipeline construction
//! - `resources`: reading files from disk
//! - `shader`: reading, compiling and linking shader programs
//! - `window`: the event loop driving everything above
//!

pub mod camera;
pub mod clock;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod pipelines;
pub mod resources;
pub mod shader;
pub mod window;

// Re-exports commonly used types for convenience in downstream code.
pub use config::{Config, Geometry};
pub use shader::{Shader, ShaderError, ShaderProgram, ShaderStage};
pub use window::{LoopStats, run};
