//! Start-up configuration.
//!
//! Every value has a hard-coded default. Callers that need something else
//! build a [`Config`] with struct update syntax:
//!
//! ```no_run
//! use block_ngin::config::{Config, Geometry};
//!
//! let config = Config {
//!     geometry: Geometry::Triangle,
//!     ..Default::default()
//! };
//! ```

use std::path::PathBuf;

use instant::Duration;

pub const WINDOW_TITLE: &str = "Minecraft-Clone";
pub const SCR_WIDTH: u32 = 800;
pub const SCR_HEIGHT: u32 = 600;
pub const VERTEX_SHADER_PATH: &str = "assets/shaders/shader.vert.wgsl";
pub const FRAGMENT_SHADER_PATH: &str = "assets/shaders/shader.frag.wgsl";

/// Static geometry drawn every frame after clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Geometry {
    /// Clear colour and depth only.
    None,
    Triangle,
    #[default]
    Cube,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    /// Logical window size in pixels.
    pub size: [u32; 2],
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    /// Image used as block atlas. A procedural atlas is generated when unset.
    pub texture: Option<PathBuf>,
    pub clear_colour: wgpu::Color,
    pub geometry: Geometry,
    pub vsync: bool,
    /// Hide the cursor and confine it to the window for mouse look.
    pub capture_cursor: bool,
    pub tick_duration: Duration,
    /// Leave the loop after this many frames. Used by headless runs.
    pub exit_after_frames: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: WINDOW_TITLE.to_string(),
            size: [SCR_WIDTH, SCR_HEIGHT],
            vertex_shader: PathBuf::from(VERTEX_SHADER_PATH),
            fragment_shader: PathBuf::from(FRAGMENT_SHADER_PATH),
            texture: None,
            clear_colour: wgpu::Color {
                r: 0.5,
                g: 0.8,
                b: 0.9,
                a: 1.0,
            },
            geometry: Geometry::default(),
            vsync: true,
            capture_cursor: true,
            // 20 ticks per second
            tick_duration: Duration::from_millis(50),
            exit_after_frames: None,
        }
    }
}

impl Config {
    pub fn present_mode(&self) -> wgpu::PresentMode {
        if self.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_shipped_assets() {
        let config = Config::default();
        assert_eq!(config.title, "Minecraft-Clone");
        assert_eq!(config.size, [800, 600]);
        assert!(config.vertex_shader.ends_with("shader.vert.wgsl"));
        assert!(config.fragment_shader.ends_with("shader.frag.wgsl"));
        assert_eq!(config.geometry, Geometry::Cube);
        assert_eq!(config.exit_after_frames, None);
    }

    #[test]
    fn vsync_selects_present_mode() {
        let mut config = Config::default();
        assert_eq!(config.present_mode(), wgpu::PresentMode::AutoVsync);
        config.vsync = false;
        assert_eq!(config.present_mode(), wgpu::PresentMode::AutoNoVsync);
    }
}
