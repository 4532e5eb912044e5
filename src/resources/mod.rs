//! Loading of files the renderer consumes at start-up.
//!
//! Paths are used as given, so relative paths resolve against the working
//! directory of the process.

use std::path::Path;

use anyhow::Context as _;

use crate::data_structures::texture::Texture;

/// Read a whole text file, e.g. shader source.
pub fn load_string(path: &Path) -> std::io::Result<String> {
    let txt = std::fs::read_to_string(path)?;
    log::debug!("read {} bytes from {}", txt.len(), path.display());
    Ok(txt)
}

pub fn load_binary(path: &Path) -> std::io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Decode an image file (PNG or JPEG) and upload it as a texture.
pub fn load_texture(
    path: &Path,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<Texture> {
    let data = load_binary(path).with_context(|| format!("read texture {}", path.display()))?;
    let img = image::load_from_memory(&data)
        .with_context(|| format!("decode texture {}", path.display()))?;
    let label = path.display().to_string();
    Texture::from_image(device, queue, &img, Some(&label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_shipped_shader_source() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/shaders/shader.vert.wgsl");
        let txt = load_string(&path).unwrap();
        assert!(txt.contains("vs_main"));
    }

    #[test]
    fn missing_file_keeps_io_error_kind() {
        let err = load_string(Path::new("no/such/file.wgsl")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
