//! GPU textures and texture creation utilities.
//!
//! This module provides [`Texture`], a wrapper around WGPU texture resources,
//! with helpers for the depth buffer, for uploading decoded images and for
//! generating the block atlas when no image is configured.

use anyhow::*;
use image::{GenericImageView, RgbaImage};

use crate::data_structures::block::{ATLAS_TILES, BlockId, TILE_SIZE};

/// A GPU texture with a view and optional sampler.
#[derive(Clone, Debug)]
pub struct Texture {
    #[allow(unused)]
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: Option<wgpu::Sampler>,
}

impl Texture {
    /// Standard depth buffer texture format (32-bit float).
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Create a depth texture for depth-testing during rendering.
    ///
    /// # Arguments
    ///
    /// * `size` is [width, height] of the texture in pixels
    /// * `label` is used as a debug label for the GPU resource
    pub fn create_depth_texture(device: &wgpu::Device, size: [u32; 2], label: &str) -> Self {
        let size = wgpu::Extent3d {
            width: size[0].max(1),
            height: size[1].max(1),
            depth_or_array_layers: 1,
        };
        let desc = wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[Self::DEPTH_FORMAT],
        };
        let texture = device.create_texture(&desc);
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            texture,
            view,
            sampler: None,
        }
    }

    /// Generate the block atlas from the colours in the block registry.
    ///
    /// Each tile gets a two-tone checker of its block colour so faces stay
    /// distinguishable without any image on disk.
    pub fn block_atlas(device: &wgpu::Device, queue: &wgpu::Queue) -> Result<Self> {
        let img = image::DynamicImage::ImageRgba8(atlas_image());
        Self::from_image(device, queue, &img, Some("block atlas"))
    }

    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
    ) -> Result<Self> {
        let dimensions = img.dimensions();
        if dimensions.0 == 0 || dimensions.1 == 0 {
            bail!("texture {:?} has no pixels", label);
        }
        let rgba = img.to_rgba8();

        let size = wgpu::Extent3d {
            width: dimensions.0,
            height: dimensions.1,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * dimensions.0),
                rows_per_image: Some(dimensions.1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = Some(create_pixel_sampler(device));

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }
}

/// Nearest-neighbour sampling keeps the block pixels crisp.
pub fn create_pixel_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

pub fn atlas_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
        label: Some("atlas_bind_group_layout"),
    })
}

pub fn atlas_bind_group(
    device: &wgpu::Device,
    atlas: &Texture,
    layout: &wgpu::BindGroupLayout,
) -> wgpu::BindGroup {
    // only the depth texture comes without a sampler
    let fallback;
    let sampler = match &atlas.sampler {
        Some(sampler) => sampler,
        None => {
            fallback = create_pixel_sampler(device);
            &fallback
        }
    };
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&atlas.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
        label: Some("atlas_bind_group"),
    })
}

/// CPU side of [`Texture::block_atlas`].
pub fn atlas_image() -> RgbaImage {
    let edge = ATLAS_TILES * TILE_SIZE;
    let mut tiles = [[0u8, 0, 0, 0]; (ATLAS_TILES * ATLAS_TILES) as usize];
    // Air shares its tile with grass, so painting solid blocks last wins.
    for id in BlockId::ALL {
        let props = id.properties();
        if props.transparent {
            continue;
        }
        tiles[(props.atlas[1] * ATLAS_TILES + props.atlas[0]) as usize] = props.colour;
    }
    RgbaImage::from_fn(edge, edge, |x, y| {
        let [r, g, b, a] = tiles[((y / TILE_SIZE) * ATLAS_TILES + x / TILE_SIZE) as usize];
        let shade = if (x / 4 + y / 4) % 2 == 0 { 1.0 } else { 0.85 };
        let scale = |c: u8| (c as f32 * shade).round() as u8;
        image::Rgba([scale(r), scale(g), scale(b), a])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atlas_tiles_carry_block_colours() {
        let img = atlas_image();
        assert_eq!(img.dimensions(), (ATLAS_TILES * TILE_SIZE, ATLAS_TILES * TILE_SIZE));
        for id in [BlockId::Grass, BlockId::Dirt, BlockId::Stone] {
            let props = id.properties();
            let pixel = img.get_pixel(props.atlas[0] * TILE_SIZE, props.atlas[1] * TILE_SIZE);
            assert_eq!(pixel.0, props.colour, "{}", props.name);
        }
    }

    #[test]
    fn unused_tiles_are_transparent() {
        let img = atlas_image();
        let edge = ATLAS_TILES * TILE_SIZE;
        let pixel = img.get_pixel(edge - 1, edge - 1);
        assert_eq!(pixel.0[3], 0);
    }
}
