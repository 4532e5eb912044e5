//! Vertex layout and the hard-coded geometry uploaded at start-up.

use wgpu::util::DeviceExt;

use crate::data_structures::block::tile_uv;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A triangle in the `z = 0` plane, facing `+z`, textured with `tile`.
pub fn triangle(tile: [u32; 2]) -> Vec<Vertex> {
    let (min, max) = tile_uv(tile);
    let mid_u = (min[0] + max[0]) / 2.0;
    vec![
        Vertex {
            position: [-0.5, -0.5, 0.0],
            tex_coords: [min[0], max[1]],
        },
        Vertex {
            position: [0.5, -0.5, 0.0],
            tex_coords: [max[0], max[1]],
        },
        Vertex {
            position: [0.0, 0.5, 0.0],
            tex_coords: [mid_u, min[1]],
        },
    ]
}

/// Corners of each face, counter-clockwise when seen from outside, starting
/// bottom-left.
const FACES: [[[f32; 3]; 4]; 6] = [
    // +z
    [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
    // -z
    [[0.5, -0.5, -0.5], [-0.5, -0.5, -0.5], [-0.5, 0.5, -0.5], [0.5, 0.5, -0.5]],
    // +x
    [[0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5]],
    // -x
    [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
    // +y
    [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
    // -y
    [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
];

/// A unit cube centred on the origin as a plain triangle list (36 vertices).
/// Every face shows the full atlas tile `tile`.
pub fn cube(tile: [u32; 2]) -> Vec<Vertex> {
    let (min, max) = tile_uv(tile);
    // texture v grows downwards
    let uvs = [
        [min[0], max[1]],
        [max[0], max[1]],
        [max[0], min[1]],
        [min[0], min[1]],
    ];
    FACES
        .iter()
        .flat_map(|corners| {
            [0, 1, 2, 0, 2, 3].map(|i| Vertex {
                position: corners[i],
                tex_coords: uvs[i],
            })
        })
        .collect()
}

/// Vertex data living on the GPU.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub num_vertices: u32,
}

impl Mesh {
    pub fn new(device: &wgpu::Device, name: &str, vertices: &[Vertex]) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            num_vertices: vertices.len() as u32,
        }
    }

    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.num_vertices, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;

    use super::*;

    type V3 = cgmath::Vector3<f32>;

    fn face_normal(a: &Vertex, b: &Vertex, c: &Vertex) -> V3 {
        let a: V3 = a.position.into();
        let b: V3 = b.position.into();
        let c: V3 = c.position.into();
        (b - a).cross(c - a).normalize()
    }

    #[test]
    fn layout_matches_vertex_struct() {
        let desc = Vertex::desc();
        assert_eq!(desc.array_stride, 20);
        assert_eq!(desc.attributes.len(), 2);
        assert_eq!(desc.attributes[0].shader_location, 0);
        assert_eq!(desc.attributes[0].format, wgpu::VertexFormat::Float32x3);
        assert_eq!(desc.attributes[1].shader_location, 1);
        assert_eq!(desc.attributes[1].offset, 12);
        assert_eq!(desc.attributes[1].format, wgpu::VertexFormat::Float32x2);
    }

    #[test]
    fn triangle_faces_the_default_camera() {
        let vertices = triangle([0, 0]);
        assert_eq!(vertices.len(), 3);
        let normal = face_normal(&vertices[0], &vertices[1], &vertices[2]);
        assert!((normal - V3::unit_z()).magnitude() < 1e-6);
    }

    #[test]
    fn cube_triangles_wind_outwards() {
        let vertices = cube([0, 0]);
        assert_eq!(vertices.len(), 36);
        for tri in vertices.chunks(3) {
            let normal = face_normal(&tri[0], &tri[1], &tri[2]);
            let centre: V3 = (V3::from(tri[0].position)
                + V3::from(tri[1].position)
                + V3::from(tri[2].position))
                / 3.0;
            // counter-clockwise from outside means the normal points away from the origin
            assert!(normal.dot(centre) > 0.0, "{:?}", tri);
        }
    }

    #[test]
    fn cube_samples_only_its_tile() {
        let (min, max) = tile_uv([1, 0]);
        for vertex in cube([1, 0]) {
            let [u, v] = vertex.tex_coords;
            assert!(u >= min[0] && u <= max[0]);
            assert!(v >= min[1] && v <= max[1]);
        }
    }
}
