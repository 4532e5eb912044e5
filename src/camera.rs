//! Free-flying first person camera.
//!
//! The camera is explicit state: a position plus yaw and pitch, from which
//! the front vector is derived. Input never touches that state directly. The
//! [`CameraController`] only records what happened (keys held, mouse and
//! scroll deltas) and applies it once per simulation step via the pure
//! functions [`front`], [`look`] and [`zoom`].

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use winit::{
    event::{ElementState, MouseScrollDelta},
    keyboard::KeyCode,
};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Looking straight up or down would flip the view.
pub const MAX_PITCH: cgmath::Deg<f32> = cgmath::Deg(89.0);
pub const MIN_FOVY: cgmath::Deg<f32> = cgmath::Deg(1.0);
pub const MAX_FOVY: cgmath::Deg<f32> = cgmath::Deg(45.0);
/// World units per second.
pub const DEFAULT_SPEED: f32 = 2.5;
/// Degrees per pixel of mouse motion.
pub const DEFAULT_SENSITIVITY: f32 = 0.07;

/// Unit vector the camera looks along.
pub fn front(yaw: Rad<f32>, pitch: Rad<f32>) -> Vector3<f32> {
    let (sin_yaw, cos_yaw) = yaw.0.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.0.sin_cos();
    Vector3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize()
}

/// Apply a mouse delta in pixels to yaw and pitch.
///
/// Screen y grows downwards, so moving the mouse up raises the pitch.
pub fn look(
    yaw: Rad<f32>,
    pitch: Rad<f32>,
    dx: f32,
    dy: f32,
    sensitivity: f32,
) -> (Rad<f32>, Rad<f32>) {
    let yaw = yaw + Rad::from(cgmath::Deg(dx * sensitivity));
    let pitch = pitch - Rad::from(cgmath::Deg(dy * sensitivity));
    let max = Rad::from(MAX_PITCH);
    let pitch = Rad(pitch.0.clamp(-max.0, max.0));
    (yaw, pitch)
}

/// Narrow (positive `scroll`) or widen the field of view.
pub fn zoom(fovy: Rad<f32>, scroll: f32) -> Rad<f32> {
    let fovy = cgmath::Deg::from(fovy).0 - scroll;
    Rad::from(cgmath::Deg(fovy.clamp(MIN_FOVY.0, MAX_FOVY.0)))
}

#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    pub fn front(&self) -> Vector3<f32> {
        front(self.yaw, self.pitch)
    }

    /// Horizontal unit vector to the right of the view direction.
    pub fn right(&self) -> Vector3<f32> {
        self.front().cross(Vector3::unit_y()).normalize()
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.front(), Vector3::unit_y())
    }
}

impl Default for Camera {
    /// Three units in front of the origin, looking down `-z`.
    fn default() -> Self {
        Self::new((0.0, 0.0, 3.0), cgmath::Deg(-90.0), cgmath::Deg(0.0))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Projection {
    aspect: f32,
    pub fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height.max(1) as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Pending input, consumed by [`CameraController::update_camera`] and
/// [`CameraController::update_view`].
#[derive(Debug, Default)]
pub struct CameraController {
    amount_forward: f32,
    amount_backward: f32,
    amount_left: f32,
    amount_right: f32,
    amount_up: f32,
    amount_down: f32,
    rotate_horizontal: f32,
    rotate_vertical: f32,
    scroll: f32,
    speed: f32,
    sensitivity: f32,
}

impl CameraController {
    pub fn new(speed: f32, sensitivity: f32) -> Self {
        Self {
            speed,
            sensitivity,
            ..Default::default()
        }
    }

    /// Returns whether the key is a movement key.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let amount = if state.is_pressed() { 1.0 } else { 0.0 };
        match key {
            KeyCode::KeyW | KeyCode::ArrowUp => self.amount_forward = amount,
            KeyCode::KeyS | KeyCode::ArrowDown => self.amount_backward = amount,
            KeyCode::KeyA | KeyCode::ArrowLeft => self.amount_left = amount,
            KeyCode::KeyD | KeyCode::ArrowRight => self.amount_right = amount,
            KeyCode::Space => self.amount_up = amount,
            KeyCode::ShiftLeft => self.amount_down = amount,
            _ => return false,
        }
        true
    }

    /// Mouse motion accumulates until the next update.
    pub fn process_mouse(&mut self, dx: f64, dy: f64) {
        self.rotate_horizontal += dx as f32;
        self.rotate_vertical += dy as f32;
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, lines) => *lines,
            // roughly one line per 20 pixels
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
        };
    }

    /// Fixed-step movement along the current view direction.
    pub fn update_camera(&mut self, camera: &mut Camera, dt: instant::Duration) {
        let step = self.speed * dt.as_secs_f32();

        let front = camera.front();
        let right = camera.right();
        camera.position += front * (self.amount_forward - self.amount_backward) * step;
        camera.position += right * (self.amount_right - self.amount_left) * step;
        camera.position += Vector3::unit_y() * (self.amount_up - self.amount_down) * step;
    }

    /// Apply mouse look and zoom gathered since the last frame.
    pub fn update_view(&mut self, camera: &mut Camera, projection: &mut Projection) {
        let (yaw, pitch) = look(
            camera.yaw,
            camera.pitch,
            self.rotate_horizontal,
            self.rotate_vertical,
            self.sensitivity,
        );
        camera.yaw = yaw;
        camera.pitch = pitch;
        self.rotate_horizontal = 0.0;
        self.rotate_vertical = 0.0;

        projection.fovy = zoom(projection.fovy, self.scroll);
        self.scroll = 0.0;
    }
}

/// `current` moved back towards `previous` by the part of a tick not yet simulated.
pub fn interpolate(previous: Point3<f32>, current: &Camera, alpha: f32) -> Camera {
    Camera {
        position: previous + (current.position - previous) * alpha.clamp(0.0, 1.0),
        ..*current
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera state together with the GPU objects that feed it to shaders.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: CameraController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}
