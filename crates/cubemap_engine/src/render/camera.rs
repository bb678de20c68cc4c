//! # Camera
//!
//! Look-at perspective camera. It feeds the view/projection uniforms of a GPU
//! backend and generates primary rays for the CPU preview.
//!
//! ## Coordinate System
//! Right-handed, Y-up. The camera looks along `target - position`.

use crate::foundation::math::{utils, Mat4, Point3, Vec3};

/// Ray in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parameter `t`
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// 3D perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,

    /// Point the camera is looking at in world space
    pub target: Vec3,

    /// Up vector for camera orientation (typically [0, 1, 0])
    pub up: Vec3,

    /// Vertical field of view in radians
    pub fov: f32,

    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,
}

impl Camera {
    /// Create a perspective camera looking at the origin with Y up
    ///
    /// # Arguments
    /// * `position` - Camera position in world space
    /// * `fov_degrees` - Vertical field of view in degrees
    /// * `aspect` - Aspect ratio (width / height) of the viewport
    /// * `near` - Distance to near clipping plane (must be > 0)
    /// * `far` - Distance to far clipping plane (must be > near)
    pub fn perspective(position: Vec3, fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position,
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov: utils::deg_to_rad(fov_degrees),
            aspect,
            near,
            far,
        }
    }

    /// Set where the camera looks
    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        log::trace!("Camera target updated to: {:?}", target);
    }

    /// Orbit the camera around its target about the world Y axis
    ///
    /// Distance to the target and height above it are preserved.
    pub fn orbit(&mut self, yaw_radians: f32) {
        let offset = self.position - self.target;
        let (sin, cos) = yaw_radians.sin_cos();
        let rotated = Vec3::new(
            offset.x * cos + offset.z * sin,
            offset.y,
            -offset.x * sin + offset.z * cos,
        );
        self.position = self.target + rotated;
        log::trace!("Camera orbited to: {:?}", self.position);
    }

    /// Orthonormal camera basis: (right, up, forward)
    ///
    /// Falls back to world Z as the reference when looking straight along `up`.
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0));
        let right = forward
            .cross(&self.up)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| forward.cross(&Vec3::z()).normalize());
        let up = right.cross(&forward);
        (right, up, forward)
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(
            &Point3::from(self.position),
            &Point3::from(self.target),
            &self.up,
        )
    }

    /// Perspective projection (OpenGL clip conventions)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Combined projection × view
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray through a point in normalized device coordinates
    ///
    /// `ndc_x` runs -1 (left) to 1 (right), `ndc_y` runs -1 (bottom) to 1 (top).
    pub fn ndc_ray(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let (right, up, forward) = self.basis();
        let half_height = (self.fov * 0.5).tan();
        let half_width = half_height * self.aspect;
        Ray::new(
            self.position,
            forward + right * (ndc_x * half_width) + up * (ndc_y * half_height),
        )
    }

    /// Ray through the center of pixel `(x, y)` of a `width × height` image
    ///
    /// Row 0 is the top of the image.
    pub fn pixel_ray(&self, x: u32, y: u32, width: u32, height: u32) -> Ray {
        let ndc_x = ((x as f32 + 0.5) / width as f32).mul_add(2.0, -1.0);
        let ndc_y = 1.0 - (y as f32 + 0.5) / height as f32 * 2.0;
        self.ndc_ray(ndc_x, ndc_y)
    }
}

impl Default for Camera {
    /// Camera of the reference scene: at (3, 3, 1) looking at the origin
    fn default() -> Self {
        Self::perspective(Vec3::new(3.0, 3.0, 1.0), 60.0, 4.0 / 3.0, 0.1, 100.0)
    }
}
