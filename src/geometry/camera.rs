use nalgebra::{Matrix4, Vector3};

/// Perspective camera.
///
/// The view and projection matrices are cached; changing any public parameter
/// requires calling the matching `update_*` method before the next frame.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vector3<f32>,
    /// Point the camera looks at
    pub target: Vector3<f32>,
    /// Approximate up direction, orthonormalized when the view matrix is built
    pub up: Vector3<f32>,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near_plane: f32,
    pub far_plane: f32,

    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
    degenerate: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(
            Vector3::new(0.0, 0.0, 150.0),
            Vector3::zeros(),
            Vector3::y(),
            10.0,
            4.0 / 3.0,
            1.0,
            10000.0,
        )
    }
}

impl Camera {
    pub fn new(
        position: Vector3<f32>,
        target: Vector3<f32>,
        up: Vector3<f32>,
        fov_degrees: f32,
        aspect_ratio: f32,
        near_plane: f32,
        far_plane: f32,
    ) -> Self {
        let mut camera = Camera {
            position,
            target,
            up,
            fov: fov_degrees.to_radians(),
            aspect_ratio,
            near_plane,
            far_plane,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
            degenerate: false,
        };
        // A degenerate basis is already logged and recorded by the update.
        let _ = camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }

    /// Rebuilds the look-at matrix from position/target/up.
    ///
    /// On a degenerate basis (target at the eye, or up parallel to the view
    /// direction) the previous matrix is kept and the camera is flagged.
    pub fn update_view_matrix(&mut self) -> Result<(), String> {
        let basis = (self.target - self.position)
            .try_normalize(1e-8)
            .and_then(|forward| {
                forward
                    .cross(&self.up)
                    .try_normalize(1e-8)
                    .map(|right| (forward, right))
            });

        let Some((forward, right)) = basis else {
            self.degenerate = true;
            let message = format!(
                "degenerate camera basis: position {:?}, target {:?}, up {:?}",
                self.position, self.target, self.up
            );
            log::warn!("{}", message);
            return Err(message);
        };
        let up = right.cross(&forward).normalize();

        self.view_matrix = Matrix4::new(
            right.x, right.y, right.z, -right.dot(&self.position),
            up.x, up.y, up.z, -up.dot(&self.position),
            -forward.x, -forward.y, -forward.z, forward.dot(&self.position),
            0.0, 0.0, 0.0, 1.0,
        );
        self.degenerate = false;
        Ok(())
    }

    /// Right-handed OpenGL-style perspective: view z in [-near, -far] maps to clip z in [-w, w].
    pub fn update_projection_matrix(&mut self) {
        self.projection_matrix = Matrix4::new_perspective(
            self.aspect_ratio,
            self.fov,
            self.near_plane,
            self.far_plane,
        );
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
        self.update_projection_matrix();
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees.to_radians();
        self.update_projection_matrix();
    }

    pub fn view_matrix(&self) -> &Matrix4<f32> {
        &self.view_matrix
    }

    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection_matrix
    }

    /// Global view direction used for backface culling (not normalized).
    pub fn view_direction(&self) -> Vector3<f32> {
        self.target - self.position
    }

    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }
}
