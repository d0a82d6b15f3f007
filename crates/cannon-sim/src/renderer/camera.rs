use glam::{Mat4, Vec2};

/// Fixed orthographic camera for a Y-down 2D world.
///
/// A `size` rectangle of world units centred on `center` is stretched over
/// the whole window. The default view shows the 100×100 playfield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    /// Visible area in world units.
    pub size: Vec2,
    /// Camera center position in world space.
    pub center: Vec2,
    /// Window size in pixels.
    pub viewport: Vec2,
}

impl Camera2D {
    pub fn new(size: Vec2, center: Vec2, viewport: Vec2) -> Self {
        Self {
            size,
            center,
            viewport,
        }
    }

    /// Top-left corner of the view in world space.
    pub fn origin(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    /// Map a window pixel (origin top-left) to world coordinates.
    pub fn pixel_to_world(&self, pixel: Vec2) -> Vec2 {
        self.origin() + pixel / self.viewport * self.size
    }

    /// Inverse of [`pixel_to_world`](Self::pixel_to_world).
    pub fn world_to_pixel(&self, world: Vec2) -> Vec2 {
        (world - self.origin()) / self.size * self.viewport
    }

    /// Build an orthographic projection matrix.
    /// Top edge of the view maps to +1 in clip space, Z in [0, 1].
    pub fn projection_matrix(&self) -> Mat4 {
        let origin = self.origin();
        let far = origin + self.size;
        Mat4::orthographic_rh(origin.x, far.x, far.y, origin.y, 0.0, 1.0)
    }

    /// Update the window size (e.g. on resize). The world view is unchanged.
    pub fn resize(&mut self, viewport: Vec2) {
        self.viewport = viewport;
    }
}
