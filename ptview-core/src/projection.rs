/// Orthographic projection of rotated vertices onto the pixel grid
use nalgebra::{Matrix4, Point2};

use crate::geometry::{Mesh, Vertex};
use crate::transform::Transform;

/// Fixed model/camera placement constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// Uniform zoom; y is additionally flipped for a top-left origin
    pub scale: f32,
    /// Subtracted from y before scaling
    pub vertical_bias: f32,
    /// Pushes the image down from the viewport center, in pixels
    pub screen_offset: f32,
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self {
            scale: 1.5,
            vertical_bias: 30.0,
            screen_offset: 50.0,
        }
    }
}

/// Maps mesh-local vertices to screen coordinates for a fixed viewport
#[derive(Debug, Clone)]
pub struct Projector {
    params: ProjectionParams,
    width: u32,
    height: u32,
}

impl Projector {
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_params(width, height, ProjectionParams::default())
    }

    pub fn with_params(width: u32, height: u32, params: ProjectionParams) -> Self {
        Self {
            params,
            width,
            height,
        }
    }

    pub fn params(&self) -> &ProjectionParams {
        &self.params
    }

    /// Full mesh-to-screen matrix for one frame.
    ///
    /// Rotate about y, drop by the vertical bias, scale with y flipped, then
    /// move the origin to the (integer) viewport center plus the offset.
    pub fn screen_matrix(&self, angle: f32) -> Matrix4<f32> {
        let p = &self.params;
        let center_x = (self.width / 2) as f32;
        let center_y = (self.height / 2) as f32 + p.screen_offset;

        Transform::translation_matrix(center_x, center_y, 0.0)
            * Transform::scale_matrix(p.scale, -p.scale, 1.0)
            * Transform::translation_matrix(0.0, -p.vertical_bias, 0.0)
            * Transform::y_rotation_matrix(angle)
    }

    /// Project a single vertex
    pub fn project_vertex(&self, vertex: &Vertex, angle: f32) -> Point2<f32> {
        let p = self.screen_matrix(angle).transform_point(&vertex.position);
        Point2::new(p.x, p.y)
    }

    /// Project every vertex of `mesh`, in order. Points may fall outside the
    /// viewport; the rasterizer discards those.
    pub fn project(&self, mesh: &Mesh, angle: f32) -> Vec<Point2<f32>> {
        let mut points = Vec::with_capacity(mesh.len());
        self.project_into(mesh, angle, &mut points);
        points
    }

    /// Like [`Projector::project`], reusing `out`'s allocation across frames
    pub fn project_into(&self, mesh: &Mesh, angle: f32, out: &mut Vec<Point2<f32>>) {
        let matrix = self.screen_matrix(angle);
        out.clear();
        out.extend(mesh.vertices().iter().map(|v| {
            let p = matrix.transform_point(&v.position);
            Point2::new(p.x, p.y)
        }));
    }
}
