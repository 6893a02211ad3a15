/// 3D transformation matrices
use nalgebra::{Matrix4, Rotation3, Vector3};

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation about the vertical axis.
    ///
    /// Maps `(x, z)` to `(cos a * x - sin a * z, cos a * z + sin a * x)`,
    /// i.e. positive angles turn +x towards +z.
    pub fn y_rotation_matrix(angle: f32) -> Matrix4<f32> {
        Rotation3::from_axis_angle(&Vector3::y_axis(), -angle).to_homogeneous()
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }
}
