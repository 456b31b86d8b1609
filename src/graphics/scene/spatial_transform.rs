use cgmath::{ElementWise, Matrix4, One, Quaternion, Rad, Rotation3, Vector3};

use crate::graphics::layout::ModelLayout;

/// Represents the spatial data for a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialTransform {
    pub scale: Vector3<f32>,
    pub position: Vector3<f32>,
    pub rotation: Quaternion<f32>,
}

impl SpatialTransform {
    /// Get the identity transform (ie doesn't do anything).
    pub fn identity() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Quaternion::one(),
        }
    }

    /// Build a transform from euler angles (in radians), applied around X, then Y, then Z.
    pub fn from_euler(position: Vector3<f32>, rotation: Vector3<f32>, scale: Vector3<f32>) -> Self {
        let rotation = Quaternion::from_angle_z(Rad(rotation.z))
            * Quaternion::from_angle_y(Rad(rotation.y))
            * Quaternion::from_angle_x(Rad(rotation.x));
        Self {
            scale,
            position,
            rotation,
        }
    }

    /// Get the model matrix, ie. translation * rotation * scale.
    pub fn to_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from(self.rotation)
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Get the shader data for this transform.
    pub fn to_layout(&self) -> ModelLayout {
        ModelLayout::from_model_matrix(self.to_matrix())
    }

    /// Combines this transform with a child transform.
    /// Returns the resulting overall transform of the child.
    pub fn combine(&self, child: &SpatialTransform) -> SpatialTransform {
        let scaled_position = self.scale.mul_element_wise(child.position);
        let combined_scale = self.scale.mul_element_wise(child.scale);

        let rotated_position = self.rotation * scaled_position;
        let final_position = self.position + rotated_position;
        let combined_rotation = self.rotation * child.rotation;

        SpatialTransform {
            scale: combined_scale,
            position: final_position,
            rotation: combined_rotation,
        }
    }
}

impl Default for SpatialTransform {
    fn default() -> Self {
        Self::identity()
    }
}
