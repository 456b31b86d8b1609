use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix, Matrix4, SquareMatrix};
use static_assertions::assert_eq_size;

use crate::gpu_layout;

/// The per-model transform.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct ModelLayout {
    pub model_matrix: [[f32; 4]; 4],
    /// Inverse transpose of `model_matrix`, for transforming normals.
    pub normal_matrix: [[f32; 4]; 4],
}

gpu_layout!(ModelLayout {
    model_matrix: [[f32; 4]; 4],
    normal_matrix: [[f32; 4]; 4],
});

assert_eq_size!(ModelLayout, [u8; 128]);

impl ModelLayout {
    /// The transform that doesn't do anything.
    pub fn identity() -> Self {
        Self::from_model_matrix(Matrix4::identity())
    }

    /// Build the layout from a model matrix, deriving the normal matrix from it.
    ///
    /// Falls back to an identity normal matrix if `model` can't be inverted.
    pub fn from_model_matrix(model: Matrix4<f32>) -> Self {
        let normal = model
            .transpose()
            .invert()
            .unwrap_or(Matrix4::identity());
        Self {
            model_matrix: model.into(),
            normal_matrix: normal.into(),
        }
    }
}
