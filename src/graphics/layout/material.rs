use bytemuck::{Pod, Zeroable};
use static_assertions::{assert_eq_size, const_assert_eq};

use crate::gpu_layout;

/// Physically based material parameters, grouped four floats to a row.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MaterialLayout {
    pub base_color: [f32; 3],
    pub alpha: f32,

    pub roughness: f32,
    pub metallic: f32,
    pub specular: f32,
    pub ior: f32,

    pub emission: f32,
    pub coat_ior: f32,
    pub coat_thickness: f32,
    pub coat_roughness: f32,

    pub anisotropic: f32,
    pub anisotropic_rotation: f32,
    pub sheen: f32,
    pub sheen_tint: f32,

    pub transmission: f32,
    pub transmission_roughness: f32,
    pub subsurface: f32,
    pub subsurface_radius: f32,

    pub subsurface_color: [f32; 3],
    pub padding: f32,
}

gpu_layout!(MaterialLayout {
    base_color: [f32; 3],
    alpha: f32,
    roughness: f32,
    metallic: f32,
    specular: f32,
    ior: f32,
    emission: f32,
    coat_ior: f32,
    coat_thickness: f32,
    coat_roughness: f32,
    anisotropic: f32,
    anisotropic_rotation: f32,
    sheen: f32,
    sheen_tint: f32,
    transmission: f32,
    transmission_roughness: f32,
    subsurface: f32,
    subsurface_radius: f32,
    subsurface_color: [f32; 3],
    padding: f32,
});

assert_eq_size!(MaterialLayout, [u8; 96]);
const_assert_eq!(core::mem::offset_of!(MaterialLayout, alpha), 12);
const_assert_eq!(core::mem::offset_of!(MaterialLayout, subsurface_color), 80);
const_assert_eq!(core::mem::offset_of!(MaterialLayout, padding), 92);
