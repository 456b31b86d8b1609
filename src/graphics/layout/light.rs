use bytemuck::{Pod, Zeroable};
use cgmath::{Deg, Rad};
use static_assertions::{assert_eq_size, const_assert_eq};

use crate::gpu_layout;
use crate::graphics::layout::gpu_bool;

/// Header for the light arrays.
///
/// The arrays themselves live in separate storage buffers; shaders trust these counts
/// and read exactly that many records from each.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Pod, Zeroable)]
pub struct LightInfoLayout {
    pub dir_light_count: u32,
    pub point_light_count: u32,
    pub spot_light_count: u32,
    pub area_light_count: u32,
}

gpu_layout!(LightInfoLayout {
    dir_light_count: u32,
    point_light_count: u32,
    spot_light_count: u32,
    area_light_count: u32,
});

assert_eq_size!(LightInfoLayout, [u8; 16]);

/// A light infinitely far away, ie. the sun.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DirLightLayout {
    pub direction: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub cast_shadows: u32,
}

gpu_layout!(DirLightLayout {
    direction: [f32; 3],
    intensity: f32,
    color: [f32; 3],
    cast_shadows: u32,
});

assert_eq_size!(DirLightLayout, [u8; 32]);
const_assert_eq!(core::mem::offset_of!(DirLightLayout, intensity), 12);
const_assert_eq!(core::mem::offset_of!(DirLightLayout, cast_shadows), 28);

impl DirLightLayout {
    pub fn new(direction: [f32; 3], color: [f32; 3], intensity: f32, cast_shadows: bool) -> Self {
        Self {
            direction,
            intensity,
            color,
            cast_shadows: gpu_bool(cast_shadows),
        }
    }
}

impl Default for DirLightLayout {
    /// White light pointing straight down.
    fn default() -> Self {
        Self::new([0.0, -1.0, 0.0], [1.0, 1.0, 1.0], 1.0, false)
    }
}

/// A colored point in space, fading out towards `range`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PointLightLayout {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub cast_shadows: u32,

    pub range: f32,
    pub falloff: f32,
    _pad: u32,
    _tail: u32, // struct size rounds up to 16
}

gpu_layout!(PointLightLayout {
    position: [f32; 3],
    intensity: f32,
    color: [f32; 3],
    cast_shadows: u32,
    range: f32,
    falloff: f32,
    _pad: u32,
});

assert_eq_size!(PointLightLayout, [u8; 48]);
const_assert_eq!(core::mem::offset_of!(PointLightLayout, range), 32);
const_assert_eq!(core::mem::offset_of!(PointLightLayout, _pad), 40);

impl PointLightLayout {
    pub fn new(
        position: [f32; 3],
        color: [f32; 3],
        intensity: f32,
        range: f32,
        falloff: f32,
        cast_shadows: bool,
    ) -> Self {
        Self {
            position,
            intensity,
            color,
            cast_shadows: gpu_bool(cast_shadows),
            range,
            falloff,
            _pad: 0,
            _tail: 0,
        }
    }
}

impl Default for PointLightLayout {
    fn default() -> Self {
        Self::new([0.0, 1.0, 0.0], [1.0, 1.0, 1.0], 1.0, 10.0, 2.0, false)
    }
}

/// A cone of light. Full intensity inside the inner cone, fading out to the outer one.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SpotLightLayout {
    pub position: [f32; 3],
    pub intensity: f32,
    pub color: [f32; 3],
    pub cast_shadows: u32,

    pub direction: [f32; 3],
    pub range: f32,
    pub falloff: f32,
    pub inner_cone_cos: f32,
    pub outer_cone_cos: f32,
    _pad: u32,
}

gpu_layout!(SpotLightLayout {
    position: [f32; 3],
    intensity: f32,
    color: [f32; 3],
    cast_shadows: u32,
    direction: [f32; 3],
    range: f32,
    falloff: f32,
    inner_cone_cos: f32,
    outer_cone_cos: f32,
    _pad: u32,
});

assert_eq_size!(SpotLightLayout, [u8; 64]);
const_assert_eq!(core::mem::offset_of!(SpotLightLayout, direction), 32);
const_assert_eq!(core::mem::offset_of!(SpotLightLayout, range), 44);
const_assert_eq!(core::mem::offset_of!(SpotLightLayout, _pad), 60);

/// Everything needed to build a [`SpotLightLayout`], with cone angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLightDesc {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub color: [f32; 3],
    pub intensity: f32,
    pub range: f32,
    pub falloff: f32,
    pub inner_cone: Deg<f32>,
    pub outer_cone: Deg<f32>,
    pub cast_shadows: bool,
}

impl Default for SpotLightDesc {
    fn default() -> Self {
        Self {
            position: [0.0, 1.0, 0.0],
            direction: [0.0, -1.0, 0.0],
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            range: 10.0,
            falloff: 2.0,
            inner_cone: Deg(20.0),
            outer_cone: Deg(30.0),
            cast_shadows: false,
        }
    }
}

impl SpotLightLayout {
    /// Create a spot light. The cone angles are stored as cosines, which is what the
    /// shader compares against.
    pub fn new(desc: SpotLightDesc) -> Self {
        Self {
            position: desc.position,
            intensity: desc.intensity,
            color: desc.color,
            cast_shadows: gpu_bool(desc.cast_shadows),
            direction: desc.direction,
            range: desc.range,
            falloff: desc.falloff,
            inner_cone_cos: Rad::from(desc.inner_cone).0.cos(),
            outer_cone_cos: Rad::from(desc.outer_cone).0.cos(),
            _pad: 0,
        }
    }
}

impl Default for SpotLightLayout {
    fn default() -> Self {
        Self::new(SpotLightDesc::default())
    }
}
