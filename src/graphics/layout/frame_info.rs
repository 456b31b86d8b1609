use bytemuck::{Pod, Zeroable};
use static_assertions::{assert_eq_size, const_assert_eq};

use crate::gpu_layout;

/// Per-frame globals: timing, camera matrices and resolution.
///
/// `prev_view_proj_matrix` is never derived from the other fields. Whoever fills this
/// in has to carry the last frame's `view_proj_matrix` over before overwriting it,
/// see [`FrameInfo`](crate::graphics::scene::frame::FrameInfo).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameInfoLayout {
    pub resolution: [f32; 2],
    pub frame_ctr: u32,
    pub framerate: f32,
    pub time_second: f32,
    pub time_delta: f32,
    _align0: [u32; 2],
    pub proj_matrix: [[f32; 4]; 4],
    pub inv_proj_matrix: [[f32; 4]; 4],
    pub view_matrix: [[f32; 4]; 4],
    pub inv_view_matrix: [[f32; 4]; 4],
    pub view_proj_matrix: [[f32; 4]; 4],
    pub inv_view_proj_matrix: [[f32; 4]; 4],
    pub prev_view_proj_matrix: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub camera_near: f32,
    pub camera_far: f32,
    _tail: [u32; 3],
}

gpu_layout!(FrameInfoLayout {
    resolution: [f32; 2],
    frame_ctr: u32,
    framerate: f32,
    time_second: f32,
    time_delta: f32,
    proj_matrix: [[f32; 4]; 4],
    inv_proj_matrix: [[f32; 4]; 4],
    view_matrix: [[f32; 4]; 4],
    inv_view_matrix: [[f32; 4]; 4],
    view_proj_matrix: [[f32; 4]; 4],
    inv_view_proj_matrix: [[f32; 4]; 4],
    prev_view_proj_matrix: [[f32; 4]; 4],
    camera_pos: [f32; 3],
    camera_near: f32,
    camera_far: f32,
});

assert_eq_size!(FrameInfoLayout, [u8; 512]);
const_assert_eq!(core::mem::offset_of!(FrameInfoLayout, proj_matrix), 32);
const_assert_eq!(core::mem::offset_of!(FrameInfoLayout, prev_view_proj_matrix), 416);
const_assert_eq!(core::mem::offset_of!(FrameInfoLayout, camera_pos), 480);
const_assert_eq!(core::mem::offset_of!(FrameInfoLayout, camera_far), 496);

const IDENTITY: [[f32; 4]; 4] = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

impl FrameInfoLayout {
    /// Frame info for the given resolution, with every matrix set to identity.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            resolution: [width, height],
            proj_matrix: IDENTITY,
            inv_proj_matrix: IDENTITY,
            view_matrix: IDENTITY,
            inv_view_matrix: IDENTITY,
            view_proj_matrix: IDENTITY,
            inv_view_proj_matrix: IDENTITY,
            prev_view_proj_matrix: IDENTITY,
            ..Self::zeroed()
        }
    }
}
