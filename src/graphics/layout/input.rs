use bytemuck::{Pod, Zeroable};
use static_assertions::{assert_eq_size, const_assert_eq};

use crate::gpu_layout;

/// Touch and motion input, for shaders that react to the user directly.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InputLayout {
    pub tap_pos1: [f32; 2],
    pub tap_vel1: [f32; 2],
    pub tap_pos2: [f32; 2],
    pub tap_vel2: [f32; 2],
    pub active_tap: u32,
    _align0: [u32; 3], // `vec3` starts on a 16 byte boundary
    pub gyro_data: [f32; 3],
    _tail: u32,
}

gpu_layout!(InputLayout {
    tap_pos1: [f32; 2],
    tap_vel1: [f32; 2],
    tap_pos2: [f32; 2],
    tap_vel2: [f32; 2],
    active_tap: u32,
    gyro_data: [f32; 3],
});

assert_eq_size!(InputLayout, [u8; 64]);
const_assert_eq!(core::mem::offset_of!(InputLayout, active_tap), 32);
const_assert_eq!(core::mem::offset_of!(InputLayout, gyro_data), 48);

impl InputLayout {
    /// Create the input state.
    pub fn new(
        taps: [([f32; 2], [f32; 2]); 2],
        active_tap: u32,
        gyro_data: [f32; 3],
    ) -> Self {
        Self {
            tap_pos1: taps[0].0,
            tap_vel1: taps[0].1,
            tap_pos2: taps[1].0,
            tap_vel2: taps[1].1,
            active_tap,
            gyro_data,
            ..Self::zeroed()
        }
    }
}
