//! Structs whose memory is read verbatim by shader code.
//!
//! Every struct here is `#[repr(C)]` and `Pod`, and implements
//! [`GpuLayout`](crate::graphics::schema::GpuLayout), which checks at compile time that
//! the Rust layout agrees with the WGSL one.

pub mod frame_info;
pub mod input;
pub mod light;
pub mod material;
pub mod model;

pub use frame_info::FrameInfoLayout;
pub use input::InputLayout;
pub use light::{DirLightLayout, LightInfoLayout, PointLightLayout, SpotLightLayout};
pub use material::MaterialLayout;
pub use model::ModelLayout;

use crate::graphics::schema::{GpuLayout, StructSchema};

/// Schemas of all layout structs, in the order they are declared to shaders.
pub const ALL_SCHEMAS: [StructSchema; 8] = [
    InputLayout::SCHEMA,
    FrameInfoLayout::SCHEMA,
    ModelLayout::SCHEMA,
    MaterialLayout::SCHEMA,
    LightInfoLayout::SCHEMA,
    DirLightLayout::SCHEMA,
    PointLightLayout::SCHEMA,
    SpotLightLayout::SCHEMA,
];

/// Converts a boolean flag to the 4-byte form shaders read.
pub const fn gpu_bool(value: bool) -> u32 {
    value as u32
}
