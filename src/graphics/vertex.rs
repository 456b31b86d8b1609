use wgpu::{VertexAttribute, VertexBufferLayout, VertexFormat, VertexStepMode};

use crate::graphics::constants::{VertAttr, VertIdx};

const POS_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x3,
    offset: 0,
    shader_location: VertAttr::Position.binding(),
}];

// Normal followed by tangent, the tangent's w holding the bitangent sign.
const TBN_ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        format: VertexFormat::Float32x3,
        offset: 0,
        shader_location: VertAttr::Normal.binding(),
    },
    VertexAttribute {
        format: VertexFormat::Float32x4,
        offset: size_of::<[f32; 3]>() as wgpu::BufferAddress,
        shader_location: VertAttr::Tangent.binding(),
    },
];

const UV0_ATTRIBUTES: [VertexAttribute; 1] = [VertexAttribute {
    format: VertexFormat::Float32x2,
    offset: 0,
    shader_location: VertAttr::Texcoord0.binding(),
}];

impl VertIdx {
    /// The attributes pulled from this stream.
    pub fn attributes(self) -> &'static [VertexAttribute] {
        match self {
            VertIdx::Pos => &POS_ATTRIBUTES,
            VertIdx::Tbn => &TBN_ATTRIBUTES,
            VertIdx::Uv0 => &UV0_ATTRIBUTES,
        }
    }

    /// Bytes per vertex in this stream.
    pub fn stride(self) -> wgpu::BufferAddress {
        match self {
            VertIdx::Pos => size_of::<[f32; 3]>() as wgpu::BufferAddress,
            VertIdx::Tbn => size_of::<[f32; 7]>() as wgpu::BufferAddress,
            VertIdx::Uv0 => size_of::<[f32; 2]>() as wgpu::BufferAddress,
        }
    }
}

/// Get the vertex buffer description of a stream.
pub fn vertex_buffer_layout(stream: VertIdx) -> VertexBufferLayout<'static> {
    VertexBufferLayout {
        array_stride: stream.stride(),
        step_mode: VertexStepMode::Vertex,
        attributes: stream.attributes(),
    }
}

/// Get the vertex buffer descriptions for a set of streams.
///
/// The returned layouts are in the order given; when setting vertex buffers, each
/// stream should go to the slot given by its [`VertIdx`].
pub fn vertex_buffer_layouts(streams: &[VertIdx]) -> Vec<VertexBufferLayout<'static>> {
    streams.iter().map(|s| vertex_buffer_layout(*s)).collect()
}
