use thiserror::Error;

use crate::slot_enum;

/// `wgpu` has one binding namespace per bind group, and texture slots overlap with
/// constant buffer slots, so each resource class gets its own group.
pub const CONSTANT_BIND_GROUP_SLOT: u32 = 0;
pub const TEXTURE_BIND_GROUP_SLOT: u32 = 1;
pub const SAMPLER_BIND_GROUP_SLOT: u32 = 2;

/// How many frames the CPU may run ahead of the GPU.
pub const FRAMES_IN_FLIGHT: usize = 3;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("{value} is not a valid {slot}")]
    Unknown { slot: &'static str, value: i32 },
}

slot_enum! {
    /// Sampler binding slots.
    pub enum SamplerIdx {
        Default = 0,
    }
}

slot_enum! {
    /// Texture binding slots.
    ///
    /// The material textures occupy 0..7. Everything from 32 on is reserved for
    /// frame-level attachments, and the gaps between them are intentional.
    pub enum TexIdx {
        Color = 0,
        Normal = 1,
        /// Roughness, metallic, ambient occlusion and displacement.
        Rmad = 2,
        Displacement = 3,
        Tangent = 4,
        CoatNormal = 5,
        Emissive = 6,

        Depth = 32,
        Stencil = 33,
        DisplayColor = 36,
        /// First G-buffer attachment; the rest follow contiguously.
        Gbuffer = 40,
        Bindless = 64,
    }
}

impl TexIdx {
    /// The texture slots a material can fill.
    pub const MATERIAL: [TexIdx; 7] = [
        TexIdx::Color,
        TexIdx::Normal,
        TexIdx::Rmad,
        TexIdx::Displacement,
        TexIdx::Tangent,
        TexIdx::CoatNormal,
        TexIdx::Emissive,
    ];

    /// Binding of the `attachment`-th G-buffer texture.
    pub const fn gbuffer_binding(attachment: u32) -> u32 {
        TexIdx::Gbuffer.binding() + attachment
    }
}

slot_enum! {
    /// Vertex attribute locations.
    pub enum VertAttr {
        Position = 0,
        Normal = 1,
        Tangent = 2,
        Texcoord0 = 3,
    }
}

slot_enum! {
    /// Vertex buffer slots, ie. the streams vertex attributes are pulled from.
    pub enum VertIdx {
        Pos = 0,
        /// Normal + tangent.
        Tbn = 1,
        Uv0 = 2,
    }
}

slot_enum! {
    /// Constant (uniform) buffer slots.
    pub enum ConstIdx {
        FrameInfo = 4,
        LightsInfo = 5,
        Input = 6,

        Bytes = 8,

        Model = 10,
        Material = 11,

        Custom = 12,
    }
}

slot_enum! {
    /// Storage buffer slots.
    pub enum BuffIdx {
        DirLights = 16,
        PointLights = 17,
        SpotLights = 18,
        AreaLights = 19,

        DrawArgs = 20,
        Materials = 21,

        Particles = 32,
        Custom = 33,
    }
}
