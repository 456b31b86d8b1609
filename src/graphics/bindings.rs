use crate::graphics::{
    constants::{BuffIdx, ConstIdx},
    layout::{
        DirLightLayout, FrameInfoLayout, InputLayout, LightInfoLayout, MaterialLayout, ModelLayout,
        PointLightLayout, SpotLightLayout,
    },
    schema::{GpuLayout, StructSchema},
};

/// How a standard binding is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// A single struct in a uniform buffer.
    Uniform,
    /// A runtime-sized array of structs in a read-only storage buffer.
    StorageArray,
}

/// The buffers every shader can rely on, and which layout struct each one holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardBinding {
    FrameInfo,
    LightsInfo,
    Input,
    Model,
    Material,
    DirLights,
    PointLights,
    SpotLights,
}

impl StandardBinding {
    pub const ALL: [StandardBinding; 8] = [
        StandardBinding::FrameInfo,
        StandardBinding::LightsInfo,
        StandardBinding::Input,
        StandardBinding::Model,
        StandardBinding::Material,
        StandardBinding::DirLights,
        StandardBinding::PointLights,
        StandardBinding::SpotLights,
    ];

    /// The binding number, taken from the constant/storage slot enumerations.
    pub const fn binding(self) -> u32 {
        match self {
            StandardBinding::FrameInfo => ConstIdx::FrameInfo.binding(),
            StandardBinding::LightsInfo => ConstIdx::LightsInfo.binding(),
            StandardBinding::Input => ConstIdx::Input.binding(),
            StandardBinding::Model => ConstIdx::Model.binding(),
            StandardBinding::Material => ConstIdx::Material.binding(),
            StandardBinding::DirLights => BuffIdx::DirLights.binding(),
            StandardBinding::PointLights => BuffIdx::PointLights.binding(),
            StandardBinding::SpotLights => BuffIdx::SpotLights.binding(),
        }
    }

    pub const fn kind(self) -> BindingKind {
        match self {
            StandardBinding::DirLights
            | StandardBinding::PointLights
            | StandardBinding::SpotLights => BindingKind::StorageArray,
            _ => BindingKind::Uniform,
        }
    }

    /// The struct stored in the buffer (or each element of it, for arrays).
    pub const fn schema(self) -> StructSchema {
        match self {
            StandardBinding::FrameInfo => FrameInfoLayout::SCHEMA,
            StandardBinding::LightsInfo => LightInfoLayout::SCHEMA,
            StandardBinding::Input => InputLayout::SCHEMA,
            StandardBinding::Model => ModelLayout::SCHEMA,
            StandardBinding::Material => MaterialLayout::SCHEMA,
            StandardBinding::DirLights => DirLightLayout::SCHEMA,
            StandardBinding::PointLights => PointLightLayout::SCHEMA,
            StandardBinding::SpotLights => SpotLightLayout::SCHEMA,
        }
    }

    /// Name of the shader variable bound here.
    pub const fn var_name(self) -> &'static str {
        match self {
            StandardBinding::FrameInfo => "frame_info",
            StandardBinding::LightsInfo => "lights_info",
            StandardBinding::Input => "input_state",
            StandardBinding::Model => "model",
            StandardBinding::Material => "material",
            StandardBinding::DirLights => "dir_lights",
            StandardBinding::PointLights => "point_lights",
            StandardBinding::SpotLights => "spot_lights",
        }
    }

    /// Whether the buffer holds one slot per frame in flight, bound with a dynamic offset.
    pub const fn is_per_frame(self) -> bool {
        matches!(self, StandardBinding::FrameInfo)
    }

    /// The bind group layout entry for this binding.
    pub fn layout_entry(self) -> wgpu::BindGroupLayoutEntry {
        let ty = match self.kind() {
            BindingKind::Uniform => wgpu::BufferBindingType::Uniform,
            BindingKind::StorageArray => wgpu::BufferBindingType::Storage { read_only: true },
        };
        wgpu::BindGroupLayoutEntry {
            binding: self.binding(),
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty,
                has_dynamic_offset: self.is_per_frame(),
                min_binding_size: wgpu::BufferSize::new(self.schema().size as u64),
            },
            count: None,
        }
    }
}

/// The layout entries for the given bindings, in the given order.
pub fn layout_entries(bindings: &[StandardBinding]) -> Vec<wgpu::BindGroupLayoutEntry> {
    bindings.iter().map(|b| b.layout_entry()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bindings_come_from_the_slot_enumerations() {
        let numbers: Vec<u32> = StandardBinding::ALL.iter().map(|b| b.binding()).collect();
        assert_eq!(numbers, vec![4, 5, 6, 10, 11, 16, 17, 18]);
    }

    #[test]
    fn light_records_are_storage_arrays() {
        assert_eq!(StandardBinding::PointLights.kind(), BindingKind::StorageArray);
        assert_eq!(StandardBinding::LightsInfo.kind(), BindingKind::Uniform);
        assert_eq!(StandardBinding::SpotLights.schema().name, "SpotLightLayout");
    }

    #[test]
    fn layout_entry_requires_at_least_one_record() {
        let entry = StandardBinding::Material.layout_entry();
        assert_eq!(entry.binding, 11);
        match entry.ty {
            wgpu::BindingType::Buffer { ty, has_dynamic_offset, min_binding_size } => {
                assert_eq!(ty, wgpu::BufferBindingType::Uniform);
                assert!(!has_dynamic_offset);
                assert_eq!(min_binding_size.map(|s| s.get()), Some(96));
            }
            other => panic!("unexpected binding type {other:?}"),
        }
        assert_eq!(layout_entries(&StandardBinding::ALL).len(), 8);
    }

    #[test]
    fn only_frame_info_is_per_frame() {
        let per_frame: Vec<_> =
            StandardBinding::ALL.into_iter().filter(|b| b.is_per_frame()).collect();
        assert_eq!(per_frame, vec![StandardBinding::FrameInfo]);
    }
}
