use bytemuck::Pod;

/// The shader-side type of a layout field.
///
/// Sizes and alignments follow the WGSL host-shareable rules, which is also what
/// `wgpu` validates buffers against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    F32,
    U32,
    I32,
    Vec2F32,
    Vec3F32,
    Vec4F32,
    Mat4x4F32,
}

impl FieldType {
    /// Size in bytes on the shader side.
    pub const fn size(self) -> u32 {
        match self {
            FieldType::F32 | FieldType::U32 | FieldType::I32 => 4,
            FieldType::Vec2F32 => 8,
            FieldType::Vec3F32 => 12,
            FieldType::Vec4F32 => 16,
            FieldType::Mat4x4F32 => 64,
        }
    }

    /// Alignment in bytes on the shader side.
    ///
    /// Note that a `vec3` aligns like a `vec4`, even though it is only 12 bytes.
    pub const fn align(self) -> u32 {
        match self {
            FieldType::F32 | FieldType::U32 | FieldType::I32 => 4,
            FieldType::Vec2F32 => 8,
            FieldType::Vec3F32 | FieldType::Vec4F32 | FieldType::Mat4x4F32 => 16,
        }
    }

    /// The WGSL spelling of this type.
    pub const fn wgsl(self) -> &'static str {
        match self {
            FieldType::F32 => "f32",
            FieldType::U32 => "u32",
            FieldType::I32 => "i32",
            FieldType::Vec2F32 => "vec2<f32>",
            FieldType::Vec3F32 => "vec3<f32>",
            FieldType::Vec4F32 => "vec4<f32>",
            FieldType::Mat4x4F32 => "mat4x4<f32>",
        }
    }
}

/// A Rust type which can be used as a shader-visible layout field.
pub trait ShaderField: Pod {
    const TYPE: FieldType;
}

impl ShaderField for f32 {
    const TYPE: FieldType = FieldType::F32;
}

impl ShaderField for u32 {
    const TYPE: FieldType = FieldType::U32;
}

impl ShaderField for i32 {
    const TYPE: FieldType = FieldType::I32;
}

impl ShaderField for [f32; 2] {
    const TYPE: FieldType = FieldType::Vec2F32;
}

impl ShaderField for [f32; 3] {
    const TYPE: FieldType = FieldType::Vec3F32;
}

impl ShaderField for [f32; 4] {
    const TYPE: FieldType = FieldType::Vec4F32;
}

// Column-major, ie. each inner array is a column.
impl ShaderField for [[f32; 4]; 4] {
    const TYPE: FieldType = FieldType::Mat4x4F32;
}

/// One shader-visible field of a layout struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub ty: FieldType,
    /// Byte offset of the field in the Rust struct.
    pub offset: u32,
    /// Size of the Rust field type.
    pub host_size: u32,
}

/// Describes a layout struct as the shader sees it.
///
/// Host-only padding fields (the ones standing in for padding WGSL inserts on its own)
/// are not listed here; they only exist so the Rust type has no implicit padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructSchema {
    pub name: &'static str,
    /// `size_of` the Rust struct.
    pub size: u32,
    pub fields: &'static [FieldSchema],
}

impl StructSchema {
    /// The size the shader compiler assigns to this struct.
    pub const fn shader_size(&self) -> u32 {
        let mut cursor = 0;
        let mut max_align = 1;
        let mut i = 0;
        while i < self.fields.len() {
            let ty = self.fields[i].ty;
            cursor = round_up(cursor, ty.align()) + ty.size();
            if ty.align() > max_align {
                max_align = ty.align();
            }
            i += 1;
        }
        round_up(cursor, max_align)
    }

    /// The offset the shader compiler assigns to the field at `index`.
    pub const fn shader_offset(&self, index: usize) -> u32 {
        let mut cursor = 0;
        let mut i = 0;
        loop {
            let ty = self.fields[i].ty;
            let offset = round_up(cursor, ty.align());
            if i == index {
                return offset;
            }
            cursor = offset + ty.size();
            i += 1;
        }
    }

    /// Whether the Rust layout matches the shader layout byte for byte.
    ///
    /// Also requires the size to be a multiple of 16, so that arrays of the struct
    /// have the same stride on both sides.
    pub const fn is_host_shareable(&self) -> bool {
        let mut i = 0;
        while i < self.fields.len() {
            let field = &self.fields[i];
            if field.host_size != field.ty.size() || field.offset != self.shader_offset(i) {
                return false;
            }
            i += 1;
        }
        self.size == self.shader_size() && self.size % 16 == 0
    }

    /// Find a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// The byte ranges of the struct not covered by any shader-visible field.
    pub fn padding_ranges(&self) -> Vec<std::ops::Range<usize>> {
        let mut ranges = Vec::new();
        let mut cursor = 0;
        for field in self.fields {
            let start = field.offset as usize;
            if start > cursor {
                ranges.push(cursor..start);
            }
            cursor = start + field.host_size as usize;
        }
        if (self.size as usize) > cursor {
            ranges.push(cursor..self.size as usize);
        }
        ranges
    }
}

/// Round `value` up to the next multiple of `align` (which must be a power of two).
pub const fn round_up(value: u32, align: u32) -> u32 {
    (value + align - 1) & !(align - 1)
}

/// A struct whose memory is read verbatim by shader code.
pub trait GpuLayout: Pod {
    const SCHEMA: StructSchema;
}

/// Describes a slot enumeration as a name → value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSchema {
    pub name: &'static str,
    pub entries: &'static [(&'static str, i32)],
}

impl SlotSchema {
    /// Look up the value of an enumerator by its name.
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.entries.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

/// A binding index shared by CPU binding calls and shader code.
pub trait SlotIndex: Copy + 'static {
    const SCHEMA: SlotSchema;
    const ALL: &'static [Self];

    /// The raw slot number.
    fn index(self) -> i32;
}

/// Implements [`GpuLayout`] for a `#[repr(C)]` struct.
///
/// List the shader-visible fields in declaration order. Host-only padding is left out.
/// Each listed type is checked against the actual field, and the resulting schema is
/// checked against the WGSL layout rules at compile time.
#[macro_export]
macro_rules! gpu_layout {
    ($name:ident { $($field:ident : $ty:ty),+ $(,)? }) => {
        impl $crate::graphics::schema::GpuLayout for $name {
            const SCHEMA: $crate::graphics::schema::StructSchema =
                $crate::graphics::schema::StructSchema {
                    name: stringify!($name),
                    size: ::core::mem::size_of::<$name>() as u32,
                    fields: &[$(
                        $crate::graphics::schema::FieldSchema {
                            name: stringify!($field),
                            ty: <$ty as $crate::graphics::schema::ShaderField>::TYPE,
                            offset: ::core::mem::offset_of!($name, $field) as u32,
                            host_size: ::core::mem::size_of::<$ty>() as u32,
                        },
                    )+],
                };
        }

        const _: () = {
            $(
                let _: fn(&$name) -> &$ty = |s| &s.$field;
            )+
        };

        ::static_assertions::const_assert!(
            <$name as $crate::graphics::schema::GpuLayout>::SCHEMA.is_host_shareable()
        );
    };
}

/// Declares a `#[repr(i32)]` slot enumeration together with its [`SlotSchema`].
///
/// Values are always spelled out, gaps included.
#[macro_export]
macro_rules! slot_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i32)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($(#[$vmeta])* $variant = $value),+
        }

        impl $name {
            /// The raw slot number.
            pub const fn index(self) -> i32 {
                self as i32
            }

            /// The slot as a binding number or shader location.
            pub const fn binding(self) -> u32 {
                self as i32 as u32
            }
        }

        impl $crate::graphics::schema::SlotIndex for $name {
            const SCHEMA: $crate::graphics::schema::SlotSchema =
                $crate::graphics::schema::SlotSchema {
                    name: stringify!($name),
                    entries: &[$((stringify!($variant), $value)),+],
                };
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn index(self) -> i32 {
                self as i32
            }
        }

        impl TryFrom<i32> for $name {
            type Error = $crate::graphics::constants::SlotError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                match value {
                    $($value => Ok($name::$variant),)+
                    _ => Err($crate::graphics::constants::SlotError::Unknown {
                        slot: stringify!($name),
                        value,
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_up_aligns_to_power_of_two() {
        assert_eq!(round_up(0, 16), 0);
        assert_eq!(round_up(1, 16), 16);
        assert_eq!(round_up(16, 16), 16);
        assert_eq!(round_up(36, 16), 48);
        assert_eq!(round_up(12, 4), 12);
    }

    #[test]
    fn vec3_takes_vec4_alignment_but_not_its_size() {
        assert_eq!(FieldType::Vec3F32.align(), FieldType::Vec4F32.align());
        assert_eq!(FieldType::Vec3F32.size(), 12);
    }

    const PACKED: StructSchema = StructSchema {
        name: "Packed",
        size: 16,
        fields: &[
            FieldSchema { name: "a", ty: FieldType::Vec3F32, offset: 0, host_size: 12 },
            FieldSchema { name: "b", ty: FieldType::F32, offset: 12, host_size: 4 },
        ],
    };

    const MISPLACED: StructSchema = StructSchema {
        name: "Misplaced",
        size: 32,
        fields: &[
            FieldSchema { name: "a", ty: FieldType::U32, offset: 0, host_size: 4 },
            // WGSL puts this at 16.
            FieldSchema { name: "b", ty: FieldType::Vec3F32, offset: 4, host_size: 12 },
        ],
    };

    #[test]
    fn scalar_after_vec3_fills_the_fourth_lane() {
        assert_eq!(PACKED.shader_offset(1), 12);
        assert_eq!(PACKED.shader_size(), 16);
        assert!(PACKED.is_host_shareable());
        assert!(PACKED.padding_ranges().is_empty());
    }

    #[test]
    fn misaligned_vec3_is_rejected() {
        assert_eq!(MISPLACED.shader_offset(1), 16);
        assert!(!MISPLACED.is_host_shareable());
    }

    #[test]
    fn padding_ranges_cover_gaps_and_tail() {
        let schema = StructSchema {
            name: "Gappy",
            size: 48,
            fields: &[
                FieldSchema { name: "a", ty: FieldType::U32, offset: 0, host_size: 4 },
                FieldSchema { name: "b", ty: FieldType::Vec3F32, offset: 16, host_size: 12 },
                FieldSchema { name: "c", ty: FieldType::F32, offset: 28, host_size: 4 },
            ],
        };
        assert_eq!(schema.padding_ranges(), vec![4..16, 32..48]);
    }

    #[test]
    fn slot_schema_looks_up_by_name() {
        let schema = SlotSchema { name: "Test", entries: &[("A", 0), ("B", 32)] };
        assert_eq!(schema.value_of("B"), Some(32));
        assert_eq!(schema.value_of("C"), None);
    }
}
