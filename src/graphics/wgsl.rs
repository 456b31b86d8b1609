//! Generates the WGSL declarations matching the Rust layouts.
//!
//! Shaders include the generated prelude instead of declaring the shared structs and
//! slot numbers by hand.

use crate::graphics::{
    bindings::{BindingKind, StandardBinding},
    constants::{BuffIdx, CONSTANT_BIND_GROUP_SLOT, ConstIdx, SamplerIdx, TexIdx, VertAttr, VertIdx},
    layout::ALL_SCHEMAS,
    schema::{SlotIndex, SlotSchema, StructSchema},
};

/// What to include in the generated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WgslOptions {
    /// Emit a `const` for every slot enumerator.
    pub constants: bool,
    /// Emit the layout struct declarations.
    pub structs: bool,
    /// Emit the standard buffer bindings. Requires `structs`.
    pub bindings: bool,
}

impl Default for WgslOptions {
    fn default() -> Self {
        Self {
            constants: true,
            structs: true,
            bindings: true,
        }
    }
}

const SLOT_SCHEMAS: [SlotSchema; 6] = [
    SamplerIdx::SCHEMA,
    TexIdx::SCHEMA,
    VertAttr::SCHEMA,
    VertIdx::SCHEMA,
    ConstIdx::SCHEMA,
    BuffIdx::SCHEMA,
];

/// Generate the WGSL prelude.
pub fn generate_wgsl(options: &WgslOptions) -> String {
    let mut out = String::from("// Generated by shader_types. Do not edit.\n");

    if options.constants {
        for schema in &SLOT_SCHEMAS {
            out.push('\n');
            out.push_str(&slot_constants(schema));
        }
    }

    if options.structs {
        for schema in &ALL_SCHEMAS {
            out.push('\n');
            out.push_str(&struct_declaration(schema));
        }
    }

    if options.bindings {
        if !options.structs {
            log::warn!("Bindings reference the layout structs, emitting them without declarations");
        }
        out.push('\n');
        for binding in StandardBinding::ALL {
            out.push_str(&binding_declaration(binding));
        }
    }

    log::debug!("generated {} bytes of WGSL", out.len());
    out
}

fn slot_constants(schema: &SlotSchema) -> String {
    let prefix = screaming_snake(schema.name);
    schema
        .entries
        .iter()
        .map(|(name, value)| format!("const {prefix}_{}: i32 = {value};\n", screaming_snake(name)))
        .collect()
}

fn struct_declaration(schema: &StructSchema) -> String {
    let mut out = format!("struct {} {{\n", schema.name);
    for field in schema.fields {
        out.push_str(&format!("    {}: {},\n", field.name, field.ty.wgsl()));
    }
    out.push_str("}\n");
    out
}

fn binding_declaration(binding: StandardBinding) -> String {
    let ty = binding.schema().name;
    let (space, ty) = match binding.kind() {
        BindingKind::Uniform => ("uniform", ty.to_string()),
        BindingKind::StorageArray => ("storage, read", format!("array<{ty}>")),
    };
    format!(
        "@group({CONSTANT_BIND_GROUP_SLOT}) @binding({}) var<{space}> {}: {ty};\n",
        binding.binding(),
        binding.var_name(),
    )
}

/// `CoatNormal` -> `COAT_NORMAL`, `Texcoord0` -> `TEXCOORD0`.
fn screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        let after_word = prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
        if c.is_ascii_uppercase() && after_word {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
        prev = Some(c);
    }
    out
}
