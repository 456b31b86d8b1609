//! Checks the generated WGSL against what the shader compiler makes of it.

use naga::{
    Expression, Literal, Module, TypeInner,
    valid::{Capabilities, ValidationFlags, Validator},
};
use shader_types::graphics::{
    constants::{BuffIdx, ConstIdx, SamplerIdx, TexIdx, VertAttr, VertIdx},
    layout::ALL_SCHEMAS,
    schema::{SlotIndex, SlotSchema},
    wgsl::{WgslOptions, generate_wgsl},
};

fn compile(options: &WgslOptions) -> Module {
    let source = generate_wgsl(options);
    let module = match naga::front::wgsl::parse_str(&source) {
        Ok(module) => module,
        Err(err) => panic!("{}\n{source}", err.emit_to_string(&source)),
    };
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    if let Err(err) = validator.validate(&module) {
        panic!("{err:?}\n{source}");
    }
    module
}

fn i32_constant(module: &Module, name: &str) -> Option<i32> {
    let (_, constant) = module
        .constants
        .iter()
        .find(|(_, c)| c.name.as_deref() == Some(name))?;
    match module.global_expressions[constant.init] {
        Expression::Literal(Literal::I32(value)) => Some(value),
        ref other => panic!("{name} is not an i32 literal: {other:?}"),
    }
}

#[test]
fn generated_source_validates() {
    compile(&WgslOptions::default());
    compile(&WgslOptions {
        bindings: false,
        ..WgslOptions::default()
    });
}

#[test]
fn struct_layouts_match_the_shader_compiler() {
    let module = compile(&WgslOptions::default());

    for schema in ALL_SCHEMAS {
        let (members, span) = module
            .types
            .iter()
            .find_map(|(_, ty)| match &ty.inner {
                TypeInner::Struct { members, span } if ty.name.as_deref() == Some(schema.name) => {
                    Some((members.clone(), *span))
                }
                _ => None,
            })
            .unwrap_or_else(|| panic!("{} missing from the module", schema.name));

        assert_eq!(span, schema.size, "size of {}", schema.name);
        assert_eq!(members.len(), schema.fields.len(), "fields of {}", schema.name);
        for member in &members {
            let name = member.name.as_deref().unwrap_or_default();
            let field = schema
                .field(name)
                .unwrap_or_else(|| panic!("{}.{name} has no Rust field", schema.name));
            assert_eq!(member.offset, field.offset, "{}.{name}", schema.name);
        }
    }
}

#[test]
fn rust_sizes_match_the_schemas() {
    use shader_types::graphics::layout::*;

    let sizes = [
        size_of::<InputLayout>(),
        size_of::<FrameInfoLayout>(),
        size_of::<ModelLayout>(),
        size_of::<MaterialLayout>(),
        size_of::<LightInfoLayout>(),
        size_of::<DirLightLayout>(),
        size_of::<PointLightLayout>(),
        size_of::<SpotLightLayout>(),
    ];
    for (schema, size) in ALL_SCHEMAS.iter().zip(sizes) {
        assert_eq!(schema.size as usize, size, "{}", schema.name);
    }
}

#[test]
fn constants_match_the_enumerations() {
    let module = compile(&WgslOptions::default());

    let check = |schema: SlotSchema, prefix: &str| {
        for (name, value) in schema.entries {
            let upper: String = name
                .chars()
                .enumerate()
                .flat_map(|(i, c)| {
                    let split = i > 0
                        && c.is_ascii_uppercase()
                        && name[..i]
                            .chars()
                            .last()
                            .is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit());
                    split.then_some('_').into_iter().chain(Some(c.to_ascii_uppercase()))
                })
                .collect();
            let constant = format!("{prefix}_{upper}");
            assert_eq!(i32_constant(&module, &constant), Some(*value), "{constant}");
        }
    };
    check(SamplerIdx::SCHEMA, "SAMPLER_IDX");
    check(TexIdx::SCHEMA, "TEX_IDX");
    check(VertAttr::SCHEMA, "VERT_ATTR");
    check(VertIdx::SCHEMA, "VERT_IDX");
    check(ConstIdx::SCHEMA, "CONST_IDX");
    check(BuffIdx::SCHEMA, "BUFF_IDX");

    assert_eq!(i32_constant(&module, "TEX_IDX_DEPTH"), Some(32));
    assert_eq!(i32_constant(&module, "TEX_IDX_BINDLESS"), Some(64));
    assert_eq!(i32_constant(&module, "CONST_IDX_CUSTOM"), Some(12));
    assert_eq!(i32_constant(&module, "TEX_IDX_COAT_NORMAL"), Some(TexIdx::CoatNormal.index()));
}
