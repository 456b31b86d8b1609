use crate::graphics::layout::MaterialLayout;

/// Every scalar a material exposes, in the order they appear in [`MaterialLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialProperty {
    BaseColorR,
    BaseColorG,
    BaseColorB,
    Alpha,

    Roughness,
    Metallic,
    Specular,
    Ior,

    Emission,

    // Clearcoat layer
    CoatIor,
    CoatThickness,
    CoatRoughness,

    Anisotropic,
    AnisotropicRotation,

    // Sheen, mostly for fabric
    Sheen,
    SheenTint,

    Transmission,
    TransmissionRoughness,

    // Subsurface scattering
    Subsurface,
    SubsurfaceRadius,
    SubsurfaceColorR,
    SubsurfaceColorG,
    SubsurfaceColorB,
}

impl MaterialProperty {
    pub const COUNT: usize = 23;
}

/// A material's parameters, keyed by [`MaterialProperty`].
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialParams {
    values: [f32; MaterialProperty::COUNT],
}

impl MaterialParams {
    /// Get a property.
    pub fn get(&self, property: MaterialProperty) -> f32 {
        self.values[property as usize]
    }

    /// Set a property.
    pub fn set(&mut self, property: MaterialProperty, value: f32) {
        self.values[property as usize] = value;
    }

    /// Set several properties at once.
    pub fn update<I>(&mut self, properties: I)
    where
        I: IntoIterator<Item = (MaterialProperty, f32)>,
    {
        for (property, value) in properties {
            self.set(property, value);
        }
    }

    /// Get the shader data for these parameters.
    pub fn to_layout(&self) -> MaterialLayout {
        use MaterialProperty::*;
        let v = |p: MaterialProperty| self.get(p);
        MaterialLayout {
            base_color: [v(BaseColorR), v(BaseColorG), v(BaseColorB)],
            alpha: v(Alpha),
            roughness: v(Roughness),
            metallic: v(Metallic),
            specular: v(Specular),
            ior: v(Ior),
            emission: v(Emission),
            coat_ior: v(CoatIor),
            coat_thickness: v(CoatThickness),
            coat_roughness: v(CoatRoughness),
            anisotropic: v(Anisotropic),
            anisotropic_rotation: v(AnisotropicRotation),
            sheen: v(Sheen),
            sheen_tint: v(SheenTint),
            transmission: v(Transmission),
            transmission_roughness: v(TransmissionRoughness),
            subsurface: v(Subsurface),
            subsurface_radius: v(SubsurfaceRadius),
            subsurface_color: [v(SubsurfaceColorR), v(SubsurfaceColorG), v(SubsurfaceColorB)],
            padding: 0.0,
        }
    }
}

impl Default for MaterialParams {
    /// An opaque white, fully rough metal.
    fn default() -> Self {
        let mut params = Self {
            values: [0.0; MaterialProperty::COUNT],
        };
        params.update([
            (MaterialProperty::BaseColorR, 1.0),
            (MaterialProperty::BaseColorG, 1.0),
            (MaterialProperty::BaseColorB, 1.0),
            (MaterialProperty::Alpha, 1.0),
            (MaterialProperty::Roughness, 1.0),
            (MaterialProperty::Metallic, 1.0),
            (MaterialProperty::Specular, 0.04),
            (MaterialProperty::Ior, 1.45),
            (MaterialProperty::CoatIor, 1.0),
        ]);
        params
    }
}

impl Default for MaterialLayout {
    fn default() -> Self {
        MaterialParams::default().to_layout()
    }
}
