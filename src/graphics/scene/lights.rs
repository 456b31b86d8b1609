use std::fmt;

use thiserror::Error;

use crate::graphics::{
    bindings::StandardBinding,
    gpu::{
        GpuContext,
        bind_group::GpuBindGroup,
        buffer::{BufferError, GpuBuffer},
    },
    layout::{DirLightLayout, LightInfoLayout, PointLightLayout, SpotLightLayout},
};

pub type LightSetResult<T> = Result<T, LightSetError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LightSetError {
    #[error("Too many {kind} lights (capacity is {capacity})")]
    CapacityExceeded { kind: LightKind, capacity: usize },
    #[error("The light buffers hold {available} {kind} lights, but the set may hold {requested}")]
    BuffersTooSmall { kind: LightKind, requested: usize, available: usize },
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LightKind {
    Directional,
    Point,
    Spot,
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LightKind::Directional => "directional",
            LightKind::Point => "point",
            LightKind::Spot => "spot",
        };
        f.write_str(name)
    }
}

/// How many lights of each kind the light buffers hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightCapacities {
    pub dir: usize,
    pub point: usize,
    pub spot: usize,
}

impl LightCapacities {
    /// Check that every array of `self` fits into the arrays of `available`.
    pub fn fits_within(&self, available: &LightCapacities) -> LightSetResult<()> {
        let pairs = [
            (LightKind::Directional, self.dir, available.dir),
            (LightKind::Point, self.point, available.point),
            (LightKind::Spot, self.spot, available.spot),
        ];
        for (kind, requested, held) in pairs {
            if requested > held {
                return Err(LightSetError::BuffersTooSmall {
                    kind,
                    requested,
                    available: held,
                });
            }
        }
        Ok(())
    }
}

impl Default for LightCapacities {
    fn default() -> Self {
        Self {
            dir: 8,
            point: 128,
            spot: 64,
        }
    }
}

/// The lights of a scene, as the arrays the shaders read.
///
/// The header counts always come from the array lengths, so they can't drift apart.
#[derive(Debug, Clone, Default)]
pub struct LightSet {
    capacities: LightCapacities,
    dir_lights: Vec<DirLightLayout>,
    point_lights: Vec<PointLightLayout>,
    spot_lights: Vec<SpotLightLayout>,
}

impl LightSet {
    /// Create an empty set with the given capacities.
    pub fn new(capacities: LightCapacities) -> Self {
        Self {
            capacities,
            dir_lights: Vec::with_capacity(capacities.dir),
            point_lights: Vec::with_capacity(capacities.point),
            spot_lights: Vec::with_capacity(capacities.spot),
        }
    }

    pub fn capacities(&self) -> LightCapacities {
        self.capacities
    }

    /// Add a directional light.
    pub fn add_dir(&mut self, light: DirLightLayout) -> LightSetResult<()> {
        push_bounded(&mut self.dir_lights, light, LightKind::Directional, self.capacities.dir)
    }

    /// Add a point light.
    pub fn add_point(&mut self, light: PointLightLayout) -> LightSetResult<()> {
        push_bounded(&mut self.point_lights, light, LightKind::Point, self.capacities.point)
    }

    /// Add a spot light.
    pub fn add_spot(&mut self, light: SpotLightLayout) -> LightSetResult<()> {
        push_bounded(&mut self.spot_lights, light, LightKind::Spot, self.capacities.spot)
    }

    /// Remove all lights, keeping the allocations around for the next frame.
    pub fn clear(&mut self) {
        self.dir_lights.clear();
        self.point_lights.clear();
        self.spot_lights.clear();
    }

    /// Get the header describing the arrays.
    pub fn info(&self) -> LightInfoLayout {
        LightInfoLayout {
            dir_light_count: self.dir_lights.len() as u32,
            point_light_count: self.point_lights.len() as u32,
            spot_light_count: self.spot_lights.len() as u32,
            // Area lights have no record layout yet.
            area_light_count: 0,
        }
    }

    pub fn dir_lights(&self) -> &[DirLightLayout] {
        &self.dir_lights
    }

    pub fn point_lights(&self) -> &[PointLightLayout] {
        &self.point_lights
    }

    pub fn spot_lights(&self) -> &[SpotLightLayout] {
        &self.spot_lights
    }

    pub fn is_empty(&self) -> bool {
        self.dir_lights.is_empty() && self.point_lights.is_empty() && self.spot_lights.is_empty()
    }
}

fn push_bounded<T>(
    lights: &mut Vec<T>,
    light: T,
    kind: LightKind,
    capacity: usize,
) -> LightSetResult<()> {
    if lights.len() >= capacity {
        log::warn!("Dropping {kind} light, the buffer only holds {capacity}");
        return Err(LightSetError::CapacityExceeded { kind, capacity });
    }
    lights.push(light);
    Ok(())
}

/// The GPU buffers a [`LightSet`] is uploaded into.
pub struct LightBuffers {
    capacities: LightCapacities,
    info: GpuBuffer,
    dir: GpuBuffer,
    point: GpuBuffer,
    spot: GpuBuffer,
}

impl LightBuffers {
    /// Create the header buffer and one storage buffer per light kind, sized by `capacities`.
    pub fn new(label: &str, gpu: &GpuContext, capacities: LightCapacities) -> Self {
        // Storage bindings can't be empty, so every array holds at least one record.
        let storage = |kind: &str, record: usize, count: usize| {
            GpuBuffer::create_storage_uninit(
                &format!("{label}_{kind}"),
                gpu,
                (record * count.max(1)) as u64,
            )
        };
        Self {
            capacities,
            info: GpuBuffer::create_uniform(
                &format!("{label}_info"),
                gpu,
                bytemuck::bytes_of(&LightInfoLayout::default()),
            ),
            dir: storage("dir", size_of::<DirLightLayout>(), capacities.dir),
            point: storage("point", size_of::<PointLightLayout>(), capacities.point),
            spot: storage("spot", size_of::<SpotLightLayout>(), capacities.spot),
        }
    }

    pub fn capacities(&self) -> LightCapacities {
        self.capacities
    }

    /// Upload every record of `lights`, then the header counting them.
    ///
    /// Sets which could hold more lights than these buffers are rejected before
    /// anything is written, so the header never counts records the GPU doesn't have.
    pub fn write(&self, gpu: &GpuContext, lights: &LightSet) -> LightSetResult<()> {
        lights.capacities().fits_within(&self.capacities)?;

        self.dir.write_slice(gpu, 0, lights.dir_lights())?;
        self.point.write_slice(gpu, 0, lights.point_lights())?;
        self.spot.write_slice(gpu, 0, lights.spot_lights())?;
        self.info.write_slice(gpu, 0, &[lights.info()])?;
        Ok(())
    }

    /// Create the bind group exposing the lights at their standard slots.
    pub fn create_bind_group(&self, label: &str, gpu: &GpuContext) -> GpuBindGroup {
        GpuBindGroup::create_standard(
            label,
            gpu,
            &[
                (StandardBinding::LightsInfo, &self.info),
                (StandardBinding::DirLights, &self.dir),
                (StandardBinding::PointLights, &self.point),
                (StandardBinding::SpotLights, &self.spot),
            ],
        )
    }
}
