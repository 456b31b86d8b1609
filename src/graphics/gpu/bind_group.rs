use crate::graphics::{
    bindings::StandardBinding,
    gpu::{GpuContext, buffer::GpuBuffer},
};

/// Abstraction of the bind group + its layout.
#[derive(Clone, Debug)]
pub struct GpuBindGroup {
    group: wgpu::BindGroup,
    layout: wgpu::BindGroupLayout,
}

impl GpuBindGroup {
    /// Create the bind group with mostly default configs.
    pub fn create_default(
        label: &str,
        gpu: &GpuContext,
        layout_entries: &[wgpu::BindGroupLayoutEntry],
        entries: &[wgpu::BindGroupEntry],
    ) -> Self {
        let device = gpu.device();

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: layout_entries,
            label: Some(&format!("{label}_layout")),
        });
        let group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries,
            label: Some(label),
        });

        Self { group, layout }
    }

    /// Create a bind group out of standard bindings and the buffers backing them.
    ///
    /// Each binding covers one slot of its buffer; per-frame buffers pick their slot
    /// through the dynamic offset when the group is set.
    pub fn create_standard(
        label: &str,
        gpu: &GpuContext,
        buffers: &[(StandardBinding, &GpuBuffer)],
    ) -> Self {
        let layout_entries: Vec<_> = buffers.iter().map(|(b, _)| b.layout_entry()).collect();
        let entries: Vec<_> = buffers
            .iter()
            .map(|(binding, buffer)| wgpu::BindGroupEntry {
                binding: binding.binding(),
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: buffer.handle(),
                    offset: 0,
                    size: wgpu::BufferSize::new(buffer.slot_size()),
                }),
            })
            .collect();
        log::debug!("creating bind group '{label}' with {} standard bindings", entries.len());
        Self::create_default(label, gpu, &layout_entries, &entries)
    }

    /// Get the actual bind group.
    pub fn handle(&self) -> &wgpu::BindGroup {
        &self.group
    }

    /// Get the group's layout.
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }
}
