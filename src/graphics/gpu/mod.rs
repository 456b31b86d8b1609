pub mod bind_group;
pub mod buffer;

/// Abstraction over GPU-related data.
#[derive(Clone, Debug)]
pub struct GpuContext {
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuContext {
    /// Instantiate.
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self { device, queue }
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}

/// A device that accepts every call but never touches real hardware.
#[cfg(test)]
pub(crate) fn noop_gpu() -> GpuContext {
    let (device, queue) = wgpu::Device::noop(&wgpu::DeviceDescriptor::default());
    GpuContext::new(device, queue)
}
