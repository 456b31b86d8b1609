use bytemuck::Pod;
use thiserror::Error;
use wgpu::{
    BufferDescriptor,
    util::{BufferInitDescriptor, DeviceExt},
};

use crate::graphics::{constants::FRAMES_IN_FLIGHT, gpu::GpuContext};

/// Offsets of uniform buffer bindings have to be a multiple of this.
pub const UNIFORM_SLOT_ALIGNMENT: u64 = 256;

pub type BufferResult<T> = Result<T, BufferError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Writing {len} bytes at offset {offset} overflows buffer '{label}' of {size} bytes")]
    Overflow { label: String, offset: u64, len: u64, size: u64 },
    #[error("Frame index {index} is out of range for buffer '{label}' with {slots} slots")]
    NoSuchSlot { label: String, index: usize, slots: usize },
}

/// Round `size` up to a multiple of `alignment`.
pub fn aligned_size(size: u64, alignment: u64) -> u64 {
    size.div_ceil(alignment) * alignment
}

#[derive(Clone, Debug)]
pub struct GpuBuffer {
    buffer: wgpu::Buffer,
    label: String,
    /// Size of one slot; equal to the buffer size unless the buffer is per-frame.
    slot_size: u64,
    slots: usize,
}

impl GpuBuffer {
    /// Create a (writeable) uniform buffer.
    pub fn create_uniform(label: &str, gpu: &GpuContext, contents: &[u8]) -> Self {
        let buffer = gpu.device().create_buffer_init(&BufferInitDescriptor {
            label: Some(label),
            contents,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        Self::single(buffer, label)
    }

    /// Create a uniform buffer with one slot per frame in flight, so the CPU never
    /// overwrites data the GPU may still be reading.
    ///
    /// Each slot holds `size` bytes, rounded up to [`UNIFORM_SLOT_ALIGNMENT`].
    pub fn create_uniform_per_frame(label: &str, gpu: &GpuContext, size: u64) -> Self {
        let slot_size = aligned_size(size, UNIFORM_SLOT_ALIGNMENT);
        let buffer = gpu.device().create_buffer(&BufferDescriptor {
            label: Some(label),
            size: slot_size * FRAMES_IN_FLIGHT as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            label: label.into(),
            slot_size,
            slots: FRAMES_IN_FLIGHT,
        }
    }

    /// Creates a writeable storage buffer that is uninitialized but has fixed capacity of `size`.
    pub fn create_storage_uninit(label: &str, gpu: &GpuContext, size: u64) -> Self {
        let buffer = gpu.device().create_buffer(&BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self::single(buffer, label)
    }

    fn single(buffer: wgpu::Buffer, label: &str) -> Self {
        let slot_size = buffer.size();
        Self {
            buffer,
            label: label.into(),
            slot_size,
            slots: 1,
        }
    }

    /// Byte offset of the slot for the given frame.
    pub fn slot_offset(&self, frame_index: usize) -> BufferResult<u64> {
        if frame_index >= self.slots {
            return Err(BufferError::NoSuchSlot {
                label: self.label.clone(),
                index: frame_index,
                slots: self.slots,
            });
        }
        Ok(self.slot_size * frame_index as u64)
    }

    /// Write `data` starting at `offset` bytes.
    pub fn write_slice<T: Pod>(
        &self,
        gpu: &GpuContext,
        offset: u64,
        data: &[T],
    ) -> BufferResult<()> {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        check_fits(&self.label, self.buffer.size(), offset, bytes.len() as u64)?;
        if !bytes.is_empty() {
            gpu.queue().write_buffer(&self.buffer, offset, bytes);
        }
        Ok(())
    }

    /// Write a single value into the slot for the given frame.
    pub fn write_frame<T: Pod>(
        &self,
        gpu: &GpuContext,
        frame_index: usize,
        value: &T,
    ) -> BufferResult<()> {
        let offset = self.slot_offset(frame_index)?;
        check_fits(&self.label, self.slot_size, 0, size_of::<T>() as u64)?;
        self.write_slice(gpu, offset, std::slice::from_ref(value))
    }

    /// Get the actual buffer.
    pub fn handle(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Size of one slot, ie. what a binding of this buffer covers.
    pub fn slot_size(&self) -> u64 {
        self.slot_size
    }
}

fn check_fits(label: &str, size: u64, offset: u64, len: u64) -> BufferResult<()> {
    if offset.checked_add(len).is_none_or(|end| end > size) {
        return Err(BufferError::Overflow {
            label: label.into(),
            offset,
            len,
            size,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::{
        gpu::noop_gpu,
        layout::{FrameInfoLayout, LightInfoLayout},
    };

    #[test]
    fn aligned_size_rounds_up() {
        assert_eq!(aligned_size(0, 256), 0);
        assert_eq!(aligned_size(1, 256), 256);
        assert_eq!(aligned_size(512, 256), 512);
        assert_eq!(aligned_size(513, 256), 768);
    }

    #[test]
    fn frame_info_slots_are_binding_aligned() {
        let slot = aligned_size(size_of::<FrameInfoLayout>() as u64, UNIFORM_SLOT_ALIGNMENT);
        assert_eq!(slot, 512);
        let slot = aligned_size(size_of::<LightInfoLayout>() as u64, UNIFORM_SLOT_ALIGNMENT);
        assert_eq!(slot, 256);
    }

    #[test]
    fn writes_must_fit() {
        assert!(check_fits("buf", 64, 0, 64).is_ok());
        assert!(check_fits("buf", 64, 32, 32).is_ok());
        assert_eq!(
            check_fits("buf", 64, 48, 32),
            Err(BufferError::Overflow { label: "buf".into(), offset: 48, len: 32, size: 64 })
        );
        assert!(check_fits("buf", 64, u64::MAX, 1).is_err());
    }

    #[test]
    fn per_frame_slots_are_spaced_by_the_aligned_size() {
        let gpu = noop_gpu();
        let buffer = GpuBuffer::create_uniform_per_frame("frame", &gpu, 16);
        assert_eq!(buffer.slot_size(), 256);
        assert_eq!(buffer.handle().size(), 256 * FRAMES_IN_FLIGHT as u64);

        let offsets: Vec<u64> = (0..FRAMES_IN_FLIGHT)
            .map(|i| buffer.slot_offset(i))
            .collect::<BufferResult<_>>()
            .unwrap();
        assert_eq!(offsets, vec![0, 256, 512]);
    }

    #[test]
    fn slot_offset_rejects_frames_past_the_ring() {
        let gpu = noop_gpu();
        let buffer = GpuBuffer::create_uniform_per_frame("frame", &gpu, 16);
        assert_eq!(
            buffer.slot_offset(FRAMES_IN_FLIGHT),
            Err(BufferError::NoSuchSlot { label: "frame".into(), index: 3, slots: 3 })
        );

        let single = GpuBuffer::create_uniform("single", &gpu, &[0; 16]);
        assert_eq!(single.slot_offset(0), Ok(0));
        assert!(single.slot_offset(1).is_err());
    }

    #[test]
    fn write_slice_checks_the_real_buffer_size() {
        let gpu = noop_gpu();
        let buffer = GpuBuffer::create_storage_uninit("records", &gpu, 64);

        assert_eq!(buffer.write_slice(&gpu, 0, &[[1.0f32; 4]; 4]), Ok(()));
        assert_eq!(buffer.write_slice(&gpu, 48, &[[1.0f32; 4]]), Ok(()));
        assert_eq!(buffer.write_slice::<u32>(&gpu, 64, &[]), Ok(()));
        assert_eq!(
            buffer.write_slice(&gpu, 0, &[[1.0f32; 4]; 5]),
            Err(BufferError::Overflow { label: "records".into(), offset: 0, len: 80, size: 64 })
        );
    }

    #[test]
    fn write_frame_stays_inside_its_slot() {
        let gpu = noop_gpu();
        let buffer = GpuBuffer::create_uniform_per_frame("frame", &gpu, 16);

        assert_eq!(buffer.write_frame(&gpu, 2, &LightInfoLayout::default()), Ok(()));
        // Would fit in the buffer, but spills into the next frame's slot.
        assert_eq!(
            buffer.write_frame(&gpu, 0, &[0.0f32; 128]),
            Err(BufferError::Overflow { label: "frame".into(), offset: 0, len: 512, size: 256 })
        );
        assert!(buffer.write_frame(&gpu, 3, &LightInfoLayout::default()).is_err());
    }
}
