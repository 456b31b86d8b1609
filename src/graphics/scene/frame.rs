use cgmath::{Matrix4, SquareMatrix, Vector3};
use web_time::Instant;

use crate::graphics::{
    constants::FRAMES_IN_FLIGHT,
    gpu::{
        GpuContext,
        buffer::{BufferResult, GpuBuffer},
    },
    layout::FrameInfoLayout,
};

/// The camera state the frame info is built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameCamera {
    pub view: Matrix4<f32>,
    pub proj: Matrix4<f32>,
    pub position: Vector3<f32>,
    pub near: f32,
    pub far: f32,
}

impl FrameCamera {
    pub fn view_proj(&self) -> Matrix4<f32> {
        self.proj * self.view
    }
}

/// Keeps the per-frame globals up to date.
///
/// Besides filling in the current frame, this carries the last frame's view-projection
/// over into `prev_view_proj_matrix`, which shaders use for reprojection.
pub struct FrameInfo {
    layout: FrameInfoLayout,
    start: Instant,
    prev_view_proj: Matrix4<f32>,
}

impl FrameInfo {
    /// Start tracking frames for the given resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            layout: FrameInfoLayout::new(width as f32, height as f32),
            start: Instant::now(),
            prev_view_proj: Matrix4::identity(),
        }
    }

    /// Handle resizing of the surface.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.layout.resolution = [width as f32, height as f32];
    }

    pub fn aspect_ratio(&self) -> f32 {
        let [width, height] = self.layout.resolution;
        if height > 0.0 { width / height } else { 1.0 }
    }

    /// Which of the in-flight buffer slots the current frame writes to.
    pub fn frame_index(&self) -> usize {
        self.layout.frame_ctr as usize % FRAMES_IN_FLIGHT
    }

    /// Prepare the frame info for a new frame, timed by the wall clock.
    pub fn prepare(&mut self, camera: &FrameCamera) -> &FrameInfoLayout {
        let elapsed = self.start.elapsed().as_secs_f32();
        self.prepare_at(elapsed, camera)
    }

    /// Prepare the frame info for a new frame, `elapsed` seconds after the start.
    pub fn prepare_at(&mut self, elapsed: f32, camera: &FrameCamera) -> &FrameInfoLayout {
        let layout = &mut self.layout;
        layout.frame_ctr = layout.frame_ctr.wrapping_add(1);

        layout.time_delta = elapsed - layout.time_second;
        layout.time_second = elapsed;
        if layout.time_delta > 0.0 {
            layout.framerate = 1.0 / layout.time_delta;
        }

        let view_proj = camera.view_proj();
        layout.proj_matrix = camera.proj.into();
        layout.inv_proj_matrix = invert_or_identity(camera.proj).into();
        layout.view_matrix = camera.view.into();
        layout.inv_view_matrix = invert_or_identity(camera.view).into();
        layout.view_proj_matrix = view_proj.into();
        layout.inv_view_proj_matrix = invert_or_identity(view_proj).into();
        layout.prev_view_proj_matrix = self.prev_view_proj.into();

        layout.camera_pos = camera.position.into();
        layout.camera_near = camera.near;
        layout.camera_far = camera.far;

        self.prev_view_proj = view_proj;
        log::trace!("prepared frame {}", layout.frame_ctr);
        &self.layout
    }

    /// Get the current frame info.
    pub fn layout(&self) -> &FrameInfoLayout {
        &self.layout
    }
}

/// The per-frame uniform buffer holding [`FrameInfoLayout`].
pub struct FrameInfoBuffer {
    buffer: GpuBuffer,
}

impl FrameInfoBuffer {
    pub fn new(label: &str, gpu: &GpuContext) -> Self {
        let size = size_of::<FrameInfoLayout>() as u64;
        Self {
            buffer: GpuBuffer::create_uniform_per_frame(label, gpu, size),
        }
    }

    /// Write the current frame info into its in-flight slot.
    ///
    /// Returns the dynamic offset to bind the buffer with for this frame.
    pub fn write(&self, gpu: &GpuContext, frame: &FrameInfo) -> BufferResult<u32> {
        let index = frame.frame_index();
        self.buffer.write_frame(gpu, index, frame.layout())?;
        Ok(self.buffer.slot_offset(index)? as u32)
    }

    /// Get the buffer.
    pub fn buffer(&self) -> &GpuBuffer {
        &self.buffer
    }
}

fn invert_or_identity(matrix: Matrix4<f32>) -> Matrix4<f32> {
    matrix.invert().unwrap_or(Matrix4::identity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::gpu::noop_gpu;
    use cgmath::{Deg, Point3, perspective};

    fn camera_at(eye: Point3<f32>) -> FrameCamera {
        FrameCamera {
            view: Matrix4::look_at_rh(eye, Point3::new(0.0, 0.0, 0.0), Vector3::unit_y()),
            proj: perspective(Deg(60.0), 16.0 / 9.0, 0.1, 100.0),
            position: Vector3::new(eye.x, eye.y, eye.z),
            near: 0.1,
            far: 100.0,
        }
    }

    #[test]
    fn previous_view_proj_lags_one_frame() {
        let mut frame = FrameInfo::new(1280, 720);
        let first = camera_at(Point3::new(0.0, 1.0, 5.0));
        let second = camera_at(Point3::new(3.0, 1.0, 5.0));

        let identity: [[f32; 4]; 4] = Matrix4::<f32>::identity().into();
        let first_view_proj: [[f32; 4]; 4] = first.view_proj().into();
        let second_view_proj: [[f32; 4]; 4] = second.view_proj().into();

        let layout = *frame.prepare_at(0.016, &first);
        assert_eq!(layout.prev_view_proj_matrix, identity);
        assert_eq!(layout.view_proj_matrix, first_view_proj);

        let layout = *frame.prepare_at(0.032, &second);
        assert_eq!(layout.prev_view_proj_matrix, first_view_proj);
        assert_eq!(layout.view_proj_matrix, second_view_proj);
    }

    #[test]
    fn timing_is_derived_from_elapsed_time() {
        let mut frame = FrameInfo::new(100, 100);
        let camera = camera_at(Point3::new(0.0, 0.0, 1.0));

        frame.prepare_at(1.0, &camera);
        let layout = frame.prepare_at(1.5, &camera);
        assert_eq!(layout.frame_ctr, 2);
        assert_eq!(layout.time_second, 1.5);
        assert_eq!(layout.time_delta, 0.5);
        assert_eq!(layout.framerate, 2.0);
    }

    #[test]
    fn zero_delta_keeps_the_last_framerate() {
        let mut frame = FrameInfo::new(100, 100);
        let camera = camera_at(Point3::new(0.0, 0.0, 1.0));
        frame.prepare_at(0.25, &camera);
        let layout = frame.prepare_at(0.25, &camera);
        assert_eq!(layout.framerate, 4.0);
    }

    #[test]
    fn camera_fields_are_copied() {
        let mut frame = FrameInfo::new(100, 100);
        let camera = camera_at(Point3::new(1.0, 2.0, 3.0));
        let layout = frame.prepare_at(0.1, &camera);
        assert_eq!(layout.camera_pos, [1.0, 2.0, 3.0]);
        assert_eq!(layout.camera_near, 0.1);
        assert_eq!(layout.camera_far, 100.0);
    }

    #[test]
    fn frame_index_cycles_through_frames_in_flight() {
        let mut frame = FrameInfo::new(100, 50);
        let camera = camera_at(Point3::new(0.0, 0.0, 1.0));
        let indices: Vec<usize> = (0..4)
            .map(|i| {
                frame.prepare_at(i as f32, &camera);
                frame.frame_index()
            })
            .collect();
        assert_eq!(indices, vec![1, 2, 0, 1]);
        assert_eq!(frame.aspect_ratio(), 2.0);
    }

    #[test]
    fn buffer_write_returns_the_slot_of_the_current_frame() {
        let gpu = noop_gpu();
        let buffer = FrameInfoBuffer::new("frame_info", &gpu);
        let mut frame = FrameInfo::new(640, 480);
        let camera = camera_at(Point3::new(0.0, 0.0, 1.0));

        let mut offsets = vec![buffer.write(&gpu, &frame).unwrap()];
        for i in 1..4 {
            frame.prepare_at(i as f32 * 0.016, &camera);
            offsets.push(buffer.write(&gpu, &frame).unwrap());
        }
        assert_eq!(offsets, vec![0, 512, 1024, 0]);
        assert_eq!(buffer.buffer().slot_size(), 512);
    }
}
