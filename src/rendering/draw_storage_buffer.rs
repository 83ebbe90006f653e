use wgpu::{BufferUsages, ShaderStages};

use crate::rendering::{bind_group_builder::BindGroupBuilder, draw_list::DrawData};

const LABEL: &str = "Draw storage";

/// Storage buffer holding one [`DrawData`] per draw. Grows on demand.
pub struct DrawStorageBuffer {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    capacity: u64,
}

impl DrawStorageBuffer {
    pub fn new(device: &wgpu::Device, initial_capacity: u64) -> Self {
        let capacity = initial_capacity.max(1);
        let buffer = Self::create_buffer(device, capacity);
        let (bind_group_layout, bind_group) = Self::builder(&buffer).build(device);

        Self {
            buffer,
            bind_group_layout,
            bind_group,
            capacity,
        }
    }

    fn builder(buffer: &wgpu::Buffer) -> BindGroupBuilder<'_> {
        BindGroupBuilder::new(LABEL, ShaderStages::VERTEX_FRAGMENT)
            .storage_r(0, buffer.as_entire_binding())
    }

    fn create_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Draw storage buffer"),
            size: std::mem::size_of::<DrawData>() as u64 * capacity,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    pub fn ensure_capacity(&mut self, device: &wgpu::Device, required_capacity: u64) {
        if required_capacity > self.capacity {
            let new_capacity = required_capacity * 2;
            log::debug!(
                "Growing draw storage buffer from {} to {} draws",
                self.capacity,
                new_capacity
            );

            self.buffer = Self::create_buffer(device, new_capacity);
            self.bind_group =
                Self::builder(&self.buffer).build_group(device, &self.bind_group_layout);
            self.capacity = new_capacity;
        }
    }

    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, draws: &[DrawData]) {
        if draws.is_empty() {
            return;
        }

        self.ensure_capacity(device, draws.len() as u64);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(draws));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
