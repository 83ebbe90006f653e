use wgpu::{
    BindGroupEntry, BindGroupLayoutEntry, BindingResource, BindingType, BufferBindingType,
    SamplerBindingType, ShaderStages, TextureSampleType, TextureViewDimension,
};

/// Builds a bind group layout and a matching bind group from one list of
/// bindings.
pub struct BindGroupBuilder<'a> {
    label: &'a str,
    visibility: ShaderStages,
    layout_entries: Vec<BindGroupLayoutEntry>,
    entries: Vec<BindGroupEntry<'a>>,
}

impl<'a> BindGroupBuilder<'a> {
    pub fn new(label: &'a str, visibility: ShaderStages) -> Self {
        Self {
            label,
            visibility,
            layout_entries: Vec::new(),
            entries: Vec::new(),
        }
    }

    fn entry(mut self, binding: u32, ty: BindingType, resource: BindingResource<'a>) -> Self {
        self.layout_entries.push(BindGroupLayoutEntry {
            binding,
            visibility: self.visibility,
            ty,
            count: None,
        });
        self.entries.push(BindGroupEntry { binding, resource });
        self
    }

    pub fn uniform(self, binding: u32, resource: BindingResource<'a>) -> Self {
        self.entry(
            binding,
            BindingType::Buffer {
                ty: BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            resource,
        )
    }

    pub fn storage_r(self, binding: u32, resource: BindingResource<'a>) -> Self {
        self.entry(
            binding,
            BindingType::Buffer {
                ty: BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            resource,
        )
    }

    pub fn depth_texture(self, binding: u32, view: &'a wgpu::TextureView) -> Self {
        self.entry(
            binding,
            BindingType::Texture {
                sample_type: TextureSampleType::Depth,
                view_dimension: TextureViewDimension::D2,
                multisampled: false,
            },
            BindingResource::TextureView(view),
        )
    }

    pub fn comparison_sampler(self, binding: u32, sampler: &'a wgpu::Sampler) -> Self {
        self.entry(
            binding,
            BindingType::Sampler(SamplerBindingType::Comparison),
            BindingResource::Sampler(sampler),
        )
    }

    pub fn build_layout(&self, device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{} bind group layout", self.label)),
            entries: &self.layout_entries,
        })
    }

    /// Creates a bind group against an existing layout, e.g. after a buffer
    /// it references has been reallocated.
    pub fn build_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} bind group", self.label)),
            layout,
            entries: &self.entries,
        })
    }

    pub fn build(self, device: &wgpu::Device) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
        let layout = self.build_layout(device);
        let group = self.build_group(device, &layout);
        (layout, group)
    }
}
