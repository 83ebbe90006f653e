use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// 1 disables multisampling.
    pub sample_count: u32,
    pub shadow_map_size: u32,
    pub hot_reload_shaders: bool,
    pub vsync: bool,
    pub shader_folder: PathBuf,
}

impl RenderConfig {
    pub const SUPPORTED_SAMPLE_COUNTS: [u32; 2] = [1, 4];
    pub const MIN_SHADOW_MAP_SIZE: u32 = 256;
    pub const MAX_SHADOW_MAP_SIZE: u32 = 8192;

    pub fn shared_shader_folder(&self) -> PathBuf {
        self.shader_folder.join("shared")
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            sample_count: 4,
            shadow_map_size: 2048,
            hot_reload_shaders: false,
            vsync: true,
            shader_folder: PathBuf::from("assets/shaders"),
        }
    }
}
