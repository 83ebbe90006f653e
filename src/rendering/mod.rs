pub mod bind_group_builder;
pub mod config;
pub mod draw_list;
pub mod draw_storage_buffer;
pub mod global_uniform;
pub mod overlay_renderer;
pub mod passes;
pub mod render_common;
pub mod render_mesh;
pub mod renderer;
pub mod shader_loader;
pub mod texture;
