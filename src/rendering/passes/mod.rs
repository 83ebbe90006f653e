pub mod forward_pass;
pub mod render_pass_context;
pub mod shadow_pass;
