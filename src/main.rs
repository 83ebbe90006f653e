use anyhow::Result;

mod camera;
mod config;
mod controls;
mod court;
mod engine;
mod geometry;
mod math;
mod overlay;
mod rendering;
mod scene_graph;
mod state;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = config::ViewerConfig::from_env()?;
    log::info!("Starting {} at {}x{}", config.title, config.width, config.height);

    pollster::block_on(window::run(config))?;

    Ok(())
}
