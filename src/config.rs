use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};

use crate::rendering::config::RenderConfig;

const MSAA_SAMPLES: &str = "COURTSIDE_MSAA_SAMPLES";
const SHADOW_MAP_SIZE: &str = "COURTSIDE_SHADOW_MAP_SIZE";
const HOT_RELOAD: &str = "COURTSIDE_HOT_RELOAD";
const SHADER_DIR: &str = "COURTSIDE_SHADER_DIR";
const VSYNC: &str = "COURTSIDE_VSYNC";

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub render: RenderConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Courtside".to_string(),
            width: 1280,
            height: 720,
            render: RenderConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Applies `COURTSIDE_*` overrides fetched through `lookup`.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<()> {
        let render = &mut self.render;

        if let Some(value) = lookup(MSAA_SAMPLES) {
            let samples = parse_number(MSAA_SAMPLES, &value)?;
            if !RenderConfig::SUPPORTED_SAMPLE_COUNTS.contains(&samples) {
                bail!(
                    "{MSAA_SAMPLES} must be one of {:?}, got {samples}",
                    RenderConfig::SUPPORTED_SAMPLE_COUNTS
                );
            }
            render.sample_count = samples;
        }

        if let Some(value) = lookup(SHADOW_MAP_SIZE) {
            let size = parse_number(SHADOW_MAP_SIZE, &value)?;
            let range = RenderConfig::MIN_SHADOW_MAP_SIZE..=RenderConfig::MAX_SHADOW_MAP_SIZE;
            if !size.is_power_of_two() || !range.contains(&size) {
                bail!(
                    "{SHADOW_MAP_SIZE} must be a power of two between {} and {}, got {size}",
                    range.start(),
                    range.end()
                );
            }
            render.shadow_map_size = size;
        }

        if let Some(value) = lookup(HOT_RELOAD) {
            render.hot_reload_shaders = parse_flag(HOT_RELOAD, &value)?;
        }

        if let Some(value) = lookup(VSYNC) {
            render.vsync = parse_flag(VSYNC, &value)?;
        }

        if let Some(value) = lookup(SHADER_DIR) {
            if value.trim().is_empty() {
                bail!("{SHADER_DIR} must not be empty");
            }
            render.shader_folder = PathBuf::from(value);
        }

        Ok(())
    }
}

fn parse_number(name: &str, value: &str) -> anyhow::Result<u32> {
    value
        .trim()
        .parse()
        .with_context(|| format!("Invalid value for {name}: {value:?}"))
}

fn parse_flag(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("Invalid value for {name}: {value:?} (expected a boolean)")),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn with_env(vars: &[(&str, &str)]) -> anyhow::Result<ViewerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut config = ViewerConfig::default();
        config.apply_overrides(|name| vars.get(name).cloned())?;
        Ok(config)
    }

    #[test]
    fn defaults_without_overrides() {
        let config = with_env(&[]).unwrap();

        assert_eq!(config, ViewerConfig::default());
        assert_eq!(config.render.sample_count, 4);
        assert_eq!(config.render.shadow_map_size, 2048);
        assert!(!config.render.hot_reload_shaders);
    }

    #[test]
    fn overrides_are_applied() {
        let config = with_env(&[
            ("COURTSIDE_MSAA_SAMPLES", "1"),
            ("COURTSIDE_SHADOW_MAP_SIZE", " 4096 "),
            ("COURTSIDE_HOT_RELOAD", "true"),
            ("COURTSIDE_VSYNC", "off"),
            ("COURTSIDE_SHADER_DIR", "/tmp/shaders"),
        ])
        .unwrap();

        assert_eq!(config.render.sample_count, 1);
        assert_eq!(config.render.shadow_map_size, 4096);
        assert!(config.render.hot_reload_shaders);
        assert!(!config.render.vsync);
        assert_eq!(config.render.shader_folder, PathBuf::from("/tmp/shaders"));
        assert_eq!(
            config.render.shared_shader_folder(),
            PathBuf::from("/tmp/shaders/shared")
        );
    }

    #[test]
    fn invalid_values_name_the_variable() {
        for (name, value) in [
            ("COURTSIDE_MSAA_SAMPLES", "2"),
            ("COURTSIDE_MSAA_SAMPLES", "four"),
            ("COURTSIDE_SHADOW_MAP_SIZE", "1000"),
            ("COURTSIDE_SHADOW_MAP_SIZE", "128"),
            ("COURTSIDE_HOT_RELOAD", "maybe"),
            ("COURTSIDE_SHADER_DIR", " "),
        ] {
            let error = with_env(&[(name, value)]).unwrap_err();
            assert!(
                format!("{error:#}").contains(name),
                "{name}={value}: {error:#}"
            );
        }
    }
}
