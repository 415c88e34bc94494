pub mod cli;
pub mod toml_config;

use crate::core::engine::EngineOptions;
use crate::core::render::TemplatePaths;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_required_field, Validate};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "topo-render")]
#[command(about = "Render per-endpoint config from a length-framed zone topology stream")]
pub struct CliConfig {
    /// Template for zones without a parent
    #[arg(long, value_name = "FILE")]
    pub root: Option<String>,

    /// Template for zones with both a parent and children
    #[arg(long, value_name = "FILE")]
    pub branch: Option<String>,

    /// Template for zones with a parent and no children
    #[arg(long, value_name = "FILE")]
    pub leaf: Option<String>,

    /// TOML settings file; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read frames from FILE instead of stdin
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Reject frames longer than N bytes (0 = unbounded)
    #[arg(long, value_name = "N")]
    pub max_frame_length: Option<usize>,

    /// Emit zones ordered by name
    #[arg(long)]
    pub sort_zones: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log process resource usage after each phase")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn layer(&self) -> ConfigLayer {
        ConfigLayer {
            root: self.root.clone(),
            branch: self.branch.clone(),
            leaf: self.leaf.clone(),
            max_frame_length: self.max_frame_length,
            sort_zones: self.sort_zones.then_some(true),
        }
    }

    /// Merges flags over the settings file, if one was given.
    pub fn resolve(&self) -> Result<RunSettings> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading settings from {}", path.display());
                Some(TomlConfig::from_file(path)?)
            }
            None => None,
        };

        let mut settings = RunSettings::from_layers(self.layer(), file.as_ref())?;
        settings.options.monitor = self.monitor;
        Ok(settings)
    }
}

/// Partially specified settings from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub root: Option<String>,
    pub branch: Option<String>,
    pub leaf: Option<String>,
    pub max_frame_length: Option<usize>,
    pub sort_zones: Option<bool>,
}

impl ConfigLayer {
    /// Fills unset values from `fallback`.
    pub fn or(self, fallback: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            root: self.root.or(fallback.root),
            branch: self.branch.or(fallback.branch),
            leaf: self.leaf.or(fallback.leaf),
            max_frame_length: self.max_frame_length.or(fallback.max_frame_length),
            sort_zones: self.sort_zones.or(fallback.sort_zones),
        }
    }
}

impl From<&TomlConfig> for ConfigLayer {
    fn from(config: &TomlConfig) -> Self {
        ConfigLayer {
            root: config.templates.root.clone(),
            branch: config.templates.branch.clone(),
            leaf: config.templates.leaf.clone(),
            max_frame_length: config.input.max_frame_length,
            sort_zones: config.output.sort_zones,
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub templates: TemplatePaths,
    pub options: EngineOptions,
}

impl RunSettings {
    pub fn from_layers(overrides: ConfigLayer, file: Option<&TomlConfig>) -> Result<Self> {
        let merged = match file {
            Some(config) => overrides.or(ConfigLayer::from(config)),
            None => overrides,
        };

        let settings = RunSettings {
            templates: TemplatePaths {
                root: validate_required_field("root", &merged.root)?.to_string(),
                branch: validate_required_field("branch", &merged.branch)?.to_string(),
                leaf: validate_required_field("leaf", &merged.leaf)?.to_string(),
            },
            options: EngineOptions {
                max_frame_length: merged.max_frame_length.filter(|&n| n > 0),
                sort_zones: merged.sort_zones.unwrap_or(false),
                monitor: false,
            },
        };

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for RunSettings {
    fn validate(&self) -> Result<()> {
        validate_path("root", &self.templates.root)?;
        validate_path("branch", &self.templates.branch)?;
        validate_path("leaf", &self.templates.leaf)?;
        Ok(())
    }
}
