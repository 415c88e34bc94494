pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalTemplateSource, RunSettings};
pub use crate::core::{
    engine::{EngineOptions, RunSummary, TopologyEngine},
    frame::{encode_frame, FrameDecoder},
    registry::ZoneRegistry,
    render::{Renderer, TemplatePaths},
};
pub use crate::domain::model::{Role, TopologyRecord};
pub use crate::utils::error::{Result, TopologyError};
