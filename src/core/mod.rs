pub mod engine;
pub mod frame;
pub mod registry;
pub mod render;

pub use crate::domain::ports::TemplateSource;
pub use crate::utils::error::Result;
