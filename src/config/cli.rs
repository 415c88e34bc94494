use crate::core::TemplateSource;
use std::fs;
use std::io;

/// Reads template text straight from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTemplateSource;

impl LocalTemplateSource {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for LocalTemplateSource {
    fn load(&self, path: &str) -> io::Result<String> {
        fs::read_to_string(path)
    }
}
