use std::io;

/// Supplies raw template text for a configured path.
pub trait TemplateSource {
    fn load(&self, path: &str) -> io::Result<String>;
}
