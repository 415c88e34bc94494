use crate::domain::model::{EndpointContext, Role};
use crate::domain::ports::TemplateSource;
use crate::utils::error::{Result, TopologyError};
use handlebars::Handlebars;
use std::io::Write;

/// Template file locations, one per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub root: String,
    pub branch: String,
    pub leaf: String,
}

impl TemplatePaths {
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Root => &self.root,
            Role::Branch => &self.branch,
            Role::Leaf => &self.leaf,
        }
    }
}

/// Compiled per-role templates.
///
/// Templates see `{{Name}}` (the endpoint) and `{{NameHex}}` (lowercase hex
/// of its bytes). Strict mode is on, so any other reference fails the render.
pub struct Renderer {
    templates: Handlebars<'static>,
}

impl Renderer {
    fn empty() -> Self {
        let mut templates = Handlebars::new();
        templates.set_strict_mode(true);
        templates.register_escape_fn(handlebars::no_escape);
        Self { templates }
    }

    /// Loads and compiles all three templates up front.
    pub fn load<S: TemplateSource>(source: &S, paths: &TemplatePaths) -> Result<Self> {
        let mut renderer = Self::empty();

        for role in Role::ALL {
            let path = paths.get(role);
            let text = source.load(path).map_err(|e| TopologyError::TemplateLoad {
                role: role.to_string(),
                path: path.to_string(),
                message: e.to_string(),
            })?;
            renderer.register(role, path, &text)?;
            tracing::debug!("Loaded {} template from {} ({} bytes)", role, path, text.len());
        }

        Ok(renderer)
    }

    /// Builds a renderer from in-memory template text.
    pub fn from_strings(root: &str, branch: &str, leaf: &str) -> Result<Self> {
        let mut renderer = Self::empty();
        renderer.register(Role::Root, "<inline>", root)?;
        renderer.register(Role::Branch, "<inline>", branch)?;
        renderer.register(Role::Leaf, "<inline>", leaf)?;
        Ok(renderer)
    }

    fn register(&mut self, role: Role, path: &str, text: &str) -> Result<()> {
        self.templates
            .register_template_string(role.as_str(), text)
            .map_err(|e| TopologyError::TemplateLoad {
                role: role.to_string(),
                path: path.to_string(),
                message: e.to_string(),
            })
    }

    /// Renders the role's template once per endpoint, in endpoint order.
    /// Returns the number of renders written.
    pub fn render_zone<W: Write>(
        &self,
        zone: &str,
        role: Role,
        endpoints: &[String],
        out: &mut W,
    ) -> Result<usize> {
        for endpoint in endpoints {
            let context = EndpointContext::new(endpoint);
            let text = self
                .templates
                .render(role.as_str(), &context)
                .map_err(|e| TopologyError::Render {
                    zone: zone.to_string(),
                    endpoint: endpoint.clone(),
                    message: e.to_string(),
                })?;
            out.write_all(text.as_bytes())?;
        }

        Ok(endpoints.len())
    }
}
