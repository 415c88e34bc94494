use crate::utils::error::{Result, TopologyError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Settings file. Every section and key is optional; command line flags
/// take precedence over anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplatesConfig {
    pub root: Option<String>,
    pub branch: Option<String>,
    pub leaf: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// 0 means unbounded.
    pub max_frame_length: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub sort_zones: Option<bool>,
}

impl TomlConfig {
    /// Loads a settings file. Relative template paths are resolved against
    /// the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TopologyError::config(format!("cannot read {}: {}", path.display(), e))
        })?;

        let mut config = Self::from_toml_str(&content)?;
        if let Some(dir) = path.parent() {
            config.templates.resolve_relative_to(dir);
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);

        toml::from_str(&processed)
            .map_err(|e| TopologyError::config(format!("TOML parsing error: {}", e)))
    }
}

impl TemplatesConfig {
    fn resolve_relative_to(&mut self, dir: &Path) {
        for path in [&mut self.root, &mut self.branch, &mut self.leaf]
            .into_iter()
            .flatten()
        {
            if Path::new(path.as_str()).is_relative() && !dir.as_os_str().is_empty() {
                *path = dir.join(PathBuf::from(path.as_str())).to_string_lossy().into_owned();
            }
        }
    }
}

/// Replaces `${VAR}` with the environment value; unknown variables are
/// left as written.
fn substitute_env_vars(content: &str) -> String {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .into_owned()
}
