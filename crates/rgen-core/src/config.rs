use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level project configuration loaded from `.rgen.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RgenConfig {
    pub input: String,
    pub output: String,
    pub rails: RailsConfig,
}

impl Default for RgenConfig {
    fn default() -> Self {
        Self {
            input: "service.json".to_string(),
            output: ".".to_string(),
            rails: RailsConfig::default(),
        }
    }
}

/// Options for the Rails routes/controllers generator.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RailsConfig {
    /// Sub-module holding generated structs (`Title::Types::Gizmo`).
    pub types_module: String,
    /// Sub-module holding generated enums (`Title::Enums::Size`).
    pub enums_module: String,
    /// Sub-module holding the service locator. `None` places it at the service root.
    pub services_module: Option<String>,
    /// Embed `V<major>` in module names and `v<major>` in controller paths.
    pub include_version: bool,
    /// Primitive name → custom conversion function, replacing the default cast.
    pub types: IndexMap<String, String>,
    /// Superclass for generated controllers.
    pub base_controller: Option<String>,
    /// Comment lines (without `# `) prepended to every generated file.
    pub magic_comments: Vec<String>,
    /// Artifact identifiers to leave out of the output.
    pub exclude: Vec<String>,
}

impl Default for RailsConfig {
    fn default() -> Self {
        Self {
            types_module: "types".to_string(),
            enums_module: "enums".to_string(),
            services_module: None,
            include_version: false,
            types: IndexMap::new(),
            base_controller: None,
            magic_comments: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl RailsConfig {
    /// The configured controller superclass, defaulting to `ApplicationController`.
    pub fn base_controller(&self) -> &str {
        self.base_controller
            .as_deref()
            .unwrap_or("ApplicationController")
    }

    /// Custom conversion function configured for a primitive name, if any.
    pub fn type_override(&self, primitive: &str) -> Option<&str> {
        self.types.get(primitive).map(String::as_str)
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".rgen.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RgenConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: RgenConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# rgen configuration
input: service.json
output: .

rails:
  types_module: types
  enums_module: enums
  # services_module: services
  include_version: false
  types: {}
    # date-time: parse_timestamp     # primitive → custom conversion function
  # base_controller: Api::BaseController
  magic_comments: []
    # - "typed: true"
  exclude: []
    # - BaseControllerInterface      # or ServiceController, GizmosController, Routes, ControllerHelpers
"#
}
