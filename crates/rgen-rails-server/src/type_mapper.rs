use rgen_core::config::RailsConfig;
use rgen_core::ir::{Interface, Service};
use rgen_core::naming::{pascal, plural, snake};

/// Maps service description names to Ruby constants, identifiers and file paths.
#[derive(Debug, Clone, Copy)]
pub struct RubyNames<'a> {
    service: &'a Service,
    config: &'a RailsConfig,
}

impl<'a> RubyNames<'a> {
    pub fn new(service: &'a Service, config: &'a RailsConfig) -> Self {
        Self { service, config }
    }

    pub fn config(&self) -> &'a RailsConfig {
        self.config
    }

    /// `basketry_example`
    pub fn service_dir(&self) -> String {
        snake(&self.service.title)
    }

    /// `v1`
    pub fn version_segment(&self) -> String {
        format!("v{}", self.service.major_version)
    }

    /// `BasketryExample`, or `BasketryExample::V1` with versioning enabled.
    pub fn root_module(&self) -> String {
        let title = pascal(&self.service.title);
        if self.config.include_version {
            format!("{title}::V{}", self.service.major_version)
        } else {
            title
        }
    }

    /// Root module followed by an optional sub-module.
    pub fn namespace(&self, sub_module: Option<&str>) -> String {
        match sub_module.filter(|s| !s.is_empty()) {
            Some(sub) => format!("{}::{}", self.root_module(), pascal(sub)),
            None => self.root_module(),
        }
    }

    /// Whether a name refers to a declared type or enum.
    pub fn is_declared(&self, type_name: &str) -> bool {
        self.service.type_by_name(type_name).is_some()
            || self.service.enum_by_name(type_name).is_some()
    }

    /// Fully qualified constant for a declared type or enum.
    pub fn type_constant(&self, type_name: &str) -> String {
        let module = if self.service.enum_by_name(type_name).is_some() {
            &self.config.enums_module
        } else {
            &self.config.types_module
        };
        format!("{}::{}", self.namespace(Some(module)), pascal(type_name))
    }

    /// Fully qualified service locator constant.
    pub fn service_locator(&self) -> String {
        format!(
            "{}::ServiceLocator",
            self.namespace(self.config.services_module.as_deref())
        )
    }

    /// Directory holding controllers, helpers and the base controller interface.
    pub fn controller_dir(&self) -> Vec<String> {
        let mut dir = vec![
            "app".to_string(),
            "controllers".to_string(),
            self.service_dir(),
        ];
        if self.config.include_version {
            dir.push(self.version_segment());
        }
        dir
    }

    /// `config/routes/basketry_example_v1.rb`
    pub fn routes_path(&self) -> Vec<String> {
        vec![
            "config".to_string(),
            "routes".to_string(),
            format!("{}_{}.rb", self.service_dir(), self.version_segment()),
        ]
    }

    /// `gizmos`: controller name as used in route targets and file names.
    pub fn controller_name(&self, int: &Interface) -> String {
        snake(&plural(&int.name))
    }

    /// `GizmosController`
    pub fn controller_class(&self, int: &Interface) -> String {
        format!("{}Controller", pascal(&plural(&int.name)))
    }

    pub fn controller_path(&self, int: &Interface) -> Vec<String> {
        let mut path = self.controller_dir();
        path.push(format!("{}_controller.rb", self.controller_name(int)));
        path
    }

    /// `gizmo_service`: accessor on the service locator.
    pub fn service_accessor(&self, int: &Interface) -> String {
        snake(&format!("{}_service", int.name))
    }

    /// Sorbet type for a set of error constants.
    pub fn error_type(&self, constants: &[String]) -> String {
        match constants {
            [] => "T.untyped".to_string(),
            [single] => single.clone(),
            many => format!("T.any({})", many.join(", ")),
        }
    }
}
