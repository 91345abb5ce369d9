use std::collections::HashSet;

use log::{debug, warn};
use rgen_core::config::RailsConfig;
use rgen_core::ir::{Service, Session};
use rgen_core::{CodeGenerator, GeneratedFile, GeneratorError};

use crate::emitters::{self, Preamble};
use crate::marshal::CastRegistry;
use crate::type_mapper::RubyNames;

/// A logical output that can be excluded by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Artifact {
    Routes,
    Controller { class: String },
    ControllerHelpers,
    BaseControllerInterface,
}

impl Artifact {
    /// Whether an exclusion identifier names this artifact. `ServiceController`
    /// names every controller.
    pub fn matches(&self, identifier: &str) -> bool {
        match self {
            Self::Routes => identifier == "Routes",
            Self::Controller { class } => identifier == "ServiceController" || identifier == class,
            Self::ControllerHelpers => identifier == "ControllerHelpers",
            Self::BaseControllerInterface => identifier == "BaseControllerInterface",
        }
    }
}

const FIXED_IDENTIFIERS: [&str; 4] = [
    "Routes",
    "ControllerHelpers",
    "BaseControllerInterface",
    "ServiceController",
];

/// Rails routes and controller generator.
pub struct RailsServerGenerator;

impl RailsServerGenerator {
    /// Every artifact of a run with its file, in output order. Nothing is excluded.
    pub fn artifacts(
        &self,
        service: &Service,
        config: &RailsConfig,
    ) -> Result<Vec<(Artifact, GeneratedFile)>, GeneratorError> {
        let session = Session::new(service);
        let names = RubyNames::new(service, config);
        let preamble = Preamble::render(service, config)?;
        let mut casts = CastRegistry::new();

        let mut artifacts = vec![(
            Artifact::Routes,
            GeneratedFile {
                path: names.routes_path(),
                content: emitters::routes::emit_routes(&session, &names, &preamble)?,
            },
        )];

        // Controllers register the cast helpers, so they render before the helper file.
        for interface in &service.interfaces {
            let content = emitters::controllers::emit_controller(
                &session,
                &names,
                &preamble,
                &mut casts,
                interface,
            )?;
            artifacts.push((
                Artifact::Controller {
                    class: names.controller_class(interface),
                },
                GeneratedFile {
                    path: names.controller_path(interface),
                    content,
                },
            ));
        }

        let mut helpers_path = names.controller_dir();
        helpers_path.push("controller_helpers.rb".to_string());
        artifacts.push((
            Artifact::ControllerHelpers,
            GeneratedFile {
                path: helpers_path,
                content: emitters::helpers::emit_helpers(service, &names, &preamble, &casts)?,
            },
        ));

        let mut base_path = names.controller_dir();
        base_path.push("base_controller_interface.rb".to_string());
        artifacts.push((
            Artifact::BaseControllerInterface,
            GeneratedFile {
                path: base_path,
                content: emitters::base_controller::emit_base_controller_interface(
                    service, &names, &preamble,
                )?,
            },
        ));

        Ok(artifacts)
    }
}

impl CodeGenerator for RailsServerGenerator {
    type Config = RailsConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        service: &Service,
        config: &RailsConfig,
    ) -> Result<Vec<GeneratedFile>, GeneratorError> {
        let artifacts = self.artifacts(service, config)?;

        for identifier in &config.exclude {
            let known = FIXED_IDENTIFIERS.contains(&identifier.as_str())
                || artifacts.iter().any(|(a, _)| a.matches(identifier));
            if !known {
                warn!("exclusion `{identifier}` does not name any generated file; ignoring");
            }
        }

        let files: Vec<GeneratedFile> = artifacts
            .into_iter()
            .filter(|(artifact, _)| !config.exclude.iter().any(|id| artifact.matches(id)))
            .map(|(_, file)| file)
            .collect();

        let mut seen = HashSet::new();
        for file in &files {
            let path = file.display_path();
            if !seen.insert(path.clone()) {
                return Err(GeneratorError::DuplicatePath(path));
            }
            debug!("generated {path} ({} bytes)", file.content.len());
        }

        Ok(files)
    }
}
