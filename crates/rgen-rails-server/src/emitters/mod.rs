pub mod base_controller;
pub mod controllers;
pub mod helpers;
pub mod routes;

use minijinja::{Environment, context};
use rgen_core::GeneratorError;
use rgen_core::config::RailsConfig;
use rgen_core::ir::Service;

pub(crate) fn template_error(err: minijinja::Error) -> GeneratorError {
    GeneratorError::Template(err.to_string())
}

/// Template environment holding every Ruby template.
///
/// Block tags swallow their own line, so indentation in the generated code is
/// exactly the indentation written in the template.
pub(crate) fn environment() -> Result<Environment<'static>, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.add_template("header.rb.j2", include_str!("../../templates/header.rb.j2"))
        .map_err(template_error)?;
    env.add_template("routes.rb.j2", include_str!("../../templates/routes.rb.j2"))
        .map_err(template_error)?;
    env.add_template(
        "controller.rb.j2",
        include_str!("../../templates/controller.rb.j2"),
    )
    .map_err(template_error)?;
    env.add_template(
        "controller_helpers.rb.j2",
        include_str!("../../templates/controller_helpers.rb.j2"),
    )
    .map_err(template_error)?;
    env.add_template(
        "base_controller_interface.rb.j2",
        include_str!("../../templates/base_controller_interface.rb.j2"),
    )
    .map_err(template_error)?;
    Ok(env)
}

/// Text opening every generated file: the generated-code banner followed by
/// the configured magic comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble {
    text: String,
}

impl Preamble {
    pub fn render(service: &Service, config: &RailsConfig) -> Result<Self, GeneratorError> {
        let env = environment()?;
        let text = env
            .get_template("header.rb.j2")
            .and_then(|tmpl| {
                tmpl.render(context! {
                    version => env!("CARGO_PKG_VERSION"),
                    source_path => service.source_path.clone(),
                    magic_comments => config.magic_comments.clone(),
                })
            })
            .map_err(template_error)?;
        Ok(Self { text })
    }

    /// The preamble, ending with a blank line.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}
