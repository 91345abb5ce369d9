use minijinja::{Value, context};
use rgen_core::GeneratorError;
use rgen_core::ir::{HttpMethod, Interface, Method, Session};
use rgen_core::naming::snake;

use super::{Preamble, environment, template_error};
use crate::binder::ParameterBinder;
use crate::marshal::CastRegistry;
use crate::marshal::routines::outbound_value;
use crate::type_mapper::RubyNames;

/// Emit the controller for one interface. Cast helpers referenced by the
/// actions are registered in `casts`.
pub fn emit_controller(
    session: &Session<'_>,
    names: &RubyNames<'_>,
    preamble: &Preamble,
    casts: &mut CastRegistry,
    interface: &Interface,
) -> Result<String, GeneratorError> {
    let mut binder = ParameterBinder::new(session, casts);
    let actions: Vec<Value> = interface
        .methods
        .iter()
        .filter_map(|method| {
            session
                .http_method(&method.name)
                .map(|http_method| build_action(names, &mut binder, method, http_method))
        })
        .collect();

    let env = environment()?;
    let tmpl = env.get_template("controller.rb.j2").map_err(template_error)?;
    tmpl.render(context! {
        preamble => preamble.as_str(),
        module => names.root_module(),
        class => names.controller_class(interface),
        base => names.config().base_controller(),
        service_accessor => names.service_accessor(interface),
        actions => actions,
    })
    .map_err(template_error)
}

fn build_action(
    names: &RubyNames<'_>,
    binder: &mut ParameterBinder<'_, '_>,
    method: &Method,
    http_method: &HttpMethod,
) -> Value {
    let json = method
        .return_type
        .as_ref()
        .map(|ty| outbound_value(names, ty, "response"));

    context! {
        name => snake(&method.name),
        bindings => binder.bind_all(method),
        json => json,
        status => http_method.success_code,
    }
}
