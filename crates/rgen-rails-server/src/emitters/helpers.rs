use minijinja::context;
use rgen_core::GeneratorError;
use rgen_core::ir::Service;

use super::{Preamble, environment, template_error};
use crate::marshal::CastRegistry;
use crate::marshal::routines::{
    Routine, array_cast, enum_inbound, enum_outbound, scalar_cast, type_inbound, type_outbound,
};
use crate::type_mapper::RubyNames;

/// Emit `controller_helpers.rb`: conversion routines for every declared type
/// and enum, then the cast helpers registered while emitting controllers.
pub fn emit_helpers(
    service: &Service,
    names: &RubyNames<'_>,
    preamble: &Preamble,
    casts: &CastRegistry,
) -> Result<String, GeneratorError> {
    let env = environment()?;
    let tmpl = env
        .get_template("controller_helpers.rb.j2")
        .map_err(template_error)?;

    tmpl.render(context! {
        preamble => preamble.as_str(),
        module => names.root_module(),
        routines => collect_routines(service, names, casts),
    })
    .map_err(template_error)
}

/// Types, then enums, then scalar casts, then array casts.
fn collect_routines(
    service: &Service,
    names: &RubyNames<'_>,
    casts: &CastRegistry,
) -> Vec<Routine> {
    let config = names.config();
    let mut routines = Vec::new();
    for ty in &service.types {
        routines.push(type_inbound(names, ty));
        routines.push(type_outbound(names, ty));
    }
    for e in &service.enums {
        routines.push(enum_inbound(names, e));
        routines.push(enum_outbound(e));
    }
    routines.extend(casts.scalars().map(|kind| scalar_cast(config, kind)));
    routines.extend(casts.arrays().map(|kind| array_cast(config, kind)));
    routines
}
