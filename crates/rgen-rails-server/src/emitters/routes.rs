use log::warn;
use minijinja::{Value, context};
use rgen_core::GeneratorError;
use rgen_core::ir::Session;
use rgen_core::naming::{sentence, snake};

use super::{Preamble, environment, template_error};
use crate::classifier::{RouteEntry, group_paths, paramify, sort_paths};
use crate::type_mapper::RubyNames;

/// Emit `config/routes/<service>_v<major>.rb`: every route, grouped by first
/// path segment and ordered by specificity within each group.
pub fn emit_routes(
    session: &Session<'_>,
    names: &RubyNames<'_>,
    preamble: &Preamble,
) -> Result<String, GeneratorError> {
    let service = session.service();
    let routes: Vec<RouteEntry<'_>> = service
        .all_http_paths()
        .map(|(interface, http_path)| RouteEntry {
            http_path,
            interface,
        })
        .collect();

    let groups: Vec<Value> = group_paths(routes)
        .into_iter()
        .map(|(group, entries)| {
            let routes: Vec<Value> = sort_paths(entries)
                .iter()
                .flat_map(|entry| build_route_lines(session, names, entry))
                .collect();
            context! {
                title => sentence(&group),
                routes => routes,
            }
        })
        .collect();

    let version = names.version_segment();
    let version_module = if names.config().include_version {
        format!("module: '{version}', ")
    } else {
        String::new()
    };

    let env = environment()?;
    let tmpl = env.get_template("routes.rb.j2").map_err(template_error)?;
    tmpl.render(context! {
        preamble => preamble.as_str(),
        service_dir => names.service_dir(),
        version_module => version_module,
        version => version,
        groups => groups,
    })
    .map_err(template_error)
}

fn build_route_lines(
    session: &Session<'_>,
    names: &RubyNames<'_>,
    entry: &RouteEntry<'_>,
) -> Vec<Value> {
    let path = paramify(&entry.http_path.path);
    let controller = names.controller_name(entry.interface);

    entry
        .http_path
        .methods
        .iter()
        .filter_map(|http_method| {
            let Some(method) = session.method(&http_method.name) else {
                warn!(
                    "route {} {} refers to unknown method `{}`; skipping",
                    http_method.verb.as_str(),
                    entry.http_path.path,
                    http_method.name
                );
                return None;
            };
            Some(context! {
                verb => http_method.verb.as_str(),
                path => path.clone(),
                target => format!("{controller}#{}", snake(&method.name)),
            })
        })
        .collect()
}
