use indexmap::IndexSet;
use minijinja::context;
use rgen_core::GeneratorError;
use rgen_core::ir::Service;

use super::{Preamble, environment, template_error};
use crate::type_mapper::RubyNames;

/// Emit `base_controller_interface.rb`: the Sorbet interface every generated
/// controller expects from its base class, with an implementation template.
pub fn emit_base_controller_interface(
    service: &Service,
    names: &RubyNames<'_>,
    preamble: &Preamble,
) -> Result<String, GeneratorError> {
    let constants: Vec<String> = error_type_names(service)
        .into_iter()
        .filter(|name| service.type_by_name(name).is_some())
        .map(|name| names.type_constant(name))
        .collect();

    let env = environment()?;
    let tmpl = env
        .get_template("base_controller_interface.rb.j2")
        .map_err(template_error)?;
    tmpl.render(context! {
        preamble => preamble.as_str(),
        module => names.root_module(),
        service_locator => names.service_locator(),
        error_type => names.error_type(&constants),
    })
    .map_err(template_error)
}

/// Distinct element types of the array-valued `errors` property of every
/// method return type, in first-seen order.
pub fn error_type_names(service: &Service) -> IndexSet<&str> {
    service
        .all_methods()
        .filter_map(|(_, method)| method.return_type.as_ref())
        .filter_map(|ret| service.type_by_name(&ret.type_name))
        .filter_map(|ty| {
            ty.properties
                .iter()
                .find(|p| p.ty.is_array && p.name.eq_ignore_ascii_case("errors"))
        })
        .map(|p| p.ty.type_name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgen_core::config::RailsConfig;
    use rgen_core::ir::{Enum, Interface, Method, Property, Protocols, Type, TypeRef};

    fn method(name: &str, ret: Option<&str>) -> Method {
        Method {
            name: name.to_string(),
            parameters: vec![],
            return_type: ret.map(TypeRef::named),
        }
    }

    fn response(name: &str, error: &str) -> Type {
        Type {
            name: name.to_string(),
            properties: vec![
                Property {
                    name: "data".to_string(),
                    ty: TypeRef::primitive("string"),
                },
                Property {
                    name: "Errors".to_string(),
                    ty: TypeRef::named(error).array(),
                },
            ],
        }
    }

    fn error(name: &str) -> Type {
        Type {
            name: name.to_string(),
            properties: vec![],
        }
    }

    fn service(methods: Vec<Method>, types: Vec<Type>) -> Service {
        Service {
            title: "Example".to_string(),
            major_version: 1,
            source_path: "example.json".to_string(),
            interfaces: vec![Interface {
                name: "gizmo".to_string(),
                methods,
                protocols: Protocols::default(),
            }],
            types,
            enums: vec![],
        }
    }

    #[test]
    fn test_error_type_names() {
        let service = service(
            vec![
                method("a", Some("aResponse")),
                method("b", Some("bResponse")),
                method("c", Some("aResponse")),
                method("d", None),
                method("e", Some("mystery")),
            ],
            vec![
                response("aResponse", "error"),
                response("bResponse", "problem"),
                error("error"),
                error("problem"),
            ],
        );
        let names: Vec<&str> = error_type_names(&service).into_iter().collect();
        assert_eq!(names, vec!["error", "problem"]);
    }

    #[test]
    fn test_scalar_errors_property_is_ignored() {
        let mut ty = response("aResponse", "error");
        ty.properties[1].ty.is_array = false;
        let service = service(vec![method("a", Some("aResponse"))], vec![ty, error("error")]);
        assert!(error_type_names(&service).is_empty());
    }

    #[test]
    fn test_interface_file() {
        let service = service(
            vec![method("a", Some("aResponse"))],
            vec![response("aResponse", "error"), error("error")],
        );
        let config = RailsConfig::default();
        let names = RubyNames::new(&service, &config);
        let preamble = Preamble::render(&service, &config).unwrap();

        let content = emit_base_controller_interface(&service, &names, &preamble).unwrap();
        assert!(content.starts_with("# This code was generated by rgen@"));
        assert!(content.contains("# 2. Run the rgen CLI\n\n# typed: strict\n\nmodule Example\n"));
        assert!(content.contains("    sig { abstract.returns(Example::ServiceLocator) }\n"));
        assert!(content.contains(
            "    sig { abstract.params(errors: T::Array[Example::Types::Error]).returns(T.nilable(Integer)) }\n"
        ));
        assert!(content.contains("#   include Example::BaseControllerInterface\n#\n"));
        assert!(content.ends_with("#   end\n# end\n"));
    }

    #[test]
    fn test_union_and_untyped_error_types() {
        let union = service(
            vec![method("a", Some("aResponse")), method("b", Some("bResponse"))],
            vec![
                response("aResponse", "error"),
                response("bResponse", "problem"),
                error("error"),
                error("problem"),
            ],
        );
        let config = RailsConfig {
            services_module: Some("services".to_string()),
            ..RailsConfig::default()
        };
        let names = RubyNames::new(&union, &config);
        let preamble = Preamble::render(&union, &config).unwrap();
        let content = emit_base_controller_interface(&union, &names, &preamble).unwrap();
        assert!(content.contains(
            "T::Array[T.any(Example::Types::Error, Example::Types::Problem)]"
        ));
        assert!(content.contains("abstract.returns(Example::Services::ServiceLocator)"));

        let untyped = service(vec![method("a", None)], vec![]);
        let names = RubyNames::new(&untyped, &config);
        let content = emit_base_controller_interface(&untyped, &names, &preamble).unwrap();
        assert!(content.contains("errors: T::Array[T.untyped]"));
    }

    #[test]
    fn test_enum_errors_are_untyped() {
        let mut service = service(
            vec![method("a", Some("aResponse"))],
            vec![response("aResponse", "errorCode")],
        );
        service.enums.push(Enum {
            name: "errorCode".to_string(),
            values: vec!["notFound".to_string()],
        });
        let config = RailsConfig::default();
        let names = RubyNames::new(&service, &config);
        let preamble = Preamble::render(&service, &config).unwrap();
        let content = emit_base_controller_interface(&service, &names, &preamble).unwrap();
        assert!(content.contains("errors: T::Array[T.untyped]"));
        assert!(!content.contains("Enums::ErrorCode"));
    }
}
