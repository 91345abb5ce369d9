use rgen_core::ir::{ParameterLocation, Session};
use rgen_core::parse;

const EXAMPLE: &str = include_str!("fixtures/example-ir.json");

#[test]
fn methods_resolve_across_interfaces() {
    let service = parse::from_json(EXAMPLE).unwrap();
    let session = Session::new(&service);

    assert_eq!(session.method("getGizmos").unwrap().name, "getGizmos");
    assert_eq!(
        session.method("exhaustive_params").unwrap().parameters.len(),
        5
    );
    assert!(session.method("ghost").is_none());
}

#[test]
fn http_bindings_resolve() {
    let service = parse::from_json(EXAMPLE).unwrap();
    let session = Session::new(&service);

    let delete = session.http_method("deleteWidgetFoo").unwrap();
    assert_eq!(delete.success_code, 204);

    let header = session
        .http_parameter("exhaustiveParams", "headerDate")
        .unwrap();
    assert_eq!(header.location, ParameterLocation::Header);
    assert!(session.http_parameter("getWidgets", "id").is_none());
}

#[test]
fn all_http_paths_keep_declaration_order() {
    let service = parse::from_json(EXAMPLE).unwrap();
    let paths: Vec<(&str, &str)> = service
        .all_http_paths()
        .map(|(int, p)| (int.name.as_str(), p.path.as_str()))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("gizmo", "/gizmos"),
            ("widget", "/widgets"),
            ("widget", "/widgets/{id}/foo"),
            ("widget", "/widgets/bulk"),
            ("exhaustive", "/exhaustive"),
            ("exhaustive", "/exhaustive/{pathInteger}"),
        ]
    );
}

#[test]
fn lookups_by_exact_name() {
    let service = parse::from_json(EXAMPLE).unwrap();
    assert!(service.type_by_name("widgetFoo").is_some());
    assert!(service.type_by_name("widget_foo").is_none());
    assert!(service.enum_by_name("productSize").is_some());
    assert!(service.enum_by_name("gizmo").is_none());
}
