use rgen_core::config::RailsConfig;
use rgen_core::ir::Service;
use rgen_core::{CodeGenerator, GeneratedFile, parse};
use rgen_rails_server::RailsServerGenerator;

const EXAMPLE: &str = include_str!("../../rgen-core/tests/fixtures/example-ir.json");

fn service() -> Service {
    parse::from_json(EXAMPLE).expect("fixture should parse")
}

fn generate(config: &RailsConfig) -> Vec<GeneratedFile> {
    RailsServerGenerator
        .generate(&service(), config)
        .expect("generation should succeed")
}

fn file<'f>(files: &'f [GeneratedFile], name: &str) -> &'f str {
    files
        .iter()
        .find(|f| f.file_name() == name)
        .map(|f| f.content.as_str())
        .unwrap_or_else(|| panic!("missing {name}"))
}

/// Content after the generated-code banner.
fn body(content: &str) -> &str {
    let start = content.find("\n\n").expect("banner should end with a blank line");
    &content[start + 2..]
}

#[test]
fn generates_files_in_order() {
    let files = generate(&RailsConfig::default());
    let paths: Vec<String> = files.iter().map(GeneratedFile::display_path).collect();
    assert_eq!(
        paths,
        vec![
            "config/routes/basketry_example_v1.rb",
            "app/controllers/basketry_example/gizmos_controller.rb",
            "app/controllers/basketry_example/widgets_controller.rb",
            "app/controllers/basketry_example/exhaustives_controller.rb",
            "app/controllers/basketry_example/controller_helpers.rb",
            "app/controllers/basketry_example/base_controller_interface.rb",
        ]
    );
    for f in &files {
        assert!(
            f.content.starts_with("# This code was generated by rgen@"),
            "{} should start with the banner",
            f.display_path()
        );
        assert!(f.content.contains("# 1. Edit source/path.ext\n"));
        assert!(f.content.ends_with('\n'));
    }
}

#[test]
fn route_table() {
    let files = generate(&RailsConfig::default());
    insta::assert_snapshot!(body(file(&files, "basketry_example_v1.rb")), @r"
    scope module: 'basketry_example' do
      scope path: 'v1' do
        # Gizmos
        get 'gizmos', to: 'gizmos#get_gizmos'
        post 'gizmos', to: 'gizmos#create_gizmo'
        put 'gizmos', to: 'gizmos#update_gizmo'

        # Widgets
        get 'widgets/:id/foo', to: 'widgets#get_widget_foo'
        delete 'widgets/:id/foo', to: 'widgets#delete_widget_foo'
        post 'widgets/bulk', to: 'widgets#bulk_create_widgets'
        get 'widgets', to: 'widgets#get_widgets'
        post 'widgets', to: 'widgets#create_widget'
        put 'widgets', to: 'widgets#put_widget'

        # Exhaustive
        get 'exhaustive/:pathInteger', to: 'exhaustives#exhaustive_params'
        get 'exhaustive', to: 'exhaustives#exhaustive_formats'
      end
    end
    ");
}

#[test]
fn exhaustive_controller() {
    let files = generate(&RailsConfig::default());
    insta::assert_snapshot!(body(file(&files, "exhaustives_controller.rb")), @r#"
    module BasketryExample
      class ExhaustivesController < ApplicationController
        include BasketryExample::ControllerHelpers

        def exhaustive_formats
          response = services.exhaustive_service.exhaustive_formats(
            string_no_format: params['stringNoFormat'],
            integer_int64: cast_long(params['integerInt64']),
            number_double: cast_double(params['numberDouble']),
            string_date: cast_date(params['stringDate'])
          )

          render status: status_code(response.errors) || 204
        end

        def exhaustive_params
          response = services.exhaustive_service.exhaustive_params(
            path_integer: cast_integer(params['pathInteger']),
            query_boolean_array: cast_boolean_array(params['queryBooleanArray']&.split(',')),
            header_date: cast_date(params['headerDate']),
            query_date_time_array: cast_date_time_array(params['queryDateTimeArray']&.split(' ')),
            query_long_array: cast_long_array(params['queryLongArray']&.split("\t"))
          )

          render status: status_code(response.errors) || 204
        end
      end
    end
    "#);
}

#[test]
fn widget_controller_bodies() {
    let files = generate(&RailsConfig::default());
    let content = file(&files, "widgets_controller.rb");
    assert!(content.contains(
        "      response = services.widget_service.get_widgets(\n      )\n\n      render json: map_widget_to_dto(response), status: status_code(response.errors) || 200\n"
    ));
    assert!(content.contains(
        "        body: map_dto_to_create_widget_body(request.body.read.empty? ? nil : JSON.parse(request.body.read))\n"
    ));
    assert!(content.contains(
        "        body: request.body.read.empty? ? nil : JSON.parse(request.body.read).map { |item| map_dto_to_widget(item) }\n"
    ));
    assert!(content.contains("        id: params['id']\n"));

    let gizmos = file(&files, "gizmos_controller.rb");
    assert!(gizmos.contains("        size: params['size']\n"));
    assert!(gizmos.contains("        factors: params['factors']&.split('|')\n"));
    assert!(gizmos.contains("render json: map_gizmo_to_dto(response), status: status_code(response.errors) || 201"));
}

#[test]
fn helpers_contain_conversion_routines() {
    let files = generate(&RailsConfig::default());
    let helpers = file(&files, "controller_helpers.rb");

    assert!(helpers.contains(
        "    def map_dto_to_gizmos_response(dto)\n      BasketryExample::Types::GizmosResponse.new(\n        data: dto['data']&.map { |item| map_dto_to_gizmo(item) },\n        errors: dto['errors']&.map { |item| map_dto_to_error(item) }\n      )\n    rescue StandardError\n      dto\n    end\n"
    ));
    assert!(helpers.contains(
        "        fiz: dto['fiz'].is_a?(String) ? Float(dto['fiz']) : dto['fiz'],\n"
    ));
    assert!(helpers.contains("        foo: map_dto_to_widget_foo(dto['foo'])\n"));
    assert!(helpers.contains("        'fizbuzz': widget.fizbuzz&.utc&.iso8601,\n"));
    assert!(helpers.contains("      BasketryExample::Enums::ProductSize.deserialize(dto)\n"));

    let order = [
        "def map_dto_to_gizmo(",
        "def map_gizmo_to_dto(",
        "def map_dto_to_error(",
        "def map_dto_to_product_size(",
        "def map_product_size_to_dto(",
        "def cast_long(",
        "def cast_boolean_array(",
    ];
    let positions: Vec<usize> = order
        .iter()
        .map(|needle| helpers.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn cast_helpers_are_emitted_only_when_referenced() {
    let files = generate(&RailsConfig::default());
    let helpers = file(&files, "controller_helpers.rb");

    let scalars: Vec<&str> = helpers
        .lines()
        .filter_map(|l| l.trim().strip_prefix("def cast_"))
        .collect();
    assert_eq!(
        scalars,
        vec![
            "long(param)",
            "double(param)",
            "date(param)",
            "integer(param)",
            "boolean_array(param)",
            "date_time_array(param)",
            "long_array(param)",
        ]
    );

    // Every helper has a caller in some controller
    let controllers: String = files
        .iter()
        .filter(|f| f.file_name().ends_with("_controller.rb"))
        .map(|f| f.content.as_str())
        .collect();
    for helper in &scalars {
        let name = helper.trim_end_matches("(param)");
        assert!(controllers.contains(&format!("cast_{name}(")));
    }
}

#[test]
fn helpers_do_not_depend_on_exclusions() {
    let full = generate(&RailsConfig::default());
    let config = RailsConfig {
        exclude: vec!["ServiceController".to_string(), "Routes".to_string()],
        ..RailsConfig::default()
    };
    let excluded = generate(&config);

    assert_eq!(excluded.len(), 2);
    for f in &excluded {
        let original = full.iter().find(|o| o.path == f.path).unwrap();
        assert_eq!(original.content, f.content);
    }
}

#[test]
fn exclusion_is_precise() {
    let config = RailsConfig {
        exclude: vec!["WidgetsController".to_string(), "Widgets".to_string()],
        ..RailsConfig::default()
    };
    let files = generate(&config);
    let names: Vec<&str> = files.iter().map(GeneratedFile::file_name).collect();
    assert_eq!(
        names,
        vec![
            "basketry_example_v1.rb",
            "gizmos_controller.rb",
            "exhaustives_controller.rb",
            "controller_helpers.rb",
            "base_controller_interface.rb",
        ]
    );
}

#[test]
fn versioned_layout() {
    let config = RailsConfig {
        include_version: true,
        magic_comments: vec!["frozen_string_literal: true".to_string()],
        ..RailsConfig::default()
    };
    let files = generate(&config);
    assert_eq!(
        files[1].display_path(),
        "app/controllers/basketry_example/v1/gizmos_controller.rb"
    );
    assert_eq!(files[0].display_path(), "config/routes/basketry_example_v1.rb");

    let routes = file(&files, "basketry_example_v1.rb");
    assert!(routes.contains("\n  scope module: 'v1', path: 'v1' do\n"));

    let helpers = file(&files, "controller_helpers.rb");
    assert!(helpers.contains("\nmodule BasketryExample::V1\n"));
    assert!(helpers.contains("BasketryExample::V1::Types::Widget.new("));

    for f in &files {
        assert!(f.content.contains("# 2. Run the rgen CLI\n\n# frozen_string_literal: true\n\n"));
    }
}

#[test]
fn base_controller_interface() {
    let files = generate(&RailsConfig::default());
    let content = file(&files, "base_controller_interface.rb");
    assert!(body(content).starts_with("# typed: strict\n\nmodule BasketryExample\n  module BaseControllerInterface\n"));
    assert!(content.contains("sig { abstract.returns(BasketryExample::ServiceLocator) }"));
    assert!(content.contains(
        "sig { abstract.params(errors: T::Array[BasketryExample::Types::Error]).returns(T.nilable(Integer)) }"
    ));
    assert!(content.contains("# class BaseController < ApplicationController\n"));
}

#[test]
fn generation_is_deterministic() {
    let config = RailsConfig::default();
    assert_eq!(generate(&config), generate(&config));
}

#[test]
fn configured_type_overrides() {
    let config: RailsConfig = serde_yaml_ng::from_str(
        r#"
types:
  date-time: parse_timestamp
base_controller: Api::BaseController
"#,
    )
    .expect("config should parse");
    let files = generate(&config);

    let helpers = file(&files, "controller_helpers.rb");
    assert!(helpers.contains("        fizbuzz: parse_timestamp(dto['fizbuzz'].to_s),\n"));
    assert!(helpers.contains("param&.map { |item| parse_timestamp(item) if !item.nil? }"));
    // Outbound conversion keeps the default rule
    assert!(helpers.contains("'fizbuzz': widget.fizbuzz&.utc&.iso8601,"));

    let widgets = file(&files, "widgets_controller.rb");
    assert!(widgets.contains("  class WidgetsController < Api::BaseController\n"));
}
