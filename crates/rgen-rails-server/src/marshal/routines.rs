use log::warn;
use serde::Serialize;
use rgen_core::config::RailsConfig;
use rgen_core::ir::{Enum, Type, TypeRef};
use rgen_core::naming::snake;

use super::casts::{inbound_cast, outbound_cast};
use super::{array_helper_name, scalar_helper_name};
use crate::type_mapper::RubyNames;

/// `map_dto_to_gizmo`
pub fn inbound_routine(type_name: &str) -> String {
    format!("map_dto_to_{}", snake(type_name))
}

/// `map_gizmo_to_dto`
pub fn outbound_routine(type_name: &str) -> String {
    format!("map_{}_to_dto", snake(type_name))
}

/// Wire → typed expression for a single (non-array) value of `ty`.
pub fn inbound_item(names: &RubyNames<'_>, ty: &TypeRef, expr: &str) -> String {
    if ty.is_primitive {
        let config = names.config();
        if let Some(function) = config.type_override(&ty.type_name) {
            return format!("{function}({expr}.to_s)");
        }
        let casted = inbound_cast(config, &ty.type_name, expr);
        if casted == expr {
            casted
        } else {
            format!("{expr}.is_a?(String) ? {casted} : {expr}")
        }
    } else if names.is_declared(&ty.type_name) {
        format!("{}({expr})", inbound_routine(&ty.type_name))
    } else {
        warn!(
            "type `{}` is not declared; its values are passed through unconverted",
            ty.type_name
        );
        expr.to_string()
    }
}

/// Typed → wire expression for a single (non-array) value of `ty`.
pub fn outbound_item(names: &RubyNames<'_>, ty: &TypeRef, expr: &str) -> String {
    if ty.is_primitive {
        outbound_cast(&ty.type_name, expr)
    } else if names.is_declared(&ty.type_name) {
        format!("{}({expr})", outbound_routine(&ty.type_name))
    } else {
        warn!(
            "type `{}` is not declared; its values are passed through unconverted",
            ty.type_name
        );
        expr.to_string()
    }
}

/// Wire → typed expression for a value of `ty`, mapping over arrays.
/// An absent array stays absent.
pub fn inbound_value(names: &RubyNames<'_>, ty: &TypeRef, expr: &str) -> String {
    if ty.is_array {
        map_items(expr, inbound_item(names, ty, "item"))
    } else {
        inbound_item(names, ty, expr)
    }
}

/// Typed → wire expression for a value of `ty`, mapping over arrays.
pub fn outbound_value(names: &RubyNames<'_>, ty: &TypeRef, expr: &str) -> String {
    if ty.is_array {
        map_items(expr, outbound_item(names, ty, "item"))
    } else {
        outbound_item(names, ty, expr)
    }
}

fn map_items(expr: &str, item: String) -> String {
    if item == "item" {
        expr.to_string()
    } else {
        format!("{expr}&.map {{ |item| {item} }}")
    }
}

/// One `def` in the helpers module. Rendering wraps the body in
/// `rescue StandardError` returning `fallback`, so no routine can raise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routine {
    pub signature: String,
    #[serde(flatten)]
    pub body: RoutineBody,
    pub fallback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoutineBody {
    /// `<constructor>.new(name: value, ...)`
    Construct {
        constructor: String,
        fields: Vec<Field>,
    },
    /// `{ 'name': value, ... }.compact`
    Hash { fields: Vec<Field> },
    Expression { expression: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// `map_dto_to_<type>(dto)`: builds the struct from its wire hash.
pub fn type_inbound(names: &RubyNames<'_>, ty: &Type) -> Routine {
    let fields = ty
        .properties
        .iter()
        .map(|prop| Field {
            name: snake(&prop.name),
            value: inbound_value(names, &prop.ty, &format!("dto['{}']", prop.name)),
        })
        .collect();
    Routine {
        signature: format!("{}(dto)", inbound_routine(&ty.name)),
        body: RoutineBody::Construct {
            constructor: names.type_constant(&ty.name),
            fields,
        },
        fallback: "dto".to_string(),
    }
}

/// `map_<type>_to_dto(<type>)`: builds the wire hash, dropping absent values.
pub fn type_outbound(names: &RubyNames<'_>, ty: &Type) -> Routine {
    let arg = snake(&ty.name);
    let fields = ty
        .properties
        .iter()
        .map(|prop| Field {
            name: prop.name.clone(),
            value: outbound_value(names, &prop.ty, &format!("{arg}.{}", snake(&prop.name))),
        })
        .collect();
    Routine {
        signature: format!("{}({arg})", outbound_routine(&ty.name)),
        body: RoutineBody::Hash { fields },
        fallback: arg,
    }
}

pub fn enum_inbound(names: &RubyNames<'_>, e: &Enum) -> Routine {
    Routine {
        signature: format!("{}(dto)", inbound_routine(&e.name)),
        body: RoutineBody::Expression {
            expression: format!("{}.deserialize(dto)", names.type_constant(&e.name)),
        },
        fallback: "dto".to_string(),
    }
}

pub fn enum_outbound(e: &Enum) -> Routine {
    Routine {
        signature: format!("{}(enum)", outbound_routine(&e.name)),
        body: RoutineBody::Expression {
            expression: "enum&.serialize".to_string(),
        },
        fallback: "enum".to_string(),
    }
}

/// `cast_<kind>(param)`
pub fn scalar_cast(config: &RailsConfig, type_name: &str) -> Routine {
    let cast = inbound_cast(config, type_name, "param");
    Routine {
        signature: format!("{}(param)", scalar_helper_name(type_name)),
        body: RoutineBody::Expression {
            expression: format!("{cast} if !param.nil?"),
        },
        fallback: "param".to_string(),
    }
}

/// `cast_<kind>_array(param)`: expects an already split array.
pub fn array_cast(config: &RailsConfig, type_name: &str) -> Routine {
    let cast = inbound_cast(config, type_name, "item");
    Routine {
        signature: format!("{}(param)", array_helper_name(type_name)),
        body: RoutineBody::Expression {
            expression: format!("param&.map {{ |item| {cast} if !item.nil? }}"),
        },
        fallback: "param".to_string(),
    }
}
