//! Parameter binding: where each controller argument comes from and how it is decoded.

use rgen_core::ir::{ArrayFormat, Method, Parameter, ParameterLocation, Primitive, Session};
use rgen_core::naming::snake;
use serde::Serialize;

use crate::marshal::CastRegistry;
use crate::marshal::routines::inbound_routine;

const RAW_BODY: &str = "request.body.read.empty? ? nil : JSON.parse(request.body.read)";

/// Resolved source of one parameter, with the Ruby expression producing its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub name: String,
    pub location: ParameterLocation,
    pub expression: String,
}

/// Resolves parameter bindings, registering the cast helpers they reference.
pub struct ParameterBinder<'s, 'a> {
    session: &'s Session<'a>,
    casts: &'s mut CastRegistry,
}

impl<'s, 'a> ParameterBinder<'s, 'a> {
    pub fn new(session: &'s Session<'a>, casts: &'s mut CastRegistry) -> Self {
        Self { session, casts }
    }

    /// Bindings for every parameter of `method`, in declaration order.
    pub fn bind_all(&mut self, method: &Method) -> Vec<Binding> {
        method
            .parameters
            .iter()
            .map(|param| self.bind(method, param))
            .collect()
    }

    pub fn bind(&mut self, method: &Method, param: &Parameter) -> Binding {
        let http_param = self.session.http_parameter(&method.name, &param.name);
        let location = http_param
            .map(|p| p.location)
            .unwrap_or(ParameterLocation::Query);

        let expression = if location == ParameterLocation::Body {
            self.body_expression(param)
        } else {
            let separator = http_param.and_then(|p| p.array).unwrap_or_default();
            self.located_expression(param, separator)
        };

        Binding {
            name: snake(&param.name),
            location,
            expression,
        }
    }

    fn body_expression(&self, param: &Parameter) -> String {
        let type_name = &param.ty.type_name;
        let declared = !param.ty.is_primitive
            && (self.session.type_by_name(type_name).is_some()
                || self.session.enum_by_name(type_name).is_some());
        if !declared {
            return RAW_BODY.to_string();
        }

        let routine = inbound_routine(type_name);
        if param.ty.is_array {
            format!("{RAW_BODY}.map {{ |item| {routine}(item) }}")
        } else {
            format!("{routine}({RAW_BODY})")
        }
    }

    fn located_expression(&mut self, param: &Parameter, format: ArrayFormat) -> String {
        let raw = format!("params['{}']", param.name);
        if !param.ty.is_primitive {
            return raw;
        }

        let split = format!("{raw}&.split({})", separator_literal(format));
        let textual = Primitive::from_name(&param.ty.type_name).is_some_and(|p| p.is_textual());
        match (textual, param.ty.is_array) {
            (true, false) => raw,
            (true, true) => split,
            (false, false) => {
                let helper = self.casts.require_scalar(&param.ty.type_name);
                format!("{helper}({raw})")
            }
            (false, true) => {
                let helper = self.casts.require_array(&param.ty.type_name);
                format!("{helper}({split})")
            }
        }
    }
}

/// Ruby string literal for an array separator. Tab needs a double-quoted literal.
fn separator_literal(format: ArrayFormat) -> String {
    match format.separator() {
        '\t' => r#""\t""#.to_string(),
        c => format!("'{c}'"),
    }
}
