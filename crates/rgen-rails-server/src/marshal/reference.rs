//! Executable reference for the conversion routines emitted into
//! `controller_helpers.rb`.
//!
//! [`ReferenceMarshaller`] applies the default cast rules to JSON wire values
//! the way the generated Ruby does: a routine that fails hands back its input
//! untouched. Here that outcome is explicit as [`Conversion::Preserved`] so
//! callers can see the failure, while [`Conversion::into_value`] still yields
//! the original value. Configured cast overrides are opaque functions and are
//! not modelled.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use rgen_core::ir::{Enum, Primitive, Service, Type, TypeRef};
use serde_json::{Map, Number, Value};

/// A value after inbound conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    Enum {
        name: String,
        value: String,
    },
    Array(Vec<TypedValue>),
    /// A declared type, keyed by wire property name.
    Struct {
        name: String,
        fields: IndexMap<String, TypedValue>,
    },
    /// A wire value carried through without interpretation.
    Raw(Value),
}

impl TypedValue {
    /// Untyped view of a wire value: scalars keep their JSON kind, objects stay raw.
    pub fn from_wire(value: &Value) -> Self {
        match value {
            Value::Null => TypedValue::Null,
            Value::Bool(b) => TypedValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => TypedValue::Integer(i),
                None => n
                    .as_f64()
                    .map(TypedValue::Float)
                    .unwrap_or_else(|| TypedValue::Raw(value.clone())),
            },
            Value::String(s) => TypedValue::String(s.clone()),
            Value::Array(items) => TypedValue::Array(items.iter().map(Self::from_wire).collect()),
            Value::Object(_) => TypedValue::Raw(value.clone()),
        }
    }

    /// Generic wire rendering, used when no declared type guides the conversion.
    pub fn to_wire(&self) -> Value {
        match self {
            TypedValue::Null => Value::Null,
            TypedValue::Bool(b) => Value::Bool(*b),
            TypedValue::Integer(i) => Value::Number((*i).into()),
            TypedValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            TypedValue::String(s) => Value::String(s.clone()),
            TypedValue::Date(d) => Value::String(format_date(d)),
            TypedValue::DateTime(dt) => Value::String(format_date_time(dt)),
            TypedValue::Enum { value, .. } => Value::String(value.clone()),
            TypedValue::Array(items) => Value::Array(items.iter().map(Self::to_wire).collect()),
            TypedValue::Struct { fields, .. } => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_wire()))
                    .filter(|(_, v)| !v.is_null())
                    .collect(),
            ),
            TypedValue::Raw(value) => value.clone(),
        }
    }
}

impl From<Value> for TypedValue {
    fn from(value: Value) -> Self {
        TypedValue::Raw(value)
    }
}

impl From<TypedValue> for Value {
    fn from(value: TypedValue) -> Self {
        value.to_wire()
    }
}

/// Outcome of one conversion routine.
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion<T, O> {
    Converted(T),
    /// The routine failed and handed back its input.
    Preserved { original: O, reason: String },
}

impl<T, O> Conversion<T, O> {
    fn preserved(original: O, reason: impl Into<String>) -> Self {
        Conversion::Preserved {
            original,
            reason: reason.into(),
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }

    /// Failure reason, if the input was preserved.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Conversion::Converted(_) => None,
            Conversion::Preserved { reason, .. } => Some(reason),
        }
    }

    /// The converted value, or the original input when conversion failed.
    pub fn into_value(self) -> T
    where
        O: Into<T>,
    {
        match self {
            Conversion::Converted(value) => value,
            Conversion::Preserved { original, .. } => original.into(),
        }
    }
}

/// Failure inside a routine body, before the routine's own fallback applies.
type Step<T> = Result<T, String>;

/// Applies the default wire ⇄ typed rules for one service description.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceMarshaller<'a> {
    service: &'a Service,
}

impl<'a> ReferenceMarshaller<'a> {
    pub fn new(service: &'a Service) -> Self {
        Self { service }
    }

    /// Inbound conversion of a value declared as `ty`.
    pub fn inbound(&self, ty: &TypeRef, wire: &Value) -> Conversion<TypedValue, Value> {
        match self.inbound_value(ty, wire) {
            Ok(typed) => Conversion::Converted(typed),
            Err(reason) => Conversion::preserved(wire.clone(), reason),
        }
    }

    /// Outbound conversion of a value declared as `ty`.
    pub fn outbound(&self, ty: &TypeRef, typed: &TypedValue) -> Conversion<Value, TypedValue> {
        match self.outbound_value(ty, typed) {
            Ok(wire) => Conversion::Converted(wire),
            Err(reason) => Conversion::preserved(typed.clone(), reason),
        }
    }

    /// `map_dto_to_<type>(dto)`
    pub fn inbound_type(&self, ty: &Type, wire: &Value) -> Conversion<TypedValue, Value> {
        let Value::Object(object) = wire else {
            return Conversion::preserved(wire.clone(), format!("{} expects an object", ty.name));
        };

        let mut fields = IndexMap::new();
        for prop in &ty.properties {
            let raw = object.get(&prop.name).unwrap_or(&Value::Null);
            match self.inbound_value(&prop.ty, raw) {
                Ok(typed) => {
                    fields.insert(prop.name.clone(), typed);
                }
                Err(reason) => {
                    return Conversion::preserved(wire.clone(), format!("{}: {reason}", prop.name));
                }
            }
        }

        Conversion::Converted(TypedValue::Struct {
            name: ty.name.clone(),
            fields,
        })
    }

    /// `map_<type>_to_dto(value)`; absent properties are omitted.
    pub fn outbound_type(&self, ty: &Type, typed: &TypedValue) -> Conversion<Value, TypedValue> {
        let TypedValue::Struct { fields, .. } = typed else {
            return Conversion::preserved(typed.clone(), format!("{} expects a struct", ty.name));
        };

        let mut object = Map::new();
        for prop in &ty.properties {
            let value = fields.get(&prop.name).unwrap_or(&TypedValue::Null);
            match self.outbound_value(&prop.ty, value) {
                Ok(Value::Null) => {}
                Ok(wire) => {
                    object.insert(prop.name.clone(), wire);
                }
                Err(reason) => {
                    return Conversion::preserved(typed.clone(), format!("{}: {reason}", prop.name));
                }
            }
        }

        Conversion::Converted(Value::Object(object))
    }

    /// `map_dto_to_<enum>(dto)`
    pub fn inbound_enum(&self, e: &Enum, wire: &Value) -> Conversion<TypedValue, Value> {
        match wire {
            Value::String(s) if e.values.contains(s) => Conversion::Converted(TypedValue::Enum {
                name: e.name.clone(),
                value: s.clone(),
            }),
            _ => Conversion::preserved(wire.clone(), format!("not a {} value", e.name)),
        }
    }

    /// `map_<enum>_to_dto(enum)`
    pub fn outbound_enum(&self, e: &Enum, typed: &TypedValue) -> Conversion<Value, TypedValue> {
        match typed {
            TypedValue::Null => Conversion::Converted(Value::Null),
            TypedValue::Enum { value, .. } => Conversion::Converted(Value::String(value.clone())),
            _ => Conversion::preserved(typed.clone(), format!("not a {} value", e.name)),
        }
    }

    /// `cast_<kind>(param)`: applies to a raw path/query/header value.
    pub fn cast_param(&self, type_name: &str, raw: &Value) -> Conversion<TypedValue, Value> {
        match raw {
            Value::Null => Conversion::Converted(TypedValue::Null),
            Value::String(s) => match cast_str(type_name, s) {
                Ok(typed) => Conversion::Converted(typed),
                Err(reason) => Conversion::preserved(raw.clone(), reason),
            },
            _ if is_pass_through(type_name) => Conversion::Converted(TypedValue::from_wire(raw)),
            _ => Conversion::preserved(raw.clone(), format!("{type_name} cast expects text")),
        }
    }

    /// `cast_<kind>_array(param)`: applies to an already split value list.
    pub fn cast_param_array(&self, type_name: &str, raw: &Value) -> Conversion<TypedValue, Value> {
        let items = match raw {
            Value::Null => return Conversion::Converted(TypedValue::Null),
            Value::Array(items) => items,
            _ => return Conversion::preserved(raw.clone(), "expected a list of values"),
        };

        let mut typed = Vec::with_capacity(items.len());
        for item in items {
            match self.cast_param(type_name, item) {
                Conversion::Converted(value) => typed.push(value),
                Conversion::Preserved { reason, .. } => {
                    return Conversion::preserved(raw.clone(), reason);
                }
            }
        }
        Conversion::Converted(TypedValue::Array(typed))
    }

    fn inbound_value(&self, ty: &TypeRef, wire: &Value) -> Step<TypedValue> {
        if !ty.is_array {
            return self.inbound_item(ty, wire);
        }
        match wire {
            Value::Null => Ok(TypedValue::Null),
            Value::Array(items) => items
                .iter()
                .map(|item| self.inbound_item(ty, item))
                .collect::<Step<Vec<_>>>()
                .map(TypedValue::Array),
            _ => Err("expected an array".to_string()),
        }
    }

    fn inbound_item(&self, ty: &TypeRef, wire: &Value) -> Step<TypedValue> {
        if ty.is_primitive {
            return match wire {
                Value::String(s) => cast_str(&ty.type_name, s),
                _ => Ok(TypedValue::from_wire(wire)),
            };
        }
        // Nested routines carry their own fallback
        if let Some(nested) = self.service.type_by_name(&ty.type_name) {
            Ok(self.inbound_type(nested, wire).into_value())
        } else if let Some(e) = self.service.enum_by_name(&ty.type_name) {
            Ok(self.inbound_enum(e, wire).into_value())
        } else {
            Ok(TypedValue::Raw(wire.clone()))
        }
    }

    fn outbound_value(&self, ty: &TypeRef, typed: &TypedValue) -> Step<Value> {
        if !ty.is_array {
            return self.outbound_item(ty, typed);
        }
        match typed {
            TypedValue::Null => Ok(Value::Null),
            TypedValue::Array(items) => items
                .iter()
                .map(|item| self.outbound_item(ty, item))
                .collect::<Step<Vec<_>>>()
                .map(Value::Array),
            _ => Err("expected an array".to_string()),
        }
    }

    fn outbound_item(&self, ty: &TypeRef, typed: &TypedValue) -> Step<Value> {
        if ty.is_primitive {
            return match (Primitive::from_name(&ty.type_name), typed) {
                (Some(Primitive::DateTime), TypedValue::DateTime(dt)) => {
                    Ok(Value::String(format_date_time(dt)))
                }
                (Some(Primitive::DateTime), TypedValue::Null) => Ok(Value::Null),
                (Some(Primitive::DateTime), _) => Err("not a timestamp".to_string()),
                _ => Ok(typed.to_wire()),
            };
        }
        if let Some(nested) = self.service.type_by_name(&ty.type_name) {
            Ok(self.outbound_type(nested, typed).into_value())
        } else if let Some(e) = self.service.enum_by_name(&ty.type_name) {
            Ok(self.outbound_enum(e, typed).into_value())
        } else {
            Ok(typed.to_wire())
        }
    }
}

fn is_pass_through(type_name: &str) -> bool {
    match Primitive::from_name(type_name) {
        Some(Primitive::Boolean)
        | Some(Primitive::Date)
        | Some(Primitive::DateTime)
        | Some(Primitive::Number)
        | Some(Primitive::Float)
        | Some(Primitive::Double)
        | Some(Primitive::Integer)
        | Some(Primitive::Long) => false,
        _ => true,
    }
}

/// Default inbound cast of textual wire data.
fn cast_str(type_name: &str, raw: &str) -> Step<TypedValue> {
    match Primitive::from_name(type_name) {
        Some(Primitive::Boolean) => Ok(cast_boolean(raw)),
        Some(Primitive::Date) => parse_date(raw).map(TypedValue::Date),
        Some(Primitive::DateTime) => parse_date_time(raw).map(TypedValue::DateTime),
        Some(Primitive::Number | Primitive::Float | Primitive::Double) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(TypedValue::Float)
            .ok_or_else(|| format!("invalid number `{raw}`")),
        Some(Primitive::Integer | Primitive::Long) => raw
            .trim()
            .parse::<i64>()
            .map(TypedValue::Integer)
            .map_err(|e| format!("invalid integer `{raw}`: {e}")),
        _ => Ok(TypedValue::String(raw.to_string())),
    }
}

/// Rails boolean coercion: blank is absent, a fixed set of spellings is false,
/// anything else is true.
fn cast_boolean(raw: &str) -> TypedValue {
    const FALSE_VALUES: [&str; 7] = ["0", "f", "F", "false", "FALSE", "off", "OFF"];
    if raw.is_empty() {
        TypedValue::Null
    } else {
        TypedValue::Bool(!FALSE_VALUES.contains(&raw))
    }
}

fn parse_date(raw: &str) -> Step<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| parse_date_time(raw).map(|dt| dt.date_naive()).map_err(|_| ()))
        .map_err(|_| format!("invalid date `{raw}`"))
}

fn parse_date_time(raw: &str) -> Step<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp `{raw}`"))
}

fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn format_date_time(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}
