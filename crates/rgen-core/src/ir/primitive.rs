use std::fmt;

/// Primitive kinds a service description may reference by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    String,
    Number,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Date,
    DateTime,
    Null,
    Untyped,
    Binary,
}

impl Primitive {
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name {
            "string" => Primitive::String,
            "number" => Primitive::Number,
            "integer" => Primitive::Integer,
            "long" => Primitive::Long,
            "float" => Primitive::Float,
            "double" => Primitive::Double,
            "boolean" => Primitive::Boolean,
            "date" => Primitive::Date,
            "date-time" => Primitive::DateTime,
            "null" => Primitive::Null,
            "untyped" => Primitive::Untyped,
            "binary" => Primitive::Binary,
            _ => return None,
        };
        Some(primitive)
    }

    /// The name used in service descriptions and config override tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Integer => "integer",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::Boolean => "boolean",
            Primitive::Date => "date",
            Primitive::DateTime => "date-time",
            Primitive::Null => "null",
            Primitive::Untyped => "untyped",
            Primitive::Binary => "binary",
        }
    }

    /// Kinds whose raw textual value is used as-is outside the request body.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            Primitive::String | Primitive::Null | Primitive::Untyped
        )
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
