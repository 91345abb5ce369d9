use serde::{Deserialize, Serialize};

use super::http::HttpPath;

/// A parsed service description: the immutable input of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub title: String,
    pub major_version: u32,
    /// Path of the source description, quoted in the generated-file banner.
    #[serde(default)]
    pub source_path: String,
    #[serde(default)]
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub types: Vec<Type>,
    #[serde(default)]
    pub enums: Vec<Enum>,
}

impl Service {
    /// Find a declared composite type by its exact name.
    pub fn type_by_name(&self, name: &str) -> Option<&Type> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Find a declared enum by its exact name.
    pub fn enum_by_name(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }

    /// Every method paired with its owning interface, in declaration order.
    pub fn all_methods(&self) -> impl Iterator<Item = (&Interface, &Method)> {
        self.interfaces
            .iter()
            .flat_map(|int| int.methods.iter().map(move |m| (int, m)))
    }

    /// Every HTTP path paired with its owning interface, in declaration order.
    pub fn all_http_paths(&self) -> impl Iterator<Item = (&Interface, &HttpPath)> {
        self.interfaces
            .iter()
            .flat_map(|int| int.protocols.http.iter().map(move |p| (int, p)))
    }
}

/// A named group of methods, rendered as one controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub methods: Vec<Method>,
    #[serde(default)]
    pub protocols: Protocols,
}

/// Protocol bindings attached to an interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Protocols {
    #[serde(default)]
    pub http: Vec<HttpPath>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
}

/// A reference to a primitive kind or a declared type/enum, optionally as an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub type_name: String,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub is_primitive: bool,
}

impl TypeRef {
    pub fn primitive(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            is_array: false,
            is_primitive: true,
        }
    }

    pub fn named(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            is_array: false,
            is_primitive: false,
        }
    }

    pub fn array(self) -> Self {
        Self {
            is_array: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(flatten)]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(flatten)]
    pub ty: TypeRef,
}

/// A declared composite type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Type {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A declared string enum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}
