//! Type marshalling: wire ⇄ typed conversion routines for declared types, enums
//! and primitives, plus the registry of demand-driven primitive cast helpers.

pub mod casts;
pub mod reference;
pub mod routines;

use indexmap::IndexSet;
use rgen_core::naming::snake;

pub use casts::{inbound_cast, outbound_cast};
pub use reference::{Conversion, ReferenceMarshaller, TypedValue};

/// Primitive kinds whose cast helpers were referenced while binding parameters.
///
/// Only the binder registers kinds, so every emitted helper has a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CastRegistry {
    scalar: IndexSet<String>,
    array: IndexSet<String>,
}

impl CastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scalar cast and return the helper name to call.
    pub fn require_scalar(&mut self, type_name: &str) -> String {
        self.scalar.insert(type_name.to_string());
        scalar_helper_name(type_name)
    }

    /// Register an array cast and return the helper name to call.
    pub fn require_array(&mut self, type_name: &str) -> String {
        self.array.insert(type_name.to_string());
        array_helper_name(type_name)
    }

    /// Registered scalar kinds, in first-registration order.
    pub fn scalars(&self) -> impl Iterator<Item = &str> {
        self.scalar.iter().map(String::as_str)
    }

    /// Registered array kinds, in first-registration order.
    pub fn arrays(&self) -> impl Iterator<Item = &str> {
        self.array.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.scalar.is_empty() && self.array.is_empty()
    }
}

/// `cast_date_time`
pub fn scalar_helper_name(type_name: &str) -> String {
    format!("cast_{}", snake(type_name))
}

/// `cast_date_time_array`
pub fn array_helper_name(type_name: &str) -> String {
    format!("cast_{}_array", snake(type_name))
}
