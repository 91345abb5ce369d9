pub mod http;
pub mod primitive;
pub mod session;
pub mod types;

pub use http::{ArrayFormat, HttpMethod, HttpParameter, HttpPath, HttpVerb, ParameterLocation};
pub use primitive::Primitive;
pub use session::Session;
pub use types::{Enum, Interface, Method, Parameter, Property, Protocols, Service, Type, TypeRef};
