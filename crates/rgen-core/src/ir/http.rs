use serde::{Deserialize, Serialize};

/// An HTTP path template (`/gizmos/{id}`) and the methods bound to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpPath {
    pub path: String,
    #[serde(default)]
    pub methods: Vec<HttpMethod>,
}

/// Binds a service method (by name) to a verb on the owning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpMethod {
    pub name: String,
    pub verb: HttpVerb,
    #[serde(default = "default_success_code")]
    pub success_code: u16,
    #[serde(default)]
    pub parameters: Vec<HttpParameter>,
}

fn default_success_code() -> u16 {
    200
}

/// HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVerb {
    #[serde(alias = "GET")]
    Get,
    #[serde(alias = "POST")]
    Post,
    #[serde(alias = "PUT")]
    Put,
    #[serde(alias = "PATCH")]
    Patch,
    #[serde(alias = "DELETE")]
    Delete,
    #[serde(alias = "HEAD")]
    Head,
    #[serde(alias = "OPTIONS")]
    Options,
    #[serde(alias = "TRACE")]
    Trace,
}

impl HttpVerb {
    /// Lowercase verb, as used by the Rails routing DSL.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Patch => "patch",
            HttpVerb::Delete => "delete",
            HttpVerb::Head => "head",
            HttpVerb::Options => "options",
            HttpVerb::Trace => "trace",
        }
    }
}

/// Where a method parameter travels in the HTTP request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub array: Option<ArrayFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Body,
    Path,
    Query,
    Header,
}

/// Serialization style of an array parameter outside the body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// Comma separated.
    #[default]
    Csv,
    /// Pipe separated.
    Pipes,
    /// Space separated.
    Ssv,
    /// Tab separated.
    Tsv,
}

impl ArrayFormat {
    pub fn separator(&self) -> char {
        match self {
            ArrayFormat::Csv => ',',
            ArrayFormat::Pipes => '|',
            ArrayFormat::Ssv => ' ',
            ArrayFormat::Tsv => '\t',
        }
    }
}
