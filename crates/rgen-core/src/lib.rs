pub mod config;
pub mod error;
pub mod ir;
pub mod naming;
pub mod parse;

pub use error::{GeneratorError, ParseError};

/// A generated file: directory segments followed by the file name, plus its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: Vec<String>,
    pub content: String,
}

impl GeneratedFile {
    /// The file name (last path segment).
    pub fn file_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }

    /// Path segments joined with `/`.
    pub fn display_path(&self) -> String {
        self.path.join("/")
    }
}

/// Trait for code generators that produce files from a service description.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        service: &ir::Service,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
