use std::fs;
use std::path::Path;

use crate::error::ParseError;
use crate::ir::Service;

/// Parse a service description from YAML.
pub fn from_yaml(input: &str) -> Result<Service, ParseError> {
    let service: Service = serde_yaml_ng::from_str(input)?;
    Ok(service)
}

/// Parse a service description from JSON.
pub fn from_json(input: &str) -> Result<Service, ParseError> {
    let service: Service = serde_json::from_str(input)?;
    Ok(service)
}

/// Read and parse a service description, picking the format from the file extension.
pub fn from_path(path: &Path) -> Result<Service, ParseError> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let service = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => from_yaml(&content)?,
        _ => from_json(&content)?,
    };
    log::debug!(
        "parsed {}: {} interfaces, {} types, {} enums",
        path.display(),
        service.interfaces.len(),
        service.types.len(),
        service.enums.len()
    );
    Ok(service)
}
