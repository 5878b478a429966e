//! Serialization formats for descriptor files

use crate::LoadError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;

/// On-disk format of a descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    Yaml,
    Toml,
}

impl Format {
    /// All supported formats
    pub const ALL: [Format; 3] = [Format::Json, Format::Yaml, Format::Toml];

    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "toml" => Some(Format::Toml),
            _ => None,
        }
    }

    /// Canonical file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
            Format::Toml => "toml",
        }
    }

    pub(crate) fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T, LoadError> {
        match self {
            Format::Json => serde_json::from_str(content).map_err(|e| LoadError::parse(self, e)),
            Format::Yaml => serde_yaml::from_str(content).map_err(|e| LoadError::parse(self, e)),
            Format::Toml => toml::from_str(content).map_err(|e| LoadError::parse(self, e)),
        }
    }

    pub(crate) fn encode<T: Serialize>(self, value: &T) -> Result<String, LoadError> {
        match self {
            Format::Json => {
                serde_json::to_string_pretty(value).map_err(|e| LoadError::serialize(self, e))
            }
            Format::Yaml => serde_yaml::to_string(value).map_err(|e| LoadError::serialize(self, e)),
            Format::Toml => {
                toml::to_string_pretty(value).map_err(|e| LoadError::serialize(self, e))
            }
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Json => write!(f, "JSON"),
            Format::Yaml => write!(f, "YAML"),
            Format::Toml => write!(f, "TOML"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("apps.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("apps.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("conf/apps.YAML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("apps.toml")), Some(Format::Toml));

        for format in Format::ALL {
            let file = format!("apps.{}", format.extension());
            assert_eq!(Format::from_path(Path::new(&file)), Some(format));
        }
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(Format::from_path(Path::new("ecosystem.config.js")), None);
        assert_eq!(Format::from_path(Path::new("Procfile")), None);
    }
}
