//! Configuration system
//!
//! Pool and atlas settings are plain serde structs that load from `.toml` or
//! `.ron` files at startup. Template names in the files are resolved against
//! the host's templates before the pools are built.

use std::path::Path;

pub use serde::{Serialize, Deserialize};

use crate::pooling::PoolConfig;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file, picking the format by extension
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        match Format::of(path)? {
            Format::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            Format::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Save configuration to file, picking the format by extension
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match Format::of(path)? {
            Format::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum Format {
    Toml,
    Ron,
}

impl Format {
    fn of(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// One pool record as written in a settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntrySettings {
    /// Registry key
    pub key: String,
    /// Template name, resolved against the host's templates
    #[serde(default)]
    pub template: Option<String>,
    /// Initial pool size; non-positive values become 1
    #[serde(default = "default_pool_size")]
    pub size: i32,
}

const fn default_pool_size() -> i32 {
    1
}

/// Pools to build at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSettings {
    /// Pool records in registration order
    #[serde(default)]
    pub pools: Vec<PoolEntrySettings>,
}

impl Config for PoolSettings {}

impl PoolSettings {
    /// Turn the records into pool configurations
    ///
    /// `lookup` maps a template name to a template. Records whose template is
    /// absent or unknown keep `template: None` and are rejected when the
    /// registry is initialized, without affecting the other records.
    pub fn resolve<T>(&self, mut lookup: impl FnMut(&str) -> Option<T>) -> Vec<PoolConfig<T>> {
        self.pools
            .iter()
            .map(|entry| {
                let template = entry.template.as_deref().and_then(&mut lookup);
                if template.is_none() {
                    log::warn!(
                        "Pool '{}' references unknown template {:?}",
                        entry.key,
                        entry.template
                    );
                }
                PoolConfig {
                    key: entry.key.clone(),
                    template,
                    size: entry.size,
                }
            })
            .collect()
    }
}

/// One atlas texture grouped under a key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasEntrySettings {
    /// Group key the atlas sprites are looked up by
    pub key: String,
    /// Texture name appended to the resource folder
    pub texture: String,
}

/// Atlases to pre-load at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasSettings {
    /// Folder prefix every texture path starts with
    #[serde(default)]
    pub resource_folder: String,
    /// Atlas textures in load order
    #[serde(default)]
    pub atlases: Vec<AtlasEntrySettings>,
}

impl Config for AtlasSettings {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const POOLS_TOML: &str = r#"
[[pools]]
key = "bullet"
template = "Bullet"
size = 32

[[pools]]
key = "ghost"

[[pools]]
key = "rock"
template = "Rock"
size = -3
"#;

    #[test]
    fn test_load_pool_settings_from_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", POOLS_TOML).unwrap();

        let settings = PoolSettings::load_from_file(file.path()).unwrap();

        assert_eq!(settings.pools.len(), 3);
        assert_eq!(settings.pools[0].size, 32);
        assert_eq!(settings.pools[1].template, None);
        assert_eq!(settings.pools[1].size, 1);
        assert_eq!(settings.pools[2].size, -3);
    }

    #[test]
    fn test_resolve_marks_unknown_templates() {
        let settings: PoolSettings = toml::from_str(POOLS_TOML).unwrap();

        let configs = settings.resolve(|name| (name == "Bullet").then(|| name.to_uppercase()));

        assert_eq!(configs.len(), 3);
        assert_eq!(configs[0].template.as_deref(), Some("BULLET"));
        assert!(configs[1].template.is_none());
        assert!(configs[2].template.is_none());
        assert_eq!(configs[2].effective_size(), 1);
    }

    #[test]
    fn test_ron_round_trip() {
        let file = Builder::new().suffix(".ron").tempfile().unwrap();
        let settings = AtlasSettings {
            resource_folder: "Sprites/".to_string(),
            atlases: vec![AtlasEntrySettings {
                key: "ui".to_string(),
                texture: "ui_atlas".to_string(),
            }],
        };

        settings.save_to_file(file.path()).unwrap();
        let loaded = AtlasSettings::load_from_file(file.path()).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_unsupported_extension() {
        let file = Builder::new().suffix(".json").tempfile().unwrap();

        let result = PoolSettings::load_from_file(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
