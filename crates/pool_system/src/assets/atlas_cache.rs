//! Atlas cache for pre-loaded sprites
//!
//! Loads every sprite of each configured atlas texture once at startup and
//! serves them by `(group key, sprite name)` afterwards. Lookups never touch
//! the loader again.

use std::collections::HashMap;

use thiserror::Error;

use crate::config::AtlasSettings;

/// External facility that loads the named sub-resources stored under a path
pub trait AssetLoader {
    /// Opaque handle to one loaded sub-resource
    type Handle: Clone;

    /// Load every named sub-resource under `path`
    ///
    /// Returns an empty list when nothing exists at `path`.
    fn load_all(&mut self, path: &str) -> Vec<(String, Self::Handle)>;
}

/// Atlas cache errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtlasError {
    /// The settings did not name a resource folder
    #[error("Resource folder path is required")]
    MissingResourceFolder,

    /// No sprite with this name was cached under the key
    #[error("Sprite '{name}' not found in atlas '{key}'")]
    NotFound {
        /// Atlas group key
        key: String,
        /// Sprite name
        name: String,
    },
}

/// Build-once map of `group key -> sprite name -> handle`
#[derive(Debug, Clone)]
pub struct AtlasCache<H> {
    groups: HashMap<String, HashMap<String, H>>,
}

impl<H: Clone> AtlasCache<H> {
    /// Load every configured atlas through `loader`
    ///
    /// The first atlas listed under a key wins; later atlases with the same
    /// key are skipped. Within one atlas the first sprite of a given name wins.
    ///
    /// # Errors
    ///
    /// [`AtlasError::MissingResourceFolder`] if `settings.resource_folder` is empty.
    pub fn build<L>(settings: &AtlasSettings, loader: &mut L) -> Result<Self, AtlasError>
    where
        L: AssetLoader<Handle = H>,
    {
        if settings.resource_folder.is_empty() {
            log::error!("Resource folder path must be set to build the atlas cache");
            return Err(AtlasError::MissingResourceFolder);
        }

        let mut groups: HashMap<String, HashMap<String, H>> = HashMap::new();
        for atlas in &settings.atlases {
            if groups.contains_key(&atlas.key) {
                log::warn!(
                    "Skipping atlas '{}': key '{}' is already loaded",
                    atlas.texture,
                    atlas.key
                );
                continue;
            }

            let path = format!("{}{}", settings.resource_folder, atlas.texture);
            let mut sprites = HashMap::new();
            for (name, handle) in loader.load_all(&path) {
                sprites.entry(name).or_insert(handle);
            }

            log::debug!("Loaded {} sprites from '{}' as '{}'", sprites.len(), path, atlas.key);
            groups.insert(atlas.key.clone(), sprites);
        }

        log::info!("Atlas cache ready with {} atlases", groups.len());
        Ok(Self { groups })
    }

    /// Get the sprite cached under `key` with `name`
    ///
    /// # Errors
    ///
    /// [`AtlasError::NotFound`] when the key or the sprite name is unknown.
    pub fn get(&self, key: &str, name: &str) -> Result<&H, AtlasError> {
        self.groups
            .get(key)
            .and_then(|sprites| sprites.get(name))
            .ok_or_else(|| {
                log::error!("Sprite '{}' can not be found in atlas '{}'", name, key);
                AtlasError::NotFound {
                    key: key.to_string(),
                    name: name.to_string(),
                }
            })
    }

    /// Check whether a sprite is cached
    pub fn contains(&self, key: &str, name: &str) -> bool {
        self.groups.get(key).is_some_and(|sprites| sprites.contains_key(name))
    }

    /// Loaded atlas keys, in no particular order
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Number of loaded atlases
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no atlas was loaded
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of cached sprites
    pub fn sprite_count(&self) -> usize {
        self.groups.values().map(HashMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AtlasEntrySettings;

    /// Loader serving fixed sprite lists and recording requested paths
    #[derive(Default)]
    struct FixtureLoader {
        files: HashMap<String, Vec<(String, u32)>>,
        requests: Vec<String>,
    }

    impl FixtureLoader {
        fn with(mut self, path: &str, sprites: &[(&str, u32)]) -> Self {
            let sprites = sprites.iter().map(|(name, id)| ((*name).to_string(), *id)).collect();
            self.files.insert(path.to_string(), sprites);
            self
        }
    }

    impl AssetLoader for FixtureLoader {
        type Handle = u32;

        fn load_all(&mut self, path: &str) -> Vec<(String, u32)> {
            self.requests.push(path.to_string());
            self.files.get(path).cloned().unwrap_or_default()
        }
    }

    fn settings(atlases: &[(&str, &str)]) -> AtlasSettings {
        AtlasSettings {
            resource_folder: "Sprites/".to_string(),
            atlases: atlases
                .iter()
                .map(|(key, texture)| AtlasEntrySettings {
                    key: (*key).to_string(),
                    texture: (*texture).to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_build_and_lookup() {
        let mut loader = FixtureLoader::default()
            .with("Sprites/ui_atlas", &[("button", 1), ("panel", 2)])
            .with("Sprites/ships", &[("frigate", 3)]);

        let cache = AtlasCache::build(&settings(&[("ui", "ui_atlas"), ("ships", "ships")]), &mut loader).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.sprite_count(), 3);
        assert_eq!(cache.get("ui", "panel"), Ok(&2));
        assert_eq!(cache.get("ships", "frigate"), Ok(&3));
        assert_eq!(loader.requests, vec!["Sprites/ui_atlas", "Sprites/ships"]);
    }

    #[test]
    fn test_missing_sprite_is_reported() {
        let mut loader = FixtureLoader::default().with("Sprites/ui_atlas", &[("button", 1)]);
        let cache = AtlasCache::build(&settings(&[("ui", "ui_atlas")]), &mut loader).unwrap();

        assert_eq!(
            cache.get("ui", "slider"),
            Err(AtlasError::NotFound {
                key: "ui".to_string(),
                name: "slider".to_string(),
            })
        );
        assert!(cache.get("hud", "button").is_err());
        assert!(!cache.contains("hud", "button"));
    }

    #[test]
    fn test_first_key_and_first_name_win() {
        let mut loader = FixtureLoader::default()
            .with("Sprites/a", &[("icon", 1), ("icon", 9)])
            .with("Sprites/b", &[("icon", 5)]);

        let cache = AtlasCache::build(&settings(&[("ui", "a"), ("ui", "b")]), &mut loader).unwrap();

        assert_eq!(cache.get("ui", "icon"), Ok(&1));
        assert_eq!(loader.requests, vec!["Sprites/a"]);
    }

    #[test]
    fn test_missing_resource_folder() {
        let mut loader = FixtureLoader::default();
        let mut atlas_settings = settings(&[("ui", "ui_atlas")]);
        atlas_settings.resource_folder.clear();

        let result = AtlasCache::build(&atlas_settings, &mut loader);
        assert_eq!(result.err(), Some(AtlasError::MissingResourceFolder));
        assert!(loader.requests.is_empty());
    }
}
