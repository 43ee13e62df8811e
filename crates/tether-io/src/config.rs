// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Content configuration, read from `Content.toml`.
//!
//! ```toml
//! content_root = "content"
//! marker = "Resources"
//! environment = "authoring"
//!
//! [[types]]
//! name = "texture"
//! extensions = ["png", "jpg"]
//!
//! [[types]]
//! name = "sprite"
//! parent = "texture"
//! extensions = ["sprite"]
//! ```

use crate::{BakedTable, FileSystemUniverse, LoadBaked, BAKED_TABLE_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tether_core::asset::{AssetTypeName, AssetTypeRegistry, TypeRegistryError};
use tether_core::manifest::{
    BuildFromScan, Environment, TableBuilder, TableSource, DEFAULT_MARKER,
};
use thiserror::Error;

/// Default name of the configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "Content.toml";

/// An error raised while loading or applying a [`ContentConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// The configuration file.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The file is not valid TOML for this structure.
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        /// The configuration file.
        path: PathBuf,
        /// The underlying error.
        source: toml::de::Error,
    },
    /// The declared types do not form a valid registry.
    #[error(transparent)]
    Types(#[from] TypeRegistryError),
}

/// One `[[types]]` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// The type name, matching an `Asset::TYPE_NAME`.
    pub name: String,
    /// The parent type. Must be declared earlier, or be a built-in.
    #[serde(default)]
    pub parent: Option<String>,
    /// File extensions (without the dot) typed as this type.
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Where content lives and how its table is acquired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root of the content tree.
    pub content_root: PathBuf,
    /// Folder name whose descendants are loadable by location.
    pub marker: String,
    /// Which table source to use.
    pub environment: Environment,
    /// Overrides the baked table path. Defaults to
    /// `<content_root>/<marker>/resources.manifest`.
    pub baked_table: Option<PathBuf>,
    /// Project asset types, in registration order.
    pub types: Vec<TypeDeclaration>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_root: PathBuf::from("content"),
            marker: DEFAULT_MARKER.to_string(),
            environment: Environment::Authoring,
            baked_table: None,
            types: Vec::new(),
        }
    }
}

impl ContentConfig {
    /// Loads the configuration at `path`, or the default one if the file does
    /// not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!(
                "No '{}' found. Using default content configuration.",
                path.display()
            );
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded content configuration from '{}'", path.display());
        Ok(config)
    }

    /// Builds the type registry: built-ins plus every declared type.
    pub fn type_registry(&self) -> Result<AssetTypeRegistry, ConfigError> {
        let mut types = AssetTypeRegistry::new();
        for declaration in &self.types {
            let name = AssetTypeName::new(declaration.name.clone());
            let parent = declaration.parent.clone().map(AssetTypeName::new);
            types.register(name.clone(), parent)?;
            for extension in &declaration.extensions {
                types.map_extension(extension, &name)?;
            }
        }
        Ok(types)
    }

    /// A table builder using the configured marker.
    pub fn builder(&self) -> TableBuilder {
        TableBuilder::with_marker(self.marker.clone())
    }

    /// The universe over the configured content root.
    pub fn universe(&self, types: Arc<AssetTypeRegistry>) -> FileSystemUniverse {
        FileSystemUniverse::new(self.content_root.clone(), types)
    }

    /// Path of the baked table artifact.
    pub fn baked_table_path(&self) -> PathBuf {
        self.baked_table.clone().unwrap_or_else(|| {
            self.content_root
                .join(&self.marker)
                .join(BAKED_TABLE_FILE)
        })
    }

    /// The table source for the configured environment.
    pub fn table_source(&self, types: Arc<AssetTypeRegistry>) -> Box<dyn TableSource> {
        match self.environment {
            Environment::Authoring => {
                Box::new(BuildFromScan::new(self.universe(types), self.builder()))
            }
            Environment::Deployed => {
                Box::new(LoadBaked::new(BakedTable::at(self.baked_table_path())))
            }
        }
    }
}
