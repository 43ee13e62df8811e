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

//! A [`ContentUniverse`] backed by a directory tree.
//!
//! Every regular file below the root is a content item. Its type comes from its
//! extension through the [`AssetTypeRegistry`], and its identifier comes from a
//! RON sidecar next to it (`Icon.png.meta`):
//!
//! ```ron
//! (
//!   uuid: "67e55044-10b1-426f-9247-bb680e5fe0c8",
//! )
//! ```
//!
//! Files without a sidecar get a name-based identifier derived from their
//! relative path. That identifier changes when the file moves, so tools should
//! [stamp](FileSystemUniverse::stamp_sidecar) content they want to keep stable.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tether_core::asset::{AssetTypeRegistry, AssetUUID};
use tether_core::manifest::{ContentItem, ContentUniverse, TableBuilder, TableError};
use walkdir::WalkDir;

/// Extension of identifier sidecar files. Sidecars are never content items.
pub const SIDECAR_EXTENSION: &str = "meta";

#[derive(Debug, Serialize, Deserialize)]
struct Sidecar {
    uuid: String,
}

/// Content enumerated from a directory on disk.
#[derive(Debug, Clone)]
pub struct FileSystemUniverse {
    root: PathBuf,
    types: Arc<AssetTypeRegistry>,
}

impl FileSystemUniverse {
    /// Creates a universe rooted at `root`. Nothing is read until it is scanned.
    pub fn new(root: impl Into<PathBuf>, types: Arc<AssetTypeRegistry>) -> Self {
        Self {
            root: root.into(),
            types,
        }
    }

    /// The content root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the sidecar path of the item at `path` (relative to the root).
    pub fn sidecar_path(&self, path: &str) -> PathBuf {
        self.root.join(format!("{path}.{SIDECAR_EXTENSION}"))
    }

    /// Writes a sidecar with a fresh random identifier for the item at `path`.
    ///
    /// If the item already has a readable sidecar, its identifier is kept and
    /// returned unchanged.
    pub fn stamp_sidecar(&self, path: &str) -> Result<AssetUUID, TableError> {
        if let Some(existing) = self.read_sidecar(path) {
            return Ok(existing);
        }

        let uuid = AssetUUID::new();
        let sidecar = Sidecar {
            uuid: uuid.to_string(),
        };
        let pretty = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        let text = ron::ser::to_string_pretty(&sidecar, pretty)
            .map_err(|e| TableError::Corrupt(e.to_string()))?;
        fs::write(self.sidecar_path(path), text)?;
        log::debug!("Stamped '{path}' with {uuid}");
        Ok(uuid)
    }

    /// Stamps every item lacking a sidecar. Returns the newly stamped items.
    pub fn stamp_all(&self) -> Result<Vec<(String, AssetUUID)>, TableError> {
        let mut stamped = Vec::new();
        for item in self.items()? {
            if TableBuilder::is_excluded_type(&item.asset_type) {
                continue;
            }
            if self.sidecar_path(&item.path).is_file() {
                continue;
            }
            let uuid = self.stamp_sidecar(&item.path)?;
            stamped.push((item.path, uuid));
        }
        Ok(stamped)
    }

    fn read_sidecar(&self, path: &str) -> Option<AssetUUID> {
        let sidecar_path = self.sidecar_path(path);
        let text = fs::read_to_string(&sidecar_path).ok()?;
        let parsed = ron::from_str::<Sidecar>(&text)
            .map_err(|e| e.to_string())
            .and_then(|sidecar| sidecar.uuid.parse::<AssetUUID>().map_err(|e| e.to_string()));
        match parsed {
            Ok(uuid) => Some(uuid),
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable sidecar '{}': {}",
                    sidecar_path.display(),
                    e
                );
                None
            }
        }
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let segments = relative
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;
        Some(segments.join("/"))
    }
}

impl ContentUniverse for FileSystemUniverse {
    fn items(&self) -> Result<Vec<ContentItem>, TableError> {
        if !self.root.is_dir() {
            return Err(TableError::Enumeration(format!(
                "content root '{}' is not a directory",
                self.root.display()
            )));
        }

        let mut items = Vec::new();
        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry.map_err(|e| TableError::Enumeration(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let extension = path
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default();
            if extension.eq_ignore_ascii_case(SIDECAR_EXTENSION) {
                continue;
            }
            let Some(relative) = self.relative_path(path) else {
                log::warn!("Skipping '{}': path is not valid UTF-8", path.display());
                continue;
            };
            items.push(ContentItem::new(
                relative,
                self.types.type_for_extension(extension),
            ));
        }
        Ok(items)
    }

    fn identifier_of(&self, path: &str) -> Option<AssetUUID> {
        if !self.root.join(path).is_file() {
            return None;
        }
        Some(
            self.read_sidecar(path)
                .unwrap_or_else(|| AssetUUID::new_v5(path)),
        )
    }
}
