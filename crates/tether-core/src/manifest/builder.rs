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

//! Builds a [`ResolutionTable`] by scanning the whole content universe.

use super::{ContentUniverse, ManifestEntry, ResolutionTable, TableError};
use crate::asset::AssetTypeName;
use ahash::AHashSet;

/// The folder name that marks the root of the runtime load namespace.
pub const DEFAULT_MARKER: &str = "Resources";

/// Scans a [`ContentUniverse`] and produces a fresh [`ResolutionTable`].
///
/// Only items stored below a folder named after the marker are reachable at
/// runtime. Their location is the part of the path after the *first* marker
/// segment, without extension. Opaque items and both manifest types are never
/// recorded.
///
/// Every call is a full rescan; the result depends only on the current state
/// of the universe.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    marker: String,
}

impl TableBuilder {
    /// Creates a builder using [`DEFAULT_MARKER`].
    pub fn new() -> Self {
        Self::with_marker(DEFAULT_MARKER)
    }

    /// Creates a builder with a custom folder marker. Matching is case-sensitive.
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The folder marker in use.
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Returns `true` for types that never become entries.
    pub fn is_excluded_type(asset_type: &AssetTypeName) -> bool {
        *asset_type == AssetTypeName::OPAQUE
            || *asset_type == AssetTypeName::RESOURCE_MANIFEST
            || *asset_type == AssetTypeName::SCENE_MANIFEST
    }

    /// Derives the runtime location of `path`, or `None` if it is not below the marker.
    ///
    /// `"Content/Resources/UI/Icon.asset"` becomes `"UI/Icon"`.
    pub fn derive_location(&self, path: &str) -> Option<String> {
        let stripped = strip_extension(path);
        let mut segments = stripped.split('/');
        segments.by_ref().find(|segment| *segment == self.marker)?;
        let location = segments.collect::<Vec<_>>().join("/");
        if location.is_empty() {
            None
        } else {
            Some(location)
        }
    }

    /// Scans `universe` and returns the indexed table.
    pub fn build(&self, universe: &dyn ContentUniverse) -> Result<ResolutionTable, TableError> {
        let items = universe.items()?;
        let scanned = items.len();
        let mut seen = AHashSet::with_capacity(items.len());
        let mut entries = Vec::new();

        for item in items {
            if Self::is_excluded_type(&item.asset_type) {
                log::trace!("Skipping '{}' ({})", item.path, item.asset_type);
                continue;
            }
            let Some(location) = self.derive_location(&item.path) else {
                continue;
            };
            let Some(uuid) = universe.identifier_of(&item.path) else {
                log::warn!("No identifier for '{}', skipping it", item.path);
                continue;
            };
            if !seen.insert(uuid) {
                log::warn!(
                    "'{}' shares identifier {} with an earlier item, skipping it",
                    item.path,
                    uuid
                );
                continue;
            }
            log::debug!("{} -> '{}' ({})", uuid, location, item.asset_type);
            entries.push(ManifestEntry::new(uuid, location, item.asset_type));
        }

        log::info!(
            "Resolution table built: {} entries from {} scanned items (marker '{}')",
            entries.len(),
            scanned,
            self.marker
        );
        ResolutionTable::from_entries(entries)
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Removes the extension of the last path segment, if it has one.
fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |slash| slash + 1);
    match path[name_start..].rfind('.') {
        Some(0) | None => path,
        Some(dot) => &path[..name_start + dot],
    }
}
