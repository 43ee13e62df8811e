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

use super::TableError;
use crate::asset::{AssetTypeName, AssetUUID};

/// A content item as seen by an authoring-time scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    /// The full path of the item, `/`-separated, extension included.
    pub path: String,
    /// The most-derived declared type of the item.
    pub asset_type: AssetTypeName,
}

impl ContentItem {
    /// Creates a new content item.
    pub fn new(path: impl Into<String>, asset_type: AssetTypeName) -> Self {
        Self {
            path: path.into(),
            asset_type,
        }
    }
}

/// The set of all content known at authoring time.
///
/// A concrete implementation typically walks a project directory; tests use
/// an in-memory list.
pub trait ContentUniverse: Send + Sync {
    /// Enumerates every known content item.
    fn items(&self) -> Result<Vec<ContentItem>, TableError>;

    /// Maps a full path to the stable identifier of the item stored there.
    fn identifier_of(&self, path: &str) -> Option<AssetUUID>;

    /// Maps an identifier back to the full path of its item, if it is known.
    ///
    /// Used only for authoring-time diagnostics. The default performs a scan.
    fn path_of(&self, uuid: &AssetUUID) -> Option<String> {
        self.items()
            .ok()?
            .into_iter()
            .find(|item| self.identifier_of(&item.path).as_ref() == Some(uuid))
            .map(|item| item.path)
    }
}
