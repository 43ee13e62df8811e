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

use crate::asset::{AssetTypeName, AssetUUID};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a [`ResolutionTable`](super::ResolutionTable).
///
/// The identifier is stable for the lifetime of the content item. The location
/// is only meaningful inside the runtime load namespace and changes whenever
/// the content is moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    uuid: AssetUUID,
    location: String,
    asset_type: AssetTypeName,
}

impl ManifestEntry {
    /// Creates a new entry.
    pub fn new(uuid: AssetUUID, location: impl Into<String>, asset_type: AssetTypeName) -> Self {
        Self {
            uuid,
            location: location.into(),
            asset_type,
        }
    }

    /// The stable identifier of the content item.
    pub fn uuid(&self) -> AssetUUID {
        self.uuid
    }

    /// The extension-less path relative to the load namespace.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The most-derived type recorded when the table was built.
    pub fn asset_type(&self) -> &AssetTypeName {
        &self.asset_type
    }
}

impl fmt::Display for ManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} ({})", self.location, self.uuid, self.asset_type)
    }
}
