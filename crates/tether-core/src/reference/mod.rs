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

//! Soft references: serializable values that hold only an asset identifier.
//!
//! A soft reference never owns asset data and never caches a location. It is
//! resolved on demand against the live table of a
//! [`TableProvider`](crate::manifest::TableProvider), so it survives content
//! being moved between builds.

mod error;
mod resolver;
mod soft_asset;
mod soft_scene;

pub use error::*;
pub use resolver::*;
pub use soft_asset::*;
pub use soft_scene::*;

use crate::asset::AssetUUID;
use serde::{de::Error as _, Deserialize, Deserializer};

/// Behaviour shared by every kind of soft reference.
pub trait SoftObjectReference {
    /// The referenced identifier, or `None` for an empty reference.
    fn uuid(&self) -> Option<AssetUUID>;

    /// Returns `true` if the reference holds an identifier.
    fn is_valid(&self) -> bool {
        self.uuid().is_some()
    }
}

/// Reads the identifier of a soft reference.
///
/// Text formats also accept an empty string for an empty reference, which is
/// what editors write when a field is cleared.
pub(crate) fn deserialize_uuid<'de, D>(deserializer: D) -> Result<Option<AssetUUID>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Written {
        Text(String),
        Id(AssetUUID),
    }

    if !deserializer.is_human_readable() {
        return Option::<AssetUUID>::deserialize(deserializer);
    }
    match Option::<Written>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Written::Id(uuid)) => Ok(Some(uuid)),
        Some(Written::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Written::Text(text)) => text.parse().map(Some).map_err(D::Error::custom),
    }
}
