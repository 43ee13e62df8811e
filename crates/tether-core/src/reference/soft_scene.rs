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

use super::SoftObjectReference;
use crate::asset::AssetUUID;
use crate::manifest::ContentUniverse;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An open scene, as seen by authoring tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHandle {
    /// The full path of the scene file.
    pub path: String,
}

/// A serializable reference to a scene.
///
/// Scenes are loaded by a dedicated scene loader which only consumes the
/// identifier, so this reference carries no type parameter and offers no load
/// operation of its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoftSceneReference {
    #[serde(deserialize_with = "super::deserialize_uuid")]
    uuid: Option<AssetUUID>,
}

impl SoftSceneReference {
    /// Creates a reference from a known identifier.
    pub const fn from_uuid(uuid: AssetUUID) -> Self {
        Self { uuid: Some(uuid) }
    }

    /// Creates a reference to the scene stored at `path`.
    ///
    /// Returns `None` if `universe` has no identifier for that path.
    pub fn of_path(universe: &dyn ContentUniverse, path: &str) -> Option<Self> {
        universe.identifier_of(path).map(Self::from_uuid)
    }

    /// Creates a reference to an open scene.
    pub fn of_scene(universe: &dyn ContentUniverse, scene: &SceneHandle) -> Option<Self> {
        Self::of_path(universe, &scene.path)
    }

    /// The referenced identifier, if any.
    pub fn uuid(&self) -> Option<AssetUUID> {
        self.uuid
    }

    /// Returns `true` if the reference holds an identifier.
    pub fn is_valid(&self) -> bool {
        self.uuid.is_some()
    }

    /// Renders the reference with the scene's full path, for authoring tools.
    pub fn describe(&self, universe: &dyn ContentUniverse) -> String {
        match self.uuid.and_then(|uuid| universe.path_of(&uuid)) {
            Some(path) => format!("{path} (Scene)"),
            None => self.to_string(),
        }
    }
}

impl SoftObjectReference for SoftSceneReference {
    fn uuid(&self) -> Option<AssetUUID> {
        self.uuid
    }
}

impl fmt::Display for SoftSceneReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uuid {
            Some(uuid) => write!(f, "{uuid} (Scene)"),
            None => f.write_str("None (Scene)"),
        }
    }
}
