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

use super::Asset;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, fmt};

/// The declared type tag of an asset, as recorded in a manifest entry.
///
/// Tags are plain names resolved through an
/// [`AssetTypeRegistry`](super::AssetTypeRegistry). A few tags are reserved by
/// the manifest machinery itself and are always present in a registry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetTypeName(Cow<'static, str>);

impl AssetTypeName {
    /// The root of the type hierarchy. Every registered type descends from it.
    pub const OBJECT: Self = Self::from_static("object");
    /// Placeholder for content whose type could not be determined.
    pub const OPAQUE: Self = Self::from_static("opaque");
    /// The type of a baked resolution table.
    pub const RESOURCE_MANIFEST: Self = Self::from_static("resource_manifest");
    /// The type of the sibling scene-list manifest.
    pub const SCENE_MANIFEST: Self = Self::from_static("scene_manifest");
    /// The type of scene content.
    pub const SCENE: Self = Self::from_static("scene");

    /// Creates a type name from a static string.
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Creates a type name from any string.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the type name declared by `A`.
    pub const fn of<A: Asset>() -> Self {
        Self::from_static(A::TYPE_NAME)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for AssetTypeName {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for AssetTypeName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}
