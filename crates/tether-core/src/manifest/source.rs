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

use super::{ContentUniverse, ResolutionTable, TableBuilder, TableError};
use crate::asset::AssetTypeRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The environment a process runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Content is read straight from the project tree and may change at any time.
    #[default]
    Authoring,
    /// Content ships with a baked table that never changes during the process.
    Deployed,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Authoring => f.write_str("authoring"),
            Environment::Deployed => f.write_str("deployed"),
        }
    }
}

/// Where a [`TableProvider`](super::TableProvider) gets its table from.
///
/// The composition root picks one implementation explicitly: [`BuildFromScan`]
/// when authoring, or a baked-table loader when deployed.
pub trait TableSource: Send + Sync {
    /// The environment this source serves.
    fn environment(&self) -> Environment;

    /// Produces a complete, indexed table.
    fn acquire(&self, types: &AssetTypeRegistry) -> Result<ResolutionTable, TableError>;
}

impl<S: TableSource + ?Sized> TableSource for Box<S> {
    fn environment(&self) -> Environment {
        (**self).environment()
    }

    fn acquire(&self, types: &AssetTypeRegistry) -> Result<ResolutionTable, TableError> {
        (**self).acquire(types)
    }
}

/// A [`TableSource`] that rescans the content universe on every acquisition.
pub struct BuildFromScan<U: ContentUniverse> {
    universe: U,
    builder: TableBuilder,
}

impl<U: ContentUniverse> BuildFromScan<U> {
    /// Creates a source scanning `universe` with `builder`.
    pub fn new(universe: U, builder: TableBuilder) -> Self {
        Self { universe, builder }
    }

    /// The scanned universe.
    pub fn universe(&self) -> &U {
        &self.universe
    }
}

impl<U: ContentUniverse> TableSource for BuildFromScan<U> {
    fn environment(&self) -> Environment {
        Environment::Authoring
    }

    fn acquire(&self, _types: &AssetTypeRegistry) -> Result<ResolutionTable, TableError> {
        self.builder.build(&self.universe)
    }
}
