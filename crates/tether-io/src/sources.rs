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

use crate::BakedTable;
use tether_core::asset::AssetTypeRegistry;
use tether_core::manifest::{Environment, ResolutionTable, TableError, TableSource};

/// The deployed table source: reads the baked artifact once.
#[derive(Debug, Clone)]
pub struct LoadBaked {
    baked: BakedTable,
}

impl LoadBaked {
    /// Creates a source reading `baked`.
    pub fn new(baked: BakedTable) -> Self {
        Self { baked }
    }

    /// The artifact this source reads.
    pub fn baked(&self) -> &BakedTable {
        &self.baked
    }
}

impl TableSource for LoadBaked {
    fn environment(&self) -> Environment {
        Environment::Deployed
    }

    fn acquire(&self, types: &AssetTypeRegistry) -> Result<ResolutionTable, TableError> {
        let table = self.baked.read()?;
        let stale = table
            .entries()
            .iter()
            .filter(|entry| !types.contains(entry.asset_type()))
            .inspect(|entry| {
                log::warn!(
                    "Baked entry '{}' has unregistered type '{}' and will never resolve",
                    entry.location(),
                    entry.asset_type()
                )
            })
            .count();
        if stale > 0 {
            log::warn!(
                "'{}' holds {} entries with unknown types; rebake the content",
                self.baked.path().display(),
                stale
            );
        }
        Ok(table)
    }
}
