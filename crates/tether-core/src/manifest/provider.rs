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

//! Owns the single live resolution table of a process.

use super::{Environment, ResolutionTable, TableError, TableSource};
use crate::asset::{AssetTypeName, AssetTypeRegistry, AssetUUID};
use arc_swap::ArcSwapOption;
use std::sync::Arc;

/// Holds the one authoritative [`ResolutionTable`] of a process.
///
/// The provider is created once by the composition root, before anything that
/// resolves references runs, and is then shared (usually behind an `Arc`).
/// Readers never block: the live table is published through an atomic pointer,
/// and a query works on the snapshot it loaded.
///
/// In the deployed environment a missing baked table is not fatal. The provider
/// simply holds no table and every lookup fails closed.
pub struct TableProvider {
    source: Box<dyn TableSource>,
    types: Arc<AssetTypeRegistry>,
    table: ArcSwapOption<ResolutionTable>,
}

impl TableProvider {
    /// Acquires the table from `source` exactly once.
    ///
    /// Failure is logged and leaves the provider without a table.
    pub fn boot(source: impl TableSource + 'static, types: Arc<AssetTypeRegistry>) -> Self {
        let source: Box<dyn TableSource> = Box::new(source);
        let environment = source.environment();
        let table = match source.acquire(&types) {
            Ok(table) => {
                log::info!(
                    "TableProvider: {} table ready with {} entries",
                    environment,
                    table.len()
                );
                Some(Arc::new(table))
            }
            Err(e) => {
                log::error!(
                    "TableProvider: no {environment} table available ({e}). All lookups will fail."
                );
                None
            }
        };

        Self {
            source,
            types,
            table: ArcSwapOption::new(table),
        }
    }

    /// Creates a provider around an already built table.
    ///
    /// The `source` is only consulted again by [`rebuild`](Self::rebuild).
    pub fn with_table(
        source: impl TableSource + 'static,
        types: Arc<AssetTypeRegistry>,
        table: ResolutionTable,
    ) -> Self {
        Self {
            source: Box::new(source),
            types,
            table: ArcSwapOption::new(Some(Arc::new(table))),
        }
    }

    /// The environment of the underlying source.
    pub fn environment(&self) -> Environment {
        self.source.environment()
    }

    /// The type registry lookups are checked against.
    pub fn types(&self) -> &Arc<AssetTypeRegistry> {
        &self.types
    }

    /// Returns a snapshot of the live table, if there is one.
    pub fn table(&self) -> Option<Arc<ResolutionTable>> {
        self.table.load_full()
    }

    /// Returns `true` if a table is held.
    pub fn is_available(&self) -> bool {
        self.table.load().is_some()
    }

    /// Looks up the location of `uuid` as `requested` in the live table.
    ///
    /// Returns `None` when there is no table, no entry, or a type mismatch.
    pub fn lookup_location(&self, uuid: &AssetUUID, requested: &AssetTypeName) -> Option<String> {
        let guard = self.table.load();
        let table = (*guard).as_ref()?;
        table
            .lookup_location(uuid, requested, &self.types)
            .map(str::to_owned)
    }

    /// Re-acquires the table and replaces the live one.
    ///
    /// Only allowed when authoring. The previous table stays live if the
    /// acquisition fails.
    ///
    /// # Errors
    /// Returns [`TableError::RefreshUnsupported`] in the deployed environment,
    /// or the source's error.
    pub fn rebuild(&self) -> Result<Arc<ResolutionTable>, TableError> {
        if self.environment() == Environment::Deployed {
            return Err(TableError::RefreshUnsupported);
        }
        let table = Arc::new(self.source.acquire(&self.types)?);
        log::info!("TableProvider: table rebuilt with {} entries", table.len());
        self.table.store(Some(Arc::clone(&table)));
        Ok(table)
    }
}
