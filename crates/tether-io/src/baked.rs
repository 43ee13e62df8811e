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

//! The baked resolution table artifact (`resources.manifest`).
//!
//! The artifact is the bincode encoding (standard configuration) of the table's
//! entry sequence. The lookup index is rebuilt when it is decoded.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tether_core::manifest::{ResolutionTable, TableError};

/// File name of the baked table inside the deployed load namespace.
pub const BAKED_TABLE_FILE: &str = "resources.manifest";

/// A baked table artifact at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BakedTable {
    path: PathBuf,
}

impl BakedTable {
    /// Refers to the artifact at `path`. Nothing is read until [`read`](Self::read).
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The artifact path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if the artifact exists on disk.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Encodes `table` into the artifact format.
    pub fn encode(table: &ResolutionTable) -> Result<Vec<u8>, TableError> {
        let config = bincode::config::standard();
        bincode::serde::encode_to_vec(table, config).map_err(|e| TableError::Corrupt(e.to_string()))
    }

    /// Decodes an artifact, rebuilding the lookup index.
    ///
    /// # Errors
    /// Returns [`TableError::Corrupt`] if the bytes are not a valid table,
    /// including trailing garbage and duplicate identifiers.
    pub fn decode(bytes: &[u8]) -> Result<ResolutionTable, TableError> {
        let config = bincode::config::standard();
        let (table, read): (ResolutionTable, usize) =
            bincode::serde::decode_from_slice(bytes, config)
                .map_err(|e| TableError::Corrupt(e.to_string()))?;
        if read != bytes.len() {
            return Err(TableError::Corrupt(format!(
                "{} trailing bytes after the table",
                bytes.len() - read
            )));
        }
        Ok(table)
    }

    /// Writes `table` to the artifact path, creating parent directories.
    ///
    /// The bytes go to a temporary file first, which then replaces the artifact,
    /// so a reader never sees a half-written table.
    pub fn write(&self, table: &ResolutionTable) -> Result<usize, TableError> {
        let bytes = Self::encode(table)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let staging = self.path.with_extension("manifest.tmp");
        fs::write(&staging, &bytes)?;
        fs::rename(&staging, &self.path)?;
        log::info!(
            "Baked {} entries to '{}' ({} bytes)",
            table.len(),
            self.path.display(),
            bytes.len()
        );
        Ok(bytes.len())
    }

    /// Reads and decodes the artifact.
    ///
    /// # Errors
    /// Returns [`TableError::Unavailable`] if the artifact does not exist.
    pub fn read(&self) -> Result<ResolutionTable, TableError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(TableError::Unavailable(self.path.display().to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Self::decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tether_core::asset::AssetUUID;
    use tether_core::manifest::ManifestEntry;

    fn sample() -> ResolutionTable {
        ResolutionTable::from_entries(vec![
            ManifestEntry::new(AssetUUID::new(), "UI/Icon", "texture".into()),
            ManifestEntry::new(AssetUUID::new(), "UI/Logo", "sprite".into()),
        ])
        .unwrap()
    }

    #[test]
    fn write_then_read_preserves_every_entry() {
        let dir = tempdir().unwrap();
        let baked = BakedTable::at(dir.path().join("Resources").join(BAKED_TABLE_FILE));
        let table = sample();

        baked.write(&table).unwrap();
        assert!(baked.exists());
        let restored = baked.read().unwrap();
        assert_eq!(restored.entries(), table.entries());
        for entry in table.entries() {
            assert_eq!(restored.get(&entry.uuid()), Some(entry));
        }
    }

    #[test]
    fn missing_artifact_is_unavailable() {
        let dir = tempdir().unwrap();
        let baked = BakedTable::at(dir.path().join(BAKED_TABLE_FILE));
        assert!(matches!(baked.read(), Err(TableError::Unavailable(_))));
    }

    #[test]
    fn garbage_is_reported_as_corrupt() {
        assert!(matches!(
            BakedTable::decode(&[0xff, 0xff, 0xff]),
            Err(TableError::Corrupt(_))
        ));

        let mut bytes = BakedTable::encode(&sample()).unwrap();
        bytes.push(0);
        assert!(matches!(
            BakedTable::decode(&bytes),
            Err(TableError::Corrupt(_))
        ));
    }
}
