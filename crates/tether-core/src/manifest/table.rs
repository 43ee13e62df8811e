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

use super::{ManifestEntry, TableError};
use crate::asset::{Asset, AssetTypeName, AssetTypeRegistry, AssetUUID};
use ahash::AHashMap;
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

/// The authoritative identifier → (location, type) mapping of a process.
///
/// A table is built in one pass and never mutated afterwards. Every way of
/// constructing one, including deserialization, builds the identifier index
/// before the table is handed out, so lookups are always O(1).
///
/// The serialized form is the bare entry sequence.
#[derive(Debug, Default, Clone)]
pub struct ResolutionTable {
    entries: Vec<ManifestEntry>,
    index: AHashMap<AssetUUID, usize>,
}

impl ResolutionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from a complete entry sequence and indexes it.
    ///
    /// # Errors
    /// Returns [`TableError::DuplicateIdentifier`] if two entries share an identifier.
    pub fn from_entries(entries: Vec<ManifestEntry>) -> Result<Self, TableError> {
        let mut index = AHashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.uuid(), position).is_some() {
                return Err(TableError::DuplicateIdentifier(entry.uuid()));
            }
        }
        Ok(Self { entries, index })
    }

    /// Returns the entry registered for `uuid`, regardless of its type.
    pub fn get(&self, uuid: &AssetUUID) -> Option<&ManifestEntry> {
        self.index.get(uuid).map(|&position| &self.entries[position])
    }

    /// Returns the location of `uuid` if it can be used as `requested`.
    ///
    /// A missing entry yields `None`. An entry whose declared type is not
    /// assignable to `requested`, or is no longer known to `types`, also yields
    /// `None` and logs a warning so that a wrong type can be told apart from a
    /// missing entry while debugging.
    pub fn lookup_location(
        &self,
        uuid: &AssetUUID,
        requested: &AssetTypeName,
        types: &AssetTypeRegistry,
    ) -> Option<&str> {
        let entry = self.get(uuid)?;
        if !types.contains(entry.asset_type()) {
            log::warn!(
                "Asset {} in manifest has type '{}', which is not a registered asset type",
                uuid,
                entry.asset_type()
            );
            return None;
        }
        if !types.is_assignable(requested, entry.asset_type()) {
            log::warn!(
                "Asset {} in manifest was of type '{}', which is not a subtype of '{}'",
                uuid,
                entry.asset_type(),
                requested
            );
            return None;
        }
        Some(entry.location())
    }

    /// Returns every entry whose declared type is `requested` or one of its subtypes.
    ///
    /// The sequence is recomputed on every call and follows insertion order.
    pub fn entries_of<'a>(
        &'a self,
        requested: AssetTypeName,
        types: &'a AssetTypeRegistry,
    ) -> impl Iterator<Item = &'a ManifestEntry> + 'a {
        self.entries
            .iter()
            .filter(move |entry| types.is_assignable(&requested, entry.asset_type()))
    }

    /// Typed form of [`entries_of`](Self::entries_of).
    pub fn entries_of_type<'a, A: Asset>(
        &'a self,
        types: &'a AssetTypeRegistry,
    ) -> impl Iterator<Item = &'a ManifestEntry> + 'a {
        self.entries_of(AssetTypeName::of::<A>(), types)
    }

    /// Returns `true` if any entry has this location, ignoring case.
    pub fn contains_location(&self, path: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| eq_ignore_case(entry.location(), path))
    }

    /// All entries, in insertion order.
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Consumes the table and returns its entries.
    pub fn into_entries(self) -> Vec<ManifestEntry> {
        self.entries
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl Serialize for ResolutionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResolutionTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<ManifestEntry>::deserialize(deserializer)?;
        Self::from_entries(entries).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Texture;
    impl Asset for Texture {
        const TYPE_NAME: &'static str = "texture";
    }

    fn types() -> AssetTypeRegistry {
        let mut types = AssetTypeRegistry::new();
        types.register("texture", None).unwrap();
        types.register("sprite", Some("texture".into())).unwrap();
        types.register("audio_clip", None).unwrap();
        types
    }

    fn sample() -> (ResolutionTable, AssetUUID, AssetUUID, AssetUUID) {
        let icon = AssetUUID::new();
        let logo = AssetUUID::new();
        let music = AssetUUID::new();
        let table = ResolutionTable::from_entries(vec![
            ManifestEntry::new(icon, "UI/Icon", "texture".into()),
            ManifestEntry::new(logo, "UI/Logo", "sprite".into()),
            ManifestEntry::new(music, "Audio/Theme", "audio_clip".into()),
        ])
        .unwrap();
        (table, icon, logo, music)
    }

    #[test]
    fn lookup_with_matching_type_returns_location() {
        let (table, icon, _, _) = sample();
        let types = types();
        assert_eq!(
            table.lookup_location(&icon, &"texture".into(), &types),
            Some("UI/Icon")
        );
    }

    #[test]
    fn lookup_accepts_subtypes_of_the_requested_type() {
        let (table, _, logo, _) = sample();
        let types = types();
        assert_eq!(
            table.lookup_location(&logo, &"texture".into(), &types),
            Some("UI/Logo")
        );
        assert_eq!(
            table.lookup_location(&logo, &AssetTypeName::OBJECT, &types),
            Some("UI/Logo")
        );
    }

    #[test]
    fn lookup_with_incompatible_type_is_empty() {
        let (table, icon, _, music) = sample();
        let types = types();
        assert_eq!(table.lookup_location(&music, &"texture".into(), &types), None);
        assert_eq!(table.lookup_location(&icon, &"sprite".into(), &types), None);
    }

    #[test]
    fn lookup_of_unknown_identifier_is_empty() {
        let (table, _, _, _) = sample();
        let types = types();
        assert_eq!(
            table.lookup_location(&AssetUUID::new(), &"texture".into(), &types),
            None
        );
    }

    #[test]
    fn stale_type_tags_resolve_to_nothing() {
        let stale = AssetUUID::new();
        let table = ResolutionTable::from_entries(vec![ManifestEntry::new(
            stale,
            "Old/Thing",
            "renamed_type".into(),
        )])
        .unwrap();
        let types = types();
        assert_eq!(
            table.lookup_location(&stale, &"renamed_type".into(), &types),
            None
        );
        assert!(table.get(&stale).is_some());
    }

    #[test]
    fn entries_of_type_includes_subtypes_in_insertion_order() {
        let (table, icon, logo, _) = sample();
        let types = types();
        let found: Vec<_> = table
            .entries_of_type::<Texture>(&types)
            .map(ManifestEntry::uuid)
            .collect();
        assert_eq!(found, vec![icon, logo]);

        // Restartable: a second pass yields the same sequence.
        assert_eq!(table.entries_of_type::<Texture>(&types).count(), 2);
        assert_eq!(table.entries_of(AssetTypeName::OBJECT, &types).count(), 3);
    }

    #[test]
    fn contains_location_ignores_case() {
        let (table, _, _, _) = sample();
        assert!(table.contains_location("ui/icon"));
        assert!(table.contains_location("UI/ICON"));
        assert!(!table.contains_location("ui/icon2"));
        assert!(!table.contains_location("UI"));
    }

    #[test]
    fn duplicate_identifiers_are_rejected() {
        let id = AssetUUID::new();
        let result = ResolutionTable::from_entries(vec![
            ManifestEntry::new(id, "A", "texture".into()),
            ManifestEntry::new(id, "B", "texture".into()),
        ]);
        assert!(matches!(result, Err(TableError::DuplicateIdentifier(dup)) if dup == id));
    }

    #[test]
    fn deserialization_rebuilds_the_index() {
        let (table, icon, logo, music) = sample();
        let types = types();
        let json = serde_json::to_string(&table).unwrap();
        let restored: ResolutionTable = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 3);
        for (id, requested) in [(icon, "texture"), (logo, "sprite"), (music, "audio_clip")] {
            assert_eq!(
                restored.lookup_location(&id, &requested.into(), &types),
                table.lookup_location(&id, &requested.into(), &types)
            );
        }
    }

    #[test]
    fn bincode_round_trip_preserves_type_tags() {
        let (table, _, _, _) = sample();
        let config = bincode::config::standard();
        let bytes = bincode::serde::encode_to_vec(&table, config).unwrap();
        let (restored, _): (ResolutionTable, _) =
            bincode::serde::decode_from_slice(&bytes, config).unwrap();
        assert_eq!(restored.entries(), table.entries());
    }

    #[test]
    fn deserializing_duplicates_fails() {
        let id = AssetUUID::new();
        let entries = vec![
            ManifestEntry::new(id, "A", "texture".into()),
            ManifestEntry::new(id, "B", "texture".into()),
        ];
        let json = serde_json::to_string(&entries).unwrap();
        assert!(serde_json::from_str::<ResolutionTable>(&json).is_err());
    }
}
