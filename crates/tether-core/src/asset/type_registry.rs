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

//! An explicit registry of declared asset types and their parent links.

use super::{Asset, AssetTypeName};
use ahash::AHashMap;
use thiserror::Error;

/// An error raised while populating an [`AssetTypeRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeRegistryError {
    /// A type with this name is already registered.
    #[error("asset type '{0}' is already registered")]
    Duplicate(AssetTypeName),
    /// The declared parent has not been registered yet.
    #[error("asset type '{name}' declares unknown parent '{parent}'")]
    UnknownParent {
        /// The type being registered.
        name: AssetTypeName,
        /// The missing parent.
        parent: AssetTypeName,
    },
    /// The type has not been registered.
    #[error("asset type '{0}' is not registered")]
    UnknownType(AssetTypeName),
    /// The file extension is already mapped to another type.
    #[error("extension '.{extension}' is already mapped to '{existing}'")]
    ExtensionClash {
        /// The clashing extension, without the leading dot.
        extension: String,
        /// The type the extension is already mapped to.
        existing: AssetTypeName,
    },
}

#[derive(Debug, Clone)]
struct TypeInfo {
    parent: Option<AssetTypeName>,
}

/// The closed set of asset types known to a process.
///
/// Each type has at most one parent, and every chain ends at
/// [`AssetTypeName::OBJECT`]. The registry answers the single question the
/// resolution table needs: can an entry declared as `X` be handed out as `Y`?
///
/// It also maps file extensions to types so that a content scan can assign a
/// declared type to each file. Files with an unmapped extension are
/// [`AssetTypeName::OPAQUE`].
///
/// The registry is populated once by the composition root and then shared
/// read-only.
#[derive(Debug, Clone)]
pub struct AssetTypeRegistry {
    types: AHashMap<AssetTypeName, TypeInfo>,
    extensions: AHashMap<String, AssetTypeName>,
}

impl AssetTypeRegistry {
    /// Creates a registry holding only the built-in types.
    ///
    /// The built-ins are `object`, `opaque`, `scene`, `resource_manifest`
    /// (extension `.manifest`) and `scene_manifest` (extension `.scenes`).
    pub fn new() -> Self {
        let mut registry = Self {
            types: AHashMap::new(),
            extensions: AHashMap::new(),
        };
        registry
            .types
            .insert(AssetTypeName::OBJECT, TypeInfo { parent: None });
        for builtin in [
            AssetTypeName::OPAQUE,
            AssetTypeName::SCENE,
            AssetTypeName::RESOURCE_MANIFEST,
            AssetTypeName::SCENE_MANIFEST,
        ] {
            registry.types.insert(
                builtin,
                TypeInfo {
                    parent: Some(AssetTypeName::OBJECT),
                },
            );
        }
        registry
            .extensions
            .insert("scene".to_string(), AssetTypeName::SCENE);
        registry
            .extensions
            .insert("manifest".to_string(), AssetTypeName::RESOURCE_MANIFEST);
        registry
            .extensions
            .insert("scenes".to_string(), AssetTypeName::SCENE_MANIFEST);
        registry
    }

    /// Registers a type. A `None` parent attaches it directly under `object`.
    pub fn register(
        &mut self,
        name: impl Into<AssetTypeName>,
        parent: Option<AssetTypeName>,
    ) -> Result<(), TypeRegistryError> {
        let name = name.into();
        if self.types.contains_key(&name) {
            return Err(TypeRegistryError::Duplicate(name));
        }
        let parent = parent.unwrap_or(AssetTypeName::OBJECT);
        if !self.types.contains_key(&parent) {
            return Err(TypeRegistryError::UnknownParent { name, parent });
        }
        log::debug!("Registered asset type '{name}' (parent '{parent}')");
        self.types.insert(
            name,
            TypeInfo {
                parent: Some(parent),
            },
        );
        Ok(())
    }

    /// Registers the type declared by `A`.
    pub fn register_asset<A: Asset>(
        &mut self,
        parent: Option<AssetTypeName>,
    ) -> Result<(), TypeRegistryError> {
        self.register(AssetTypeName::of::<A>(), parent)
    }

    /// Maps a file extension (case-insensitive, without the dot) to a registered type.
    pub fn map_extension(
        &mut self,
        extension: &str,
        name: &AssetTypeName,
    ) -> Result<(), TypeRegistryError> {
        if !self.types.contains_key(name) {
            return Err(TypeRegistryError::UnknownType(name.clone()));
        }
        let key = extension.trim_start_matches('.').to_lowercase();
        match self.extensions.get(&key) {
            Some(existing) if existing != name => Err(TypeRegistryError::ExtensionClash {
                extension: key,
                existing: existing.clone(),
            }),
            _ => {
                self.extensions.insert(key, name.clone());
                Ok(())
            }
        }
    }

    /// Returns `true` if `name` is registered.
    pub fn contains(&self, name: &AssetTypeName) -> bool {
        self.types.contains_key(name)
    }

    /// Returns the registered parent of `name`, if any.
    pub fn parent_of(&self, name: &AssetTypeName) -> Option<&AssetTypeName> {
        self.types.get(name).and_then(|info| info.parent.as_ref())
    }

    /// Returns the type mapped to a file extension, or `opaque` if none is.
    pub fn type_for_extension(&self, extension: &str) -> AssetTypeName {
        self.extensions
            .get(&extension.to_lowercase())
            .cloned()
            .unwrap_or(AssetTypeName::OPAQUE)
    }

    /// Returns `true` if a value declared as `declared` can be used as `target`.
    ///
    /// That is the case when `declared` is `target` or one of its descendants.
    /// Unregistered names are only assignable to themselves.
    pub fn is_assignable(&self, target: &AssetTypeName, declared: &AssetTypeName) -> bool {
        let mut current = Some(declared);
        // Chains are acyclic: a parent must exist before its children.
        while let Some(name) = current {
            if name == target {
                return true;
            }
            current = self.parent_of(name);
        }
        false
    }

    /// Returns the number of registered types, built-ins included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always `false`: the built-ins are always present.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for AssetTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> AssetTypeRegistry {
        let mut types = AssetTypeRegistry::new();
        types.register("texture", None).unwrap();
        types
            .register("sprite", Some(AssetTypeName::from_static("texture")))
            .unwrap();
        types.register("audio_clip", None).unwrap();
        types
            .map_extension("png", &AssetTypeName::from_static("texture"))
            .unwrap();
        types
    }

    #[test]
    fn a_type_is_assignable_to_itself_and_its_ancestors() {
        let types = registry();
        let sprite = AssetTypeName::from_static("sprite");
        assert!(types.is_assignable(&sprite, &sprite));
        assert!(types.is_assignable(&"texture".into(), &sprite));
        assert!(types.is_assignable(&AssetTypeName::OBJECT, &sprite));
    }

    #[test]
    fn ancestors_and_siblings_are_not_assignable_downwards() {
        let types = registry();
        assert!(!types.is_assignable(&"sprite".into(), &"texture".into()));
        assert!(!types.is_assignable(&"audio_clip".into(), &"sprite".into()));
    }

    #[test]
    fn unknown_names_only_match_themselves() {
        let types = registry();
        let stale = AssetTypeName::from_static("renamed_type");
        assert!(types.is_assignable(&stale, &stale));
        assert!(!types.is_assignable(&AssetTypeName::OBJECT, &stale));
    }

    #[test]
    fn rejects_duplicates_and_unknown_parents() {
        let mut types = registry();
        assert_eq!(
            types.register("texture", None),
            Err(TypeRegistryError::Duplicate("texture".into()))
        );
        assert!(matches!(
            types.register("mesh", Some("geometry".into())),
            Err(TypeRegistryError::UnknownParent { .. })
        ));
    }

    #[test]
    fn extensions_are_case_insensitive_and_default_to_opaque() {
        let types = registry();
        assert_eq!(types.type_for_extension("PNG"), AssetTypeName::from("texture"));
        assert_eq!(types.type_for_extension("xyz"), AssetTypeName::OPAQUE);
        assert_eq!(
            types.type_for_extension("manifest"),
            AssetTypeName::RESOURCE_MANIFEST
        );
    }

    #[test]
    fn extension_clash_is_reported() {
        let mut types = registry();
        let err = types
            .map_extension("png", &"audio_clip".into())
            .unwrap_err();
        assert!(matches!(err, TypeRegistryError::ExtensionClash { .. }));
    }
}
