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

use super::{deserialize_uuid, AssetResolver, ResolveError, SoftObjectReference};
use crate::asset::{Asset, AssetHandle, AssetTypeName, AssetUUID};
use crate::manifest::{ContentUniverse, TableProvider};
use crate::operation::ScopedAsyncOperation;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
};

/// A serializable reference to an asset of type `T` that is loaded on demand.
///
/// The reference stores only the asset's identifier. Its location is looked up
/// in the live table every time it is needed, so a rebuilt table is observed
/// immediately. Equality and hashing only consider the identifier.
///
/// The serialized form is the identifier itself, or `null` for an empty
/// reference. An empty string also reads back as an empty reference.
pub struct SoftAssetReference<T: Asset> {
    uuid: Option<AssetUUID>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Asset> SoftAssetReference<T> {
    /// Creates a reference to `uuid`.
    pub const fn new(uuid: AssetUUID) -> Self {
        Self::from_option(Some(uuid))
    }

    /// Creates an empty reference.
    pub const fn null() -> Self {
        Self::from_option(None)
    }

    const fn from_option(uuid: Option<AssetUUID>) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    /// The referenced identifier, if any.
    pub fn uuid(&self) -> Option<AssetUUID> {
        self.uuid
    }

    /// Returns `true` if the reference holds an identifier.
    pub fn is_valid(&self) -> bool {
        self.uuid.is_some()
    }

    /// Looks up the current location of the asset, as type `T`.
    ///
    /// Returns `None` for an empty reference, an unknown identifier, a type
    /// mismatch, or a provider without a table.
    pub fn location(&self, provider: &TableProvider) -> Option<String> {
        let uuid = self.uuid?;
        provider.lookup_location(&uuid, &AssetTypeName::of::<T>())
    }

    /// Starts loading the referenced asset.
    ///
    /// The returned operation completes once the loader has finished, with
    /// `Some` handle, or `None` if no object could be produced at the resolved
    /// location.
    ///
    /// # Errors
    /// - [`ResolveError::InvalidState`] if the reference is empty.
    /// - [`ResolveError::ResourceNotFound`] if the identifier cannot be resolved
    ///   as `T`.
    pub fn load_async(
        &self,
        resolver: &AssetResolver,
    ) -> Result<ScopedAsyncOperation<AssetHandle<T>>, ResolveError> {
        let uuid = self.uuid.ok_or(ResolveError::InvalidState)?;
        let asset_type = AssetTypeName::of::<T>();
        let location = resolver
            .provider()
            .lookup_location(&uuid, &asset_type)
            .ok_or_else(|| ResolveError::ResourceNotFound {
                uuid,
                asset_type: asset_type.clone(),
            })?;

        let (operation, token) = ScopedAsyncOperation::create();
        log::debug!("Loading {uuid} from '{location}' as '{asset_type}'");
        resolver.loader().begin_load(
            &location,
            &asset_type,
            Box::new(move |payload| {
                let asset = payload.and_then(|any| match any.downcast::<T>() {
                    Ok(asset) => Some(AssetHandle::new(uuid, *asset)),
                    Err(_) => {
                        log::warn!(
                            "Loader returned a different type than '{}' for {}",
                            T::TYPE_NAME,
                            uuid
                        );
                        None
                    }
                });
                token.complete(asset);
            }),
        );
        Ok(operation)
    }

    /// Renders the reference with the full path of its content, for authoring tools.
    pub fn describe(&self, universe: &dyn ContentUniverse) -> String {
        match self.uuid.and_then(|uuid| universe.path_of(&uuid)) {
            Some(path) => format!("{} ({})", path, T::TYPE_NAME),
            None => self.to_string(),
        }
    }
}

impl<T: Asset> SoftObjectReference for SoftAssetReference<T> {
    fn uuid(&self) -> Option<AssetUUID> {
        self.uuid
    }
}

impl<T: Asset> Default for SoftAssetReference<T> {
    fn default() -> Self {
        Self::null()
    }
}

impl<T: Asset> Clone for SoftAssetReference<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Asset> Copy for SoftAssetReference<T> {}

impl<T: Asset> PartialEq for SoftAssetReference<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T: Asset> Eq for SoftAssetReference<T> {}

impl<T: Asset> Hash for SoftAssetReference<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<T: Asset> From<AssetUUID> for SoftAssetReference<T> {
    fn from(uuid: AssetUUID) -> Self {
        Self::new(uuid)
    }
}

impl<T: Asset> fmt::Debug for SoftAssetReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftAssetReference")
            .field("uuid", &self.uuid)
            .field("type", &T::TYPE_NAME)
            .finish()
    }
}

impl<T: Asset> fmt::Display for SoftAssetReference<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.uuid {
            Some(uuid) => write!(f, "{} ({})", uuid, T::TYPE_NAME),
            None => write!(f, "None ({})", T::TYPE_NAME),
        }
    }
}

impl<T: Asset> Serialize for SoftAssetReference<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.uuid.serialize(serializer)
    }
}

impl<'de, T: Asset> Deserialize<'de> for SoftAssetReference<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_uuid(deserializer).map(Self::from_option)
    }
}
