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

use super::{Asset, AssetUUID};
use std::{fmt, ops::Deref, sync::Arc};

/// A loaded asset, shared between everyone who received it.
///
/// A completed [`SoftAssetReference::load_async`](crate::reference::SoftAssetReference::load_async)
/// delivers one of these. It remembers the identifier it was loaded for, so the
/// receiver can tell which reference it satisfies without keeping the
/// reference around.
pub struct AssetHandle<T: Asset> {
    uuid: AssetUUID,
    asset: Arc<T>,
}

impl<T: Asset> AssetHandle<T> {
    /// Wraps an object loaded for `uuid`.
    pub fn new(uuid: AssetUUID, asset: T) -> Self {
        Self {
            uuid,
            asset: Arc::new(asset),
        }
    }

    /// The identifier the asset was loaded for.
    pub fn uuid(&self) -> AssetUUID {
        self.uuid
    }

    /// Returns `true` if both handles share the same loaded object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.asset, &other.asset)
    }
}

impl<T: Asset> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        Self {
            uuid: self.uuid,
            asset: Arc::clone(&self.asset),
        }
    }
}

impl<T: Asset> Deref for AssetHandle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.asset
    }
}

impl<T: Asset + fmt::Debug> fmt::Debug for AssetHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssetHandle")
            .field("uuid", &self.uuid)
            .field("asset", &self.asset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mesh(u32);
    impl Asset for Mesh {
        const TYPE_NAME: &'static str = "mesh";
    }

    #[test]
    fn clones_share_the_object_and_identifier() {
        let id = AssetUUID::new();
        let handle = AssetHandle::new(id, Mesh(3));
        let clone = handle.clone();
        assert!(handle.ptr_eq(&clone));
        assert_eq!(clone.uuid(), id);
        assert_eq!(clone.0, 3);
        assert!(!handle.ptr_eq(&AssetHandle::new(id, Mesh(3))));
    }
}
