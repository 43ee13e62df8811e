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

use super::{Asset, AssetTypeName};
use std::{any::Any, error::Error};

/// The type-erased payload produced by a [`ContentLoader`].
///
/// `None` means the loader could not produce an object for the location.
pub type LoadedPayload = Option<Box<dyn Any + Send>>;

/// The completion callback handed to [`ContentLoader::begin_load`].
pub type LoadCallback = Box<dyn FnOnce(LoadedPayload) + Send + 'static>;

/// The primitive that turns a resolved location into a loaded object.
///
/// Implementations begin the load and return immediately. They must invoke
/// `on_complete` exactly once, from whatever thread or tick they schedule work
/// on, with the loaded object boxed as the concrete type registered for
/// `asset_type`, or `None` on failure.
pub trait ContentLoader: Send + Sync {
    /// Starts loading the object stored at `location`.
    fn begin_load(&self, location: &str, asset_type: &AssetTypeName, on_complete: LoadCallback);
}

/// A trait for types that can decode a specific kind of asset from a byte slice.
///
/// This is the CPU side of loading: it turns raw file data into an engine-ready
/// value. Each decoder is specialized for a single asset type `A`.
pub trait AssetDecoder<A: Asset>: Send + Sync {
    /// Parses a byte slice and converts it into an instance of the asset `A`.
    ///
    /// # Returns
    /// A `Result` containing the decoded asset on success, or a boxed dynamic
    /// error on failure. The error must be thread-safe.
    fn decode(&self, bytes: &[u8]) -> Result<A, Box<dyn Error + Send + Sync>>;
}
