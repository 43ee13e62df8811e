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

//! Provides the foundational traits and primitive types for Tether's asset system.
//!
//! This module defines the "common language" for all asset-related operations.
//! It contains the core contracts that other crates implement or use, but it has
//! no knowledge of where assets live on disk.
//!
//! The key components are:
//! - The [`Asset`] trait: A marker for all types that can be loaded through a
//!   soft reference, carrying the type tag recorded in the manifest.
//! - [`AssetUUID`]: the stable identifier stored in references.
//! - [`AssetTypeName`] and [`AssetTypeRegistry`]: the closed set of declared types
//!   and the parent links used for assignability checks.
//! - [`ContentLoader`] and [`AssetDecoder`]: the abstract loading primitives.

mod handle;
mod loader;
mod type_name;
mod type_registry;
mod uuid;

pub use handle::*;
pub use loader::*;
pub use type_name::*;
pub use type_registry::*;
pub use uuid::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits enforce the guarantees needed for background loading:
/// - `Send` + `Sync`: The asset can be shared and sent between threads.
/// - `'static`: The asset contains no non-static references.
///
/// [`TYPE_NAME`](Asset::TYPE_NAME) is the tag this type is registered under in
/// the [`AssetTypeRegistry`]. A manifest entry can only be resolved as `A` when
/// `A::TYPE_NAME` is assignable from the entry's declared type.
///
/// # Examples
///
/// ```
/// use tether_core::asset::Asset;
///
/// struct Texture {
///     // ... fields
/// }
///
/// impl Asset for Texture {
///     const TYPE_NAME: &'static str = "texture";
/// }
/// ```
pub trait Asset: Send + Sync + 'static {
    /// The declared type tag of this asset type.
    const TYPE_NAME: &'static str;
}
