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

//! # Tether Core
//!
//! Foundational crate for stable asset identities. It separates *what* an asset
//! is (an [`asset::AssetUUID`]) from *where* it is loaded from (a location
//! resolved at load time through a [`manifest::ResolutionTable`]).
//!
//! The key pieces are:
//! - [`manifest`]: the resolution table, its builder, and the provider that owns
//!   the single live table of a process.
//! - [`reference`]: soft references that store only an identifier and resolve it
//!   lazily into a load operation.
//! - [`operation`]: the awaitable, cancelable handle returned by a load.

#![warn(missing_docs)]

pub mod asset;
pub mod manifest;
pub mod operation;
pub mod reference;

pub use manifest::{ResolutionTable, TableProvider};
pub use reference::{AssetResolver, SoftAssetReference, SoftSceneReference};
