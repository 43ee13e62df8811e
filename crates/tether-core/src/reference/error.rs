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

use crate::asset::{AssetTypeName, AssetUUID};
use thiserror::Error;

/// An error raised when a soft reference cannot start loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference holds no identifier.
    #[error("reference is not valid")]
    InvalidState,
    /// The live table has no entry usable as the requested type.
    #[error("{asset_type} not found with uuid '{uuid}'")]
    ResourceNotFound {
        /// The identifier that was looked up.
        uuid: AssetUUID,
        /// The type it was requested as.
        asset_type: AssetTypeName,
    },
}
