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

//! Defines the errors raised while producing or replacing a resolution table.

use crate::asset::AssetUUID;
use thiserror::Error;

/// An error raised by a [`TableSource`](super::TableSource) or the
/// [`TableProvider`](super::TableProvider).
#[derive(Debug, Error)]
pub enum TableError {
    /// Two entries share the same identifier.
    #[error("identifier {0} appears more than once in the table")]
    DuplicateIdentifier(AssetUUID),
    /// The deployed environment has no baked table to load.
    #[error("no baked table found at '{0}'")]
    Unavailable(String),
    /// The provider cannot replace its table in the deployed environment.
    #[error("the table cannot be refreshed in the deployed environment")]
    RefreshUnsupported,
    /// The content universe could not be enumerated.
    #[error("failed to enumerate content: {0}")]
    Enumeration(String),
    /// A baked table exists but could not be decoded.
    #[error("baked table is corrupt: {0}")]
    Corrupt(String),
    /// An underlying I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
