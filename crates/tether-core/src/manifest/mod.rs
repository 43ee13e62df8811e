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

//! The identifier-to-location manifest.
//!
//! A [`ResolutionTable`] maps each [`AssetUUID`](crate::asset::AssetUUID) to the
//! location it is loaded from and its declared type. The table is produced by a
//! [`TableSource`]: either a fresh scan of the content tree through the
//! [`TableBuilder`] (authoring) or a previously baked artifact (deployed). The
//! [`TableProvider`] holds the one live table of a process.

mod builder;
mod entry;
mod error;
mod provider;
mod source;
mod table;
mod universe;

pub use builder::*;
pub use entry::*;
pub use error::*;
pub use provider::*;
pub use source::*;
pub use table::*;
pub use universe::*;
