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

//! Filesystem services for `tether`.
//!
//! This crate implements the contracts declared by `tether-core` on top of a
//! content tree on disk:
//! - [`FileSystemUniverse`] enumerates content and assigns stable identifiers.
//! - [`BakedTable`] reads and writes the baked resolution table artifact.
//! - [`LoadBaked`] is the table source used once content is deployed.
//! - [`FileSystemLoader`] fetches and decodes content by location.
//! - [`ContentConfig`] ties everything together from a `Content.toml` file.

#![warn(missing_docs)]

pub mod baked;
pub mod config;
pub mod fs_universe;
pub mod loader;
pub mod sources;

pub use baked::*;
pub use config::*;
pub use fs_universe::*;
pub use loader::*;
pub use sources::*;
