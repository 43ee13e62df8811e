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

use crate::asset::ContentLoader;
use crate::manifest::TableProvider;
use std::sync::Arc;

/// Everything a soft reference needs to turn into a loaded asset.
///
/// The composition root builds one resolver from its [`TableProvider`] and its
/// [`ContentLoader`] and passes it to whoever resolves references. Cloning is
/// cheap.
#[derive(Clone)]
pub struct AssetResolver {
    provider: Arc<TableProvider>,
    loader: Arc<dyn ContentLoader>,
}

impl AssetResolver {
    /// Creates a resolver.
    pub fn new(provider: Arc<TableProvider>, loader: Arc<dyn ContentLoader>) -> Self {
        Self { provider, loader }
    }

    /// The table provider lookups go through.
    pub fn provider(&self) -> &TableProvider {
        &self.provider
    }

    /// The loader objects are fetched with.
    pub fn loader(&self) -> &dyn ContentLoader {
        self.loader.as_ref()
    }
}
