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

//! A [`ContentLoader`] reading content from the marker folders of a content tree.
//!
//! A location such as `UI/Icon` is matched against every marker folder in
//! turn. The location carries no extension, so only files whose extension maps
//! to the requested type (or one of its subtypes) are candidates:
//! `Resources/UI/Icon.png` satisfies a texture load and `Resources/UI/Icon.wav`
//! an audio load. The bytes are read on tokio's blocking pool and handed to the
//! [`AssetDecoder`] registered for the requested type.

use crate::fs_universe::SIDECAR_EXTENSION;
use ahash::AHashMap;
use std::any::Any;
use std::error::Error;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tether_core::asset::{
    Asset, AssetDecoder, AssetTypeName, AssetTypeRegistry, ContentLoader, LoadCallback,
};
use tether_core::manifest::TableError;
use thiserror::Error;
use tokio::runtime::Handle;
use walkdir::WalkDir;

/// Why a location could not be turned into an object.
#[derive(Debug, Error)]
pub enum LoadError {
    /// No file under any marker folder matches the location.
    #[error("no content found at location '{0}'")]
    NotFound(String),
    /// No decoder handles the requested type.
    #[error("no decoder registered for asset type '{0}'")]
    NoDecoder(AssetTypeName),
    /// The file exists but could not be read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The decoder rejected the bytes.
    #[error("failed to decode '{location}' as '{asset_type}': {reason}")]
    Decode {
        /// The requested location.
        location: String,
        /// The requested type.
        asset_type: AssetTypeName,
        /// The decoder's error message.
        reason: String,
    },
}

trait AnyDecoder: Send + Sync {
    fn decode_any(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>, Box<dyn Error + Send + Sync>>;
}

struct DecoderWrapper<A: Asset, D: AssetDecoder<A>>(D, PhantomData<fn() -> A>);

impl<A: Asset, D: AssetDecoder<A>> AnyDecoder for DecoderWrapper<A, D> {
    fn decode_any(&self, bytes: &[u8]) -> Result<Box<dyn Any + Send>, Box<dyn Error + Send + Sync>> {
        let asset: A = self.0.decode(bytes)?;
        Ok(Box::new(asset))
    }
}

/// Decoders keyed by the asset type they produce.
#[derive(Default)]
pub struct DecoderRegistry {
    decoders: AHashMap<AssetTypeName, Box<dyn AnyDecoder>>,
}

impl DecoderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the decoder producing `A`, replacing any previous one.
    pub fn register<A: Asset>(&mut self, decoder: impl AssetDecoder<A> + 'static) -> &mut Self {
        let asset_type = AssetTypeName::of::<A>();
        log::debug!("Registered decoder for '{asset_type}'");
        let wrapped = DecoderWrapper(decoder, PhantomData);
        self.decoders.insert(asset_type, Box::new(wrapped));
        self
    }

    /// Returns `true` if a decoder produces `asset_type`.
    pub fn contains(&self, asset_type: &AssetTypeName) -> bool {
        self.decoders.contains_key(asset_type)
    }

    /// Decodes `bytes` as `asset_type`. `location` is only used in errors.
    pub fn decode(
        &self,
        location: &str,
        asset_type: &AssetTypeName,
        bytes: &[u8],
    ) -> Result<Box<dyn Any + Send>, LoadError> {
        let decoder = self
            .decoders
            .get(asset_type)
            .ok_or_else(|| LoadError::NoDecoder(asset_type.clone()))?;
        decoder.decode_any(bytes).map_err(|e| LoadError::Decode {
            location: location.to_string(),
            asset_type: asset_type.clone(),
            reason: e.to_string(),
        })
    }
}

/// Finds every folder named `marker` below `content_root`, in sorted order.
///
/// Marker folders nested inside another marker folder are skipped, since their
/// content is addressed through the outer one.
pub fn discover_roots(content_root: &Path, marker: &str) -> Result<Vec<PathBuf>, TableError> {
    let mut roots: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(content_root).sort_by_file_name() {
        let entry = entry.map_err(|e| TableError::Enumeration(e.to_string()))?;
        if !entry.file_type().is_dir() || entry.file_name() != marker {
            continue;
        }
        if roots.iter().any(|root| entry.path().starts_with(root)) {
            continue;
        }
        roots.push(entry.into_path());
    }
    Ok(roots)
}

/// Loads content from marker folders on disk.
pub struct FileSystemLoader {
    roots: Arc<[PathBuf]>,
    types: Arc<AssetTypeRegistry>,
    decoders: Arc<DecoderRegistry>,
    runtime: Handle,
}

impl FileSystemLoader {
    /// Creates a loader searching `roots` in order and running reads on `runtime`.
    ///
    /// `types` decides which file extensions can satisfy a requested type.
    pub fn new(
        roots: Vec<PathBuf>,
        types: Arc<AssetTypeRegistry>,
        decoders: DecoderRegistry,
        runtime: Handle,
    ) -> Self {
        Self {
            roots: roots.into(),
            types,
            decoders: Arc::new(decoders),
            runtime,
        }
    }

    /// Creates a loader over every `marker` folder below `content_root`.
    pub fn discover(
        content_root: &Path,
        marker: &str,
        types: Arc<AssetTypeRegistry>,
        decoders: DecoderRegistry,
        runtime: Handle,
    ) -> Result<Self, TableError> {
        let roots = discover_roots(content_root, marker)?;
        log::info!(
            "FileSystemLoader: {} '{}' folders under '{}'",
            roots.len(),
            marker,
            content_root.display()
        );
        Ok(Self::new(roots, types, decoders, runtime))
    }

    /// The marker folders, in search order.
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Returns the file a location resolves to when loaded as `asset_type`, if any.
    pub fn locate(&self, location: &str, asset_type: &AssetTypeName) -> Option<PathBuf> {
        locate_in(&self.roots, &self.types, location, asset_type)
    }

    /// Loads a location synchronously on the calling thread.
    pub fn load_now(
        &self,
        location: &str,
        asset_type: &AssetTypeName,
    ) -> Result<Box<dyn Any + Send>, LoadError> {
        load_from(&self.roots, &self.types, &self.decoders, location, asset_type)
    }
}

impl ContentLoader for FileSystemLoader {
    fn begin_load(&self, location: &str, asset_type: &AssetTypeName, on_complete: LoadCallback) {
        let roots = Arc::clone(&self.roots);
        let types = Arc::clone(&self.types);
        let decoders = Arc::clone(&self.decoders);
        let location = location.to_string();
        let asset_type = asset_type.clone();

        self.runtime.spawn_blocking(move || {
            let payload = match load_from(&roots, &types, &decoders, &location, &asset_type) {
                Ok(asset) => Some(asset),
                Err(e) => {
                    log::warn!("FileSystemLoader: {e}");
                    None
                }
            };
            on_complete(payload);
        });
    }
}

fn load_from(
    roots: &[PathBuf],
    types: &AssetTypeRegistry,
    decoders: &DecoderRegistry,
    location: &str,
    asset_type: &AssetTypeName,
) -> Result<Box<dyn Any + Send>, LoadError> {
    if !decoders.contains(asset_type) {
        return Err(LoadError::NoDecoder(asset_type.clone()));
    }
    let path = locate_in(roots, types, location, asset_type)
        .ok_or_else(|| LoadError::NotFound(location.to_string()))?;
    let bytes = fs::read(&path).map_err(|source| LoadError::Io {
        path: path.clone(),
        source,
    })?;
    log::trace!("Read {} bytes from '{}'", bytes.len(), path.display());
    decoders.decode(location, asset_type, &bytes)
}

fn locate_in(
    roots: &[PathBuf],
    types: &AssetTypeRegistry,
    location: &str,
    asset_type: &AssetTypeName,
) -> Option<PathBuf> {
    let (folder, stem) = match location.rsplit_once('/') {
        Some((folder, stem)) => (Some(folder), stem),
        None => (None, location),
    };

    roots.iter().find_map(|root| {
        let dir = folder.map_or_else(|| root.clone(), |folder| root.join(folder));
        let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
            .ok()?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                let extension = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
                path.is_file()
                    && path.file_stem().and_then(|s| s.to_str()) == Some(stem)
                    && extension != SIDECAR_EXTENSION
                    && types.is_assignable(asset_type, &types.type_for_extension(extension))
            })
            .collect();
        candidates.sort();
        candidates.into_iter().next()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tether_core::operation::ScopedAsyncOperation;

    #[derive(Debug, PartialEq)]
    struct Note(String);
    impl Asset for Note {
        const TYPE_NAME: &'static str = "note";
    }

    struct NoteDecoder;
    impl AssetDecoder<Note> for NoteDecoder {
        fn decode(&self, bytes: &[u8]) -> Result<Note, Box<dyn Error + Send + Sync>> {
            Ok(Note(String::from_utf8(bytes.to_vec())?))
        }
    }

    fn write(root: &Path, path: &str, bytes: &[u8]) {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, bytes).unwrap();
    }

    #[derive(Debug, PartialEq)]
    struct Clip(Vec<u8>);
    impl Asset for Clip {
        const TYPE_NAME: &'static str = "audio_clip";
    }

    struct ClipDecoder;
    impl AssetDecoder<Clip> for ClipDecoder {
        fn decode(&self, bytes: &[u8]) -> Result<Clip, Box<dyn Error + Send + Sync>> {
            Ok(Clip(bytes.to_vec()))
        }
    }

    fn types() -> Arc<AssetTypeRegistry> {
        let mut types = AssetTypeRegistry::new();
        types.register_asset::<Note>(None).unwrap();
        types.register_asset::<Clip>(None).unwrap();
        types.register("texture", None).unwrap();
        types.map_extension("txt", &AssetTypeName::of::<Note>()).unwrap();
        types.map_extension("wav", &AssetTypeName::of::<Clip>()).unwrap();
        types.map_extension("png", &"texture".into()).unwrap();
        Arc::new(types)
    }

    fn decoders() -> DecoderRegistry {
        let mut decoders = DecoderRegistry::new();
        decoders.register::<Note>(NoteDecoder);
        decoders.register::<Clip>(ClipDecoder);
        decoders
    }

    #[test]
    fn discovers_outer_marker_folders_in_order() {
        let dir = tempdir().unwrap();
        write(dir.path(), "b/Resources/x.txt", b"");
        write(dir.path(), "a/Resources/Resources/y.txt", b"");
        write(dir.path(), "c/resources/z.txt", b"");

        let roots = discover_roots(dir.path(), "Resources").unwrap();
        assert_eq!(
            roots,
            vec![
                dir.path().join("a/Resources"),
                dir.path().join("b/Resources")
            ]
        );
    }

    #[test]
    fn locate_ignores_extensions_and_sidecars() {
        let dir = tempdir().unwrap();
        write(dir.path(), "Resources/UI/Icon.txt", b"icon");
        write(dir.path(), "Resources/UI/Icon.txt.meta", b"");
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let loader = FileSystemLoader::new(
            vec![dir.path().join("Resources")],
            types(),
            decoders(),
            runtime.handle().clone(),
        );
        let note = AssetTypeName::of::<Note>();
        assert_eq!(
            loader.locate("UI/Icon", &note),
            Some(dir.path().join("Resources/UI/Icon.txt"))
        );
        assert_eq!(loader.locate("UI/Missing", &note), None);
        assert_eq!(loader.locate("Icon", &note), None);
    }

    #[test]
    fn same_named_files_are_told_apart_by_type() {
        let dir = tempdir().unwrap();
        write(dir.path(), "Resources/UI/Icon.png", b"PNG-BYTES");
        write(dir.path(), "Resources/UI/Icon.wav", b"WAV-BYTES");
        write(dir.path(), "Resources/UI/Icon.bin", b"RAW-BYTES");
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let loader = FileSystemLoader::new(
            vec![dir.path().join("Resources")],
            types(),
            decoders(),
            runtime.handle().clone(),
        );

        assert_eq!(
            loader.locate("UI/Icon", &"texture".into()),
            Some(dir.path().join("Resources/UI/Icon.png"))
        );
        assert_eq!(
            loader.locate("UI/Icon", &AssetTypeName::of::<Clip>()),
            Some(dir.path().join("Resources/UI/Icon.wav"))
        );
        assert_eq!(loader.locate("UI/Icon", &AssetTypeName::of::<Note>()), None);

        let clip = loader
            .load_now("UI/Icon", &AssetTypeName::of::<Clip>())
            .unwrap()
            .downcast::<Clip>()
            .unwrap();
        assert_eq!(*clip, Clip(b"WAV-BYTES".to_vec()));
        assert!(matches!(
            loader.load_now("UI/Icon", &AssetTypeName::of::<Note>()),
            Err(LoadError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn begin_load_decodes_on_the_blocking_pool() {
        let dir = tempdir().unwrap();
        write(dir.path(), "Content/Resources/Notes/hello.txt", b"hello");
        let loader = FileSystemLoader::discover(
            dir.path(),
            "Resources",
            types(),
            decoders(),
            Handle::current(),
        )
        .unwrap();

        let (operation, token) = ScopedAsyncOperation::create();
        loader.begin_load(
            "Notes/hello",
            &AssetTypeName::of::<Note>(),
            Box::new(move |payload| {
                token.complete(payload.and_then(|any| any.downcast::<Note>().ok()));
            }),
        );
        let note = operation.await.unwrap().unwrap();
        assert_eq!(*note, Note("hello".to_string()));
    }

    #[tokio::test]
    async fn failures_complete_with_nothing() {
        let dir = tempdir().unwrap();
        write(dir.path(), "Resources/bad.txt", &[0xff, 0xfe]);
        let loader = FileSystemLoader::new(
            vec![dir.path().join("Resources")],
            types(),
            decoders(),
            Handle::current(),
        );

        for (location, asset_type) in [
            ("bad", AssetTypeName::of::<Note>()),
            ("missing", AssetTypeName::of::<Note>()),
            ("bad", AssetTypeName::from_static("texture")),
        ] {
            let (operation, token) = ScopedAsyncOperation::<()>::create();
            loader.begin_load(
                location,
                &asset_type,
                Box::new(move |payload| {
                    token.complete(payload.map(|_| ()));
                }),
            );
            assert_eq!(operation.await, Ok(None), "{location} as {asset_type}");
        }
    }

    #[test]
    fn load_now_reports_why() {
        let dir = tempdir().unwrap();
        write(dir.path(), "Resources/bad.txt", &[0xff, 0xfe]);
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let loader = FileSystemLoader::new(
            vec![dir.path().join("Resources")],
            types(),
            decoders(),
            runtime.handle().clone(),
        );
        let note = AssetTypeName::of::<Note>();
        assert!(matches!(
            loader.load_now("bad", &note),
            Err(LoadError::Decode { .. })
        ));
        assert!(matches!(
            loader.load_now("missing", &note),
            Err(LoadError::NotFound(_))
        ));
        assert!(matches!(
            loader.load_now("bad", &"texture".into()),
            Err(LoadError::NoDecoder(_))
        ));
    }
}
