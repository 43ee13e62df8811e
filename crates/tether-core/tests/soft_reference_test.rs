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

use std::sync::{Arc, Mutex};

use tether_core::asset::{
    Asset, AssetTypeName, AssetTypeRegistry, AssetUUID, ContentLoader, LoadCallback,
};
use tether_core::manifest::{
    BuildFromScan, ContentItem, ContentUniverse, TableBuilder, TableError, TableProvider,
};
use tether_core::operation::OperationError;
use tether_core::reference::{AssetResolver, ResolveError, SoftAssetReference};

// --- Test Setup: dummy assets, a scripted universe and a manual loader ---
#[derive(Debug, PartialEq)]
struct Texture {
    name: String,
}
impl Asset for Texture {
    const TYPE_NAME: &'static str = "texture";
}

#[derive(Debug, PartialEq)]
struct Sprite;
impl Asset for Sprite {
    const TYPE_NAME: &'static str = "sprite";
}

#[derive(Debug, PartialEq)]
struct AudioClip;
impl Asset for AudioClip {
    const TYPE_NAME: &'static str = "audio_clip";
}

/// A universe whose items can be changed between scans.
#[derive(Clone, Default)]
struct ScriptedUniverse(Arc<Mutex<Vec<ContentItem>>>);

impl ScriptedUniverse {
    fn set(&self, items: Vec<ContentItem>) {
        *self.0.lock().unwrap() = items;
    }
}

impl ContentUniverse for ScriptedUniverse {
    fn items(&self) -> Result<Vec<ContentItem>, TableError> {
        Ok(self.0.lock().unwrap().clone())
    }

    fn identifier_of(&self, path: &str) -> Option<AssetUUID> {
        // Identity follows the file name, so moving a file keeps its identifier.
        path.rsplit('/').next().map(AssetUUID::new_v5)
    }
}

type Pending = (String, AssetTypeName, LoadCallback);

/// A loader that records requests; the test decides when they finish.
#[derive(Default)]
struct ManualLoader {
    pending: Mutex<Vec<Pending>>,
}

impl ManualLoader {
    fn take(&self) -> Pending {
        self.pending.lock().unwrap().remove(0)
    }
}

impl ContentLoader for ManualLoader {
    fn begin_load(&self, location: &str, asset_type: &AssetTypeName, on_complete: LoadCallback) {
        self.pending
            .lock()
            .unwrap()
            .push((location.to_string(), asset_type.clone(), on_complete));
    }
}
// ---

fn setup() -> (ScriptedUniverse, Arc<TableProvider>, Arc<ManualLoader>, AssetResolver) {
    let mut types = AssetTypeRegistry::new();
    types.register_asset::<Texture>(None).unwrap();
    types
        .register_asset::<Sprite>(Some(AssetTypeName::of::<Texture>()))
        .unwrap();
    types.register_asset::<AudioClip>(None).unwrap();

    let universe = ScriptedUniverse::default();
    universe.set(vec![
        ContentItem::new("Content/Resources/UI/Icon.png", "texture".into()),
        ContentItem::new("Content/Resources/UI/Logo.sprite", "sprite".into()),
        ContentItem::new("Content/Resources/Audio/Theme.ogg", "audio_clip".into()),
        ContentItem::new("Content/Other/Hidden.png", "texture".into()),
    ]);

    let source = BuildFromScan::new(universe.clone(), TableBuilder::new());
    let provider = Arc::new(TableProvider::boot(source, Arc::new(types)));
    let loader = Arc::new(ManualLoader::default());
    let resolver = AssetResolver::new(Arc::clone(&provider), loader.clone());
    (universe, provider, loader, resolver)
}

#[test]
fn empty_reference_fails_with_invalid_state() {
    let (_, _, loader, resolver) = setup();
    let reference = SoftAssetReference::<Texture>::null();
    assert!(!reference.is_valid());
    assert_eq!(
        reference.load_async(&resolver).unwrap_err(),
        ResolveError::InvalidState
    );
    assert!(loader.pending.lock().unwrap().is_empty());
}

#[test]
fn unknown_identifier_fails_with_resource_not_found() {
    let (_, _, _, resolver) = setup();
    let missing = AssetUUID::new();
    let err = SoftAssetReference::<Texture>::new(missing)
        .load_async(&resolver)
        .unwrap_err();
    assert_eq!(
        err,
        ResolveError::ResourceNotFound {
            uuid: missing,
            asset_type: "texture".into(),
        }
    );
    assert_eq!(err.to_string(), format!("texture not found with uuid '{missing}'"));
}

#[test]
fn wrong_type_fails_with_resource_not_found() {
    let (_, _, _, resolver) = setup();
    let theme = AssetUUID::new_v5("Theme.ogg");
    let err = SoftAssetReference::<Texture>::new(theme)
        .load_async(&resolver)
        .unwrap_err();
    assert!(matches!(err, ResolveError::ResourceNotFound { uuid, .. } if uuid == theme));
}

#[test]
fn items_outside_the_marker_are_not_resolvable() {
    let (_, provider, _, _) = setup();
    let hidden = SoftAssetReference::<Texture>::new(AssetUUID::new_v5("Hidden.png"));
    assert_eq!(hidden.location(&provider), None);
}

#[tokio::test]
async fn load_delivers_the_decoded_asset() {
    let (_, _, loader, resolver) = setup();
    let reference = SoftAssetReference::<Texture>::new(AssetUUID::new_v5("Icon.png"));

    let operation = reference.load_async(&resolver).unwrap();
    let (location, asset_type, callback) = loader.take();
    assert_eq!(location, "UI/Icon");
    assert_eq!(asset_type, AssetTypeName::of::<Texture>());

    callback(Some(Box::new(Texture {
        name: "icon".to_string(),
    })));
    let handle = operation.await.unwrap().unwrap();
    assert_eq!(handle.name, "icon");
    assert_eq!(handle.uuid(), AssetUUID::new_v5("Icon.png"));
}

#[tokio::test]
async fn subtype_entries_resolve_as_their_base_type() {
    let (_, _, loader, resolver) = setup();
    let reference = SoftAssetReference::<Texture>::new(AssetUUID::new_v5("Logo.sprite"));

    let operation = reference.load_async(&resolver).unwrap();
    let (location, _, callback) = loader.take();
    assert_eq!(location, "UI/Logo");
    callback(Some(Box::new(Texture {
        name: "logo".to_string(),
    })));
    assert!(operation.await.unwrap().is_some());
}

#[tokio::test]
async fn missing_object_completes_with_an_empty_payload() {
    let (_, _, loader, resolver) = setup();
    let operation = SoftAssetReference::<Texture>::new(AssetUUID::new_v5("Icon.png"))
        .load_async(&resolver)
        .unwrap();
    let (_, _, callback) = loader.take();
    callback(None);
    assert_eq!(operation.await.map(|asset| asset.is_none()), Ok(true));
}

#[tokio::test]
async fn payload_of_the_wrong_type_completes_empty() {
    let (_, _, loader, resolver) = setup();
    let operation = SoftAssetReference::<Texture>::new(AssetUUID::new_v5("Icon.png"))
        .load_async(&resolver)
        .unwrap();
    let (_, _, callback) = loader.take();
    callback(Some(Box::new(AudioClip)));
    assert_eq!(operation.await.map(|asset| asset.is_none()), Ok(true));
}

#[tokio::test]
async fn cancelling_before_completion_drops_the_late_result() {
    let (_, _, loader, resolver) = setup();
    let mut operation = SoftAssetReference::<Texture>::new(AssetUUID::new_v5("Icon.png"))
        .load_async(&resolver)
        .unwrap();
    operation.cancel();

    let (_, _, callback) = loader.take();
    callback(Some(Box::new(Texture {
        name: "late".to_string(),
    })));

    assert_eq!(operation.try_take().map(|r| r.err()), Some(Some(OperationError::Cancelled)));
    assert!(operation.try_take().is_none());
}

#[test]
fn rebuilt_table_is_observed_immediately() {
    let (universe, provider, _, _) = setup();
    let reference = SoftAssetReference::<Texture>::new(AssetUUID::new_v5("Icon.png"));
    assert_eq!(reference.location(&provider).as_deref(), Some("UI/Icon"));

    universe.set(vec![ContentItem::new(
        "Content/Resources/Menu/Icon.png",
        "texture".into(),
    )]);
    provider.rebuild().unwrap();

    assert_eq!(reference.location(&provider).as_deref(), Some("Menu/Icon"));
}
