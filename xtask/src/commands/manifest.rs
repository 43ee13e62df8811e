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

use crate::helpers::*;
use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tether_core::asset::{AssetTypeName, AssetTypeRegistry, AssetUUID};
use tether_core::manifest::ResolutionTable;
use tether_io::{BakedTable, ContentConfig};

#[derive(Subcommand, Debug)]
pub enum ManifestCommand {
    /// Scan the content tree and write the baked resolution table.
    Bake {
        /// Where to write the table instead of the configured path
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// List the entries of the baked table.
    List {
        /// Only list entries usable as this type (subtypes included)
        #[arg(long = "type", value_name = "TYPE")]
        asset_type: Option<String>,
    },
    /// Print where an identifier resolves to in the baked table.
    Resolve {
        /// The identifier to look up
        uuid: AssetUUID,
        /// Resolve as this type, as a soft reference would
        #[arg(long = "as", value_name = "TYPE")]
        asset_type: Option<String>,
    },
    /// Give every content item without a sidecar a stable identifier.
    Stamp,
}

pub fn run(config_path: &Path, command: ManifestCommand) -> Result<()> {
    let config = ContentConfig::load(config_path)
        .with_context(|| format!("Failed to load '{}'", config_path.display()))?;
    let types = Arc::new(
        config
            .type_registry()
            .context("Invalid [[types]] declarations")?,
    );

    match command {
        ManifestCommand::Bake { output } => bake(&config, types, output),
        ManifestCommand::List { asset_type } => list(&config, &types, asset_type),
        ManifestCommand::Resolve { uuid, asset_type } => resolve(&config, &types, uuid, asset_type),
        ManifestCommand::Stamp => stamp(&config, types),
    }
}

fn bake(config: &ContentConfig, types: Arc<AssetTypeRegistry>, output: Option<PathBuf>) -> Result<()> {
    print_task_start("Baking Resolution Table", ROCKET, MAGENTA);
    print_info(&format!(
        "Scanning '{}' for '{}' folders",
        config.content_root.display(),
        config.marker
    ));

    let universe = config.universe(types);
    let table = config
        .builder()
        .build(&universe)
        .context("Failed to build the resolution table")?;

    let baked = BakedTable::at(output.unwrap_or_else(|| config.baked_table_path()));
    let size = baked
        .write(&table)
        .with_context(|| format!("Failed to write '{}'", baked.path().display()))?;

    print_success(&format!(
        "Wrote {} entries to '{}' ({:.2} KB)",
        table.len(),
        baked.path().display(),
        size as f64 / 1024.0
    ));
    Ok(())
}

fn list(config: &ContentConfig, types: &AssetTypeRegistry, asset_type: Option<String>) -> Result<()> {
    print_task_start("Resolution Table", MAGNIFIER, CYAN);
    let table = read_baked(config)?;

    let entries: Vec<_> = match asset_type {
        Some(name) => {
            let requested = known_type(types, name)?;
            table.entries_of(requested, types).collect()
        }
        None => table.entries().iter().collect(),
    };

    for entry in &entries {
        let marker = if types.contains(entry.asset_type()) {
            String::new()
        } else {
            format!(" {}(unregistered type){}", YELLOW, RESET)
        };
        println!("  {entry}{marker}");
    }
    print_success(&format!("{} of {} entries", entries.len(), table.len()));
    Ok(())
}

fn resolve(
    config: &ContentConfig,
    types: &AssetTypeRegistry,
    uuid: AssetUUID,
    asset_type: Option<String>,
) -> Result<()> {
    let table = read_baked(config)?;
    let Some(entry) = table.get(&uuid) else {
        bail!("{uuid} is not in the resolution table");
    };

    match asset_type {
        Some(name) => {
            let requested = known_type(types, name)?;
            match table.lookup_location(&uuid, &requested, types) {
                Some(location) => print_success(&format!("{uuid} -> '{location}' as '{requested}'")),
                None => bail!(
                    "{uuid} is declared as '{}', which cannot be used as '{requested}'",
                    entry.asset_type()
                ),
            }
        }
        None => print_success(&format!(
            "{uuid} -> '{}' ({})",
            entry.location(),
            entry.asset_type()
        )),
    }
    Ok(())
}

fn stamp(config: &ContentConfig, types: Arc<AssetTypeRegistry>) -> Result<()> {
    print_task_start("Stamping Identifiers", STAMP, GREEN);
    let universe = config.universe(types);
    let stamped = universe
        .stamp_all()
        .with_context(|| format!("Failed to stamp '{}'", config.content_root.display()))?;

    for (path, uuid) in &stamped {
        println!("  {CHECK} {path} {BOLD}{uuid}{RESET}");
    }
    if stamped.is_empty() {
        print_success("Every item already has a sidecar.");
    } else {
        print_success(&format!("Stamped {} items.", stamped.len()));
    }
    Ok(())
}

fn read_baked(config: &ContentConfig) -> Result<ResolutionTable> {
    let baked = BakedTable::at(config.baked_table_path());
    baked
        .read()
        .with_context(|| format!("Failed to read '{}'", baked.path().display()))
}

fn known_type(types: &AssetTypeRegistry, name: String) -> Result<AssetTypeName> {
    let name = AssetTypeName::new(name);
    if !types.contains(&name) {
        bail!("'{name}' is not a registered asset type");
    }
    Ok(name)
}
