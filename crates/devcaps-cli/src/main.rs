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

//! `devcaps`: prints the device catalog of this machine, or of a recorded
//! hardware profile, and resolves device settings against it.

mod cli;
mod report;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use devcaps_core::{
    find_valid_settings, CapabilityProvider, Catalog, DeviceEnumerator, DeviceSettings,
    DeviceSettingsCombo, EnumerationConfig, HardwareProfile, MatchOptions, MatchType,
};
use devcaps_infra::WgpuCapabilityProvider;

use cli::{Cli, Command, SelectArgs};

/// JSON output of `devcaps select`.
#[derive(Serialize)]
struct Selection<'a> {
    settings: DeviceSettings,
    combo: Option<&'a DeviceSettingsCombo>,
}

fn load_config(path: Option<&Path>) -> Result<EnumerationConfig> {
    let Some(path) = path else {
        return Ok(EnumerationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("Failed to parse TOML from '{}'", path.display()))?;
    log::info!("Loaded enumeration settings from '{}'", path.display());
    Ok(config)
}

fn load_provider(profile: Option<&Path>) -> Result<Box<dyn CapabilityProvider>> {
    match profile {
        Some(path) => {
            let profile = HardwareProfile::from_path(path)
                .with_context(|| format!("Failed to load hardware profile '{}'", path.display()))?;
            log::info!(
                "Replaying {} adapter(s) from '{}'",
                profile.adapters.len(),
                path.display()
            );
            Ok(Box::new(profile))
        }
        None => Ok(Box::new(WgpuCapabilityProvider::new())),
    }
}

fn request_from(args: &SelectArgs) -> (DeviceSettings, MatchOptions) {
    let mut settings = DeviceSettings::default();
    let mut options = MatchOptions::default();

    if args.fullscreen {
        settings.windowed = false;
        options.windowed = MatchType::PreserveInput;
    }
    if let Some(ordinal) = args.adapter {
        settings.adapter_ordinal = ordinal;
        options.adapter_ordinal = MatchType::PreserveInput;
    }
    if let (Some(width), Some(height)) = (args.width, args.height) {
        settings.back_buffer_width = width;
        settings.back_buffer_height = height;
        options.resolution = MatchType::ClosestToInput;
    }
    if let Some(refresh) = args.refresh {
        settings.fullscreen_refresh_rate = refresh;
        options.refresh_rate = MatchType::ClosestToInput;
    }
    (settings, options)
}

fn print_catalog(catalog: &Catalog, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(catalog).context("Failed to serialize catalog")?;
        println!("{text}");
    } else {
        print!("{}", report::catalog_text(catalog));
    }
    Ok(())
}

fn print_selection(catalog: &Catalog, args: &SelectArgs, json: bool) -> Result<()> {
    let (request, options) = request_from(args);
    let settings = find_valid_settings(catalog, &request, &options)
        .context("Failed to resolve device settings")?;

    if json {
        let selection = Selection {
            settings,
            combo: catalog.combo_for(&settings),
        };
        let text =
            serde_json::to_string_pretty(&selection).context("Failed to serialize settings")?;
        println!("{text}");
    } else {
        print!("{}", report::settings_text(&settings));
    }
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let provider = load_provider(cli.profile.as_deref())?;

    let mut enumerator = DeviceEnumerator::with_config(provider.as_ref(), config);
    enumerator
        .enumerate(None)
        .context("Device enumeration failed")?;
    let catalog = enumerator.catalog();

    match &cli.command {
        Command::List => print_catalog(&catalog, cli.json),
        Command::Select(args) => print_selection(&catalog, args, cli.json),
    }
}
