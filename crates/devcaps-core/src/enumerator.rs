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

//! Builds the device catalog from a [`CapabilityProvider`].
//!
//! An enumeration pass walks every adapter, collects its display modes and
//! desktop formats, then probes each device type across the cartesian product
//! of adapter format, back-buffer format and windowed flag. Every candidate is
//! pruned by a provider query; whatever survives becomes a
//! [`DeviceSettingsCombo`]. Devices without combos and adapters without devices
//! are dropped, so an empty catalog means "no acceptable configuration".

use std::sync::Arc;

use crate::catalog::{
    AdapterRecord, Catalog, DepthStencilConflict, DeviceRecord, DeviceSettingsCombo,
    MultisampleOption,
};
use crate::config::EnumerationConfig;
use crate::device::{DeviceCaps, DeviceType, DEVICE_TYPES};
use crate::error::{EnumerationError, SelectionError};
use crate::format::{Format, FormatUsage, SurfaceFormat, ADAPTER_FORMATS, BACK_BUFFER_FORMATS};
use crate::mode::DisplayMode;
use crate::present::PresentInterval;
use crate::provider::{AdapterDetails, CapabilityProvider};
use crate::selection::{self, DeviceSettings, MatchOptions};

/// An application check run on every otherwise valid combo:
/// `(caps, adapter_format, back_buffer_format, windowed) -> accept`.
pub type Acceptability<'a> = &'a dyn Fn(&DeviceCaps, Format, Format, bool) -> bool;

/// Enumerates adapters, devices and combos, and owns the resulting catalog.
pub struct DeviceEnumerator<P> {
    provider: P,
    config: EnumerationConfig,
    catalog: Arc<Catalog>,
}

impl<P: CapabilityProvider> DeviceEnumerator<P> {
    /// Creates an enumerator with the default configuration and an empty catalog.
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, EnumerationConfig::default())
    }

    /// Creates an enumerator with the given configuration and an empty catalog.
    pub fn with_config(provider: P, config: EnumerationConfig) -> Self {
        Self {
            provider,
            config,
            catalog: Arc::new(Catalog::default()),
        }
    }

    /// The provider queried by [`Self::enumerate`].
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The configuration the next pass will use.
    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// Mutable access to the configuration. Takes effect on the next pass.
    pub fn config_mut(&mut self) -> &mut EnumerationConfig {
        &mut self.config
    }

    /// A snapshot of the current catalog.
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    /// Finds an adapter in the current catalog.
    pub fn adapter(&self, ordinal: u32) -> Option<&AdapterRecord> {
        self.catalog.adapter(ordinal)
    }

    /// Finds a device in the current catalog.
    pub fn device(&self, ordinal: u32, device_type: DeviceType) -> Option<&DeviceRecord> {
        self.catalog.device(ordinal, device_type)
    }

    /// Finds a combo in the current catalog by its five key fields.
    pub fn combo(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        windowed: bool,
    ) -> Option<&DeviceSettingsCombo> {
        self.catalog.combo(
            ordinal,
            device_type,
            adapter_format,
            back_buffer_format,
            windowed,
        )
    }

    /// Finds the combo a settings value would run on.
    pub fn combo_for(&self, settings: &DeviceSettings) -> Option<&DeviceSettingsCombo> {
        self.catalog.combo_for(settings)
    }

    /// Resolves a settings request against the current catalog.
    pub fn find_valid_settings(
        &self,
        settings: &DeviceSettings,
        options: &MatchOptions,
    ) -> Result<DeviceSettings, SelectionError> {
        selection::find_valid_settings(&self.catalog, settings, options)
    }

    /// Rebuilds the catalog from scratch.
    ///
    /// The new catalog is built locally and swapped in when the pass
    /// completes; the previous one is discarded. If the provider cannot list
    /// adapters, the catalog is cleared and
    /// [`EnumerationError::BackendUnavailable`] is returned.
    pub fn enumerate(&mut self, accept: Option<Acceptability<'_>>) -> Result<(), EnumerationError> {
        let adapters = match self.provider.adapters() {
            Ok(adapters) => adapters,
            Err(err) => {
                log::warn!("Adapter enumeration failed: {err}");
                self.catalog = Arc::new(Catalog::default());
                return Err(err.into());
            }
        };

        let mut records: Vec<AdapterRecord> = adapters
            .into_iter()
            .filter_map(|details| self.enumerate_adapter(details, accept))
            .collect();
        assign_unique_descriptions(&mut records);

        let catalog = Catalog::new(records);
        log::info!(
            "Enumerated {} adapter(s), {} device(s), {} combo(s)",
            catalog.adapters().len(),
            catalog
                .adapters()
                .iter()
                .map(|a| a.devices.len())
                .sum::<usize>(),
            catalog.combos().count()
        );
        self.catalog = Arc::new(catalog);
        Ok(())
    }

    fn enumerate_adapter(
        &self,
        details: AdapterDetails,
        accept: Option<Acceptability<'_>>,
    ) -> Option<AdapterRecord> {
        let ordinal = details.ordinal;
        let mut display_modes: Vec<DisplayMode> = Vec::new();
        let mut adapter_formats: Vec<Format> = Vec::new();

        for &format in ADAPTER_FORMATS.iter() {
            for mode in self.provider.display_modes(ordinal, format) {
                if !self
                    .config
                    .accepts_mode(mode.width, mode.height, mode.refresh_rate)
                {
                    continue;
                }
                display_modes.push(mode);
                if !adapter_formats.contains(&mode.format) {
                    adapter_formats.push(mode.format);
                }
            }
        }

        // The desktop format is always usable for windowed rendering.
        if !adapter_formats.contains(&details.current_mode.format) {
            adapter_formats.push(details.current_mode.format);
        }

        display_modes.sort();

        let devices: Vec<DeviceRecord> = DEVICE_TYPES
            .iter()
            .filter_map(|&device_type| {
                self.enumerate_device(
                    ordinal,
                    device_type,
                    !display_modes.is_empty(),
                    &adapter_formats,
                    accept,
                )
            })
            .collect();

        if devices.is_empty() {
            log::debug!(
                "Adapter {ordinal} (\"{}\") has no usable device",
                details.description
            );
            return None;
        }

        Some(AdapterRecord {
            unique_description: details.description.clone(),
            details,
            display_modes,
            devices,
        })
    }

    fn enumerate_device(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        has_display_modes: bool,
        adapter_formats: &[Format],
        accept: Option<Acceptability<'_>>,
    ) -> Option<DeviceRecord> {
        let caps = match self.provider.device_caps(ordinal, device_type) {
            Ok(caps) => caps,
            Err(err) => {
                log::debug!("Skipping {device_type:?} on adapter {ordinal}: {err}");
                return None;
            }
        };

        let mut combos = Vec::new();
        for &adapter_format in adapter_formats {
            for &back_buffer_format in BACK_BUFFER_FORMATS.iter() {
                for windowed in [false, true] {
                    if !windowed && !has_display_modes {
                        continue;
                    }
                    if let Some(combo) = self.build_combo(
                        ordinal,
                        device_type,
                        &caps,
                        adapter_format,
                        back_buffer_format,
                        windowed,
                        accept,
                    ) {
                        combos.push(combo);
                    }
                }
            }
        }

        if combos.is_empty() {
            log::debug!("{device_type:?} on adapter {ordinal} has no valid combo");
            return None;
        }

        Some(DeviceRecord {
            ordinal,
            device_type,
            vertex_processing: self.config.vertex_processing_options(&caps),
            caps,
            combos,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_combo(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        caps: &DeviceCaps,
        adapter_format: Format,
        back_buffer_format: Format,
        windowed: bool,
        accept: Option<Acceptability<'_>>,
    ) -> Option<DeviceSettingsCombo> {
        if !self.provider.check_device_type(
            ordinal,
            device_type,
            adapter_format,
            back_buffer_format,
            windowed,
        ) {
            return None;
        }

        if self.config.require_post_pixel_shader_blending
            && !self.provider.check_device_format(
                ordinal,
                device_type,
                adapter_format,
                FormatUsage::PostPixelShaderBlending,
                SurfaceFormat::Color(back_buffer_format),
            )
        {
            return None;
        }

        if let Some(accept) = accept {
            if !accept(caps, adapter_format, back_buffer_format, windowed) {
                return None;
            }
        }

        let mut combo = DeviceSettingsCombo {
            ordinal,
            device_type,
            adapter_format,
            back_buffer_format,
            windowed,
            depth_stencil_formats: Vec::new(),
            multisample_options: Vec::new(),
            depth_stencil_conflicts: Vec::new(),
            present_intervals: Vec::new(),
        };

        self.build_depth_stencil_formats(&mut combo);
        self.build_multisample_options(&mut combo);
        if combo.multisample_options.is_empty() {
            return None;
        }
        self.build_conflicts(&mut combo);
        self.build_present_intervals(caps, &mut combo);

        Some(combo)
    }

    /// Fills the combo's depth/stencil list with every candidate that is a
    /// usable depth surface and matches the back buffer.
    pub fn build_depth_stencil_formats(&self, combo: &mut DeviceSettingsCombo) {
        combo.depth_stencil_formats = self
            .config
            .depth_stencil_candidates
            .iter()
            .copied()
            .filter(|&depth_format| {
                self.provider.check_device_format(
                    combo.ordinal,
                    combo.device_type,
                    combo.adapter_format,
                    FormatUsage::DepthStencil,
                    SurfaceFormat::Depth(depth_format),
                ) && self.provider.check_depth_stencil_match(
                    combo.ordinal,
                    combo.device_type,
                    combo.adapter_format,
                    combo.back_buffer_format,
                    depth_format,
                )
            })
            .collect();
    }

    /// Fills the combo's multisample list with every supported candidate and
    /// its quality count, capped at the configured ceiling plus one.
    pub fn build_multisample_options(&self, combo: &mut DeviceSettingsCombo) {
        combo.multisample_options = self
            .config
            .multisample_candidates
            .iter()
            .filter_map(|&kind| {
                self.provider
                    .check_multisample(
                        combo.ordinal,
                        combo.device_type,
                        SurfaceFormat::Color(combo.back_buffer_format),
                        combo.windowed,
                        kind,
                    )
                    .map(|quality| MultisampleOption {
                        kind,
                        max_quality: self.config.clamp_quality(quality),
                    })
            })
            .collect();
    }

    /// Records every pairing of the combo's own depth formats and multisample
    /// levels that the provider rejects.
    pub fn build_conflicts(&self, combo: &mut DeviceSettingsCombo) {
        let mut conflicts = Vec::new();
        for &depth_format in &combo.depth_stencil_formats {
            for option in &combo.multisample_options {
                let supported = self
                    .provider
                    .check_multisample(
                        combo.ordinal,
                        combo.device_type,
                        SurfaceFormat::Depth(depth_format),
                        combo.windowed,
                        option.kind,
                    )
                    .is_some();
                if !supported {
                    conflicts.push(DepthStencilConflict {
                        depth_format,
                        multisample: option.kind,
                    });
                }
            }
        }
        combo.depth_stencil_conflicts = conflicts;
    }

    /// Fills the combo's present intervals from the device caps.
    ///
    /// `Default` is always available. Intervals waiting for more than one
    /// retrace are never offered to windowed combos.
    pub fn build_present_intervals(&self, caps: &DeviceCaps, combo: &mut DeviceSettingsCombo) {
        combo.present_intervals = self
            .config
            .present_interval_candidates
            .iter()
            .copied()
            .filter(|&interval| !(combo.windowed && interval.is_multi_retrace()))
            .filter(|&interval| {
                interval == PresentInterval::Default
                    || caps.presentation_intervals.contains(interval)
            })
            .collect();
    }
}

/// Appends ` (#ordinal)` to every description when any two adapters share one.
fn assign_unique_descriptions(records: &mut [AdapterRecord]) {
    let lowered: Vec<String> = records
        .iter()
        .map(|r| r.details.description.to_lowercase())
        .collect();
    let all_unique = lowered
        .iter()
        .enumerate()
        .all(|(i, a)| lowered[i + 1..].iter().all(|b| a != b));

    for record in records.iter_mut() {
        record.unique_description = if all_unique {
            record.details.description.clone()
        } else {
            format!(
                "{} (#{})",
                record.details.description, record.details.ordinal
            )
        };
    }
}
