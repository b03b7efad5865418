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

//! Resolves requested device settings against an enumerated [`Catalog`].
//!
//! Each field of a [`DeviceSettings`] request carries a [`MatchType`]. Fields
//! that are ignored are replaced with sensible defaults, preserved fields
//! filter out combos that cannot honor them, and the remaining combos are
//! ranked against the resulting "optimal" request. The winner is then
//! expanded into a complete, valid settings value.

use serde::{Deserialize, Serialize};

use crate::catalog::{AdapterRecord, Catalog, DeviceRecord, DeviceSettingsCombo};
use crate::device::{DeviceType, VertexProcessing};
use crate::error::SelectionError;
use crate::format::{DepthFormat, Format};
use crate::mode::DisplayMode;
use crate::multisample::MultisampleType;
use crate::present::PresentInterval;

/// Default windowed back-buffer width.
pub const DEFAULT_WINDOWED_WIDTH: u32 = 640;
/// Default windowed back-buffer height.
pub const DEFAULT_WINDOWED_HEIGHT: u32 = 480;
/// Default number of back buffers.
pub const DEFAULT_BACK_BUFFER_COUNT: u32 = 2;

const ORDINAL_WEIGHT: f32 = 1000.0;
const DEVICE_TYPE_WEIGHT: f32 = 100.0;
const WINDOWED_WEIGHT: f32 = 10.0;
const FIELD_WEIGHT: f32 = 1.0;
const TIE_BREAK: f32 = 0.1;

const DEPTH_MISMATCH_PENALTY: i64 = 10_000;

/// How a requested field constrains the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchType {
    /// Use the best value available, ignoring the request.
    #[default]
    IgnoreInput,
    /// Use exactly the requested value; combos without it are rejected.
    PreserveInput,
    /// Prefer the requested value, falling back to the closest available.
    ClosestToInput,
}

/// Per-field match policy for [`find_valid_settings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Adapter ordinal.
    pub adapter_ordinal: MatchType,
    /// Device type.
    pub device_type: MatchType,
    /// Windowed flag.
    pub windowed: MatchType,
    /// Adapter format.
    pub adapter_format: MatchType,
    /// Vertex processing.
    pub vertex_processing: MatchType,
    /// Back-buffer width and height.
    pub resolution: MatchType,
    /// Back-buffer format.
    pub back_buffer_format: MatchType,
    /// Back-buffer count.
    pub back_buffer_count: MatchType,
    /// Multisample level and quality.
    pub multisample: MatchType,
    /// Depth bits of the depth/stencil format.
    pub depth_format: MatchType,
    /// Stencil bits of the depth/stencil format.
    pub stencil_format: MatchType,
    /// Fullscreen refresh rate.
    pub refresh_rate: MatchType,
    /// Present interval.
    pub present_interval: MatchType,
}

/// Everything needed to create a device and its swap chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSettings {
    /// Adapter ordinal.
    pub adapter_ordinal: u32,
    /// Device type.
    pub device_type: DeviceType,
    /// Desktop format of the adapter while the device runs.
    pub adapter_format: Format,
    /// Vertex processing mode.
    pub vertex_processing: VertexProcessing,
    /// Back-buffer width in pixels.
    pub back_buffer_width: u32,
    /// Back-buffer height in pixels.
    pub back_buffer_height: u32,
    /// Back-buffer format.
    pub back_buffer_format: Format,
    /// Number of back buffers.
    pub back_buffer_count: u32,
    /// Multisample level.
    pub multisample: MultisampleType,
    /// Multisample quality, below the combo's `max_quality`.
    pub multisample_quality: u32,
    /// Whether a depth/stencil surface is created with the swap chain.
    pub enable_auto_depth_stencil: bool,
    /// Format of the automatic depth/stencil surface.
    pub auto_depth_stencil_format: DepthFormat,
    /// Windowed or fullscreen.
    pub windowed: bool,
    /// Fullscreen refresh rate in Hz; 0 for windowed or the adapter default.
    pub fullscreen_refresh_rate: u32,
    /// Present interval.
    pub present_interval: PresentInterval,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            adapter_ordinal: 0,
            device_type: DeviceType::Hardware,
            adapter_format: Format::X8R8G8B8,
            vertex_processing: VertexProcessing::Hardware,
            back_buffer_width: DEFAULT_WINDOWED_WIDTH,
            back_buffer_height: DEFAULT_WINDOWED_HEIGHT,
            back_buffer_format: Format::X8R8G8B8,
            back_buffer_count: DEFAULT_BACK_BUFFER_COUNT,
            multisample: MultisampleType::None,
            multisample_quality: 0,
            enable_auto_depth_stencil: true,
            auto_depth_stencil_format: DepthFormat::D16,
            windowed: true,
            fullscreen_refresh_rate: 0,
            present_interval: PresentInterval::Immediate,
        }
    }
}

impl Catalog {
    /// Finds the combo a settings value would run on.
    pub fn combo_for(&self, settings: &DeviceSettings) -> Option<&DeviceSettingsCombo> {
        self.combo(
            settings.adapter_ordinal,
            settings.device_type,
            settings.adapter_format,
            settings.back_buffer_format,
            settings.windowed,
        )
    }
}

/// Picks the catalog combo that best matches `settings` under `options` and
/// builds complete settings from it.
pub fn find_valid_settings(
    catalog: &Catalog,
    settings: &DeviceSettings,
    options: &MatchOptions,
) -> Result<DeviceSettings, SelectionError> {
    let optimal = optimal_settings(catalog, settings, options);

    let mut best: Option<(f32, &AdapterRecord, &DeviceRecord, &DeviceSettingsCombo)> = None;
    for (adapter, device, combo) in catalog.combos() {
        // A windowed device runs on the desktop as it is.
        if combo.windowed && combo.adapter_format != adapter.desktop_mode().format {
            continue;
        }
        if !matches_preserved(adapter, device, combo, settings, options) {
            continue;
        }
        let ranking = rank_combo(adapter, device, combo, &optimal);
        if best.map_or(true, |(best_ranking, ..)| ranking > best_ranking) {
            best = Some((ranking, adapter, device, combo));
        }
    }

    let Some((ranking, adapter, device, combo)) = best else {
        log::debug!("No combo satisfies the preserved settings");
        return Err(SelectionError::NoCompatibleDevices);
    };
    log::debug!(
        "Selected {} {} {}/{} windowed={} (ranking {ranking:.1})",
        adapter.unique_description,
        combo.device_type.name(),
        combo.adapter_format,
        combo.back_buffer_format,
        combo.windowed
    );
    build_valid_settings(adapter, device, combo, settings, options)
}

fn desktop_mode_of(catalog: &Catalog, ordinal: u32) -> DisplayMode {
    catalog
        .adapter(ordinal)
        .map(AdapterRecord::desktop_mode)
        .unwrap_or(DisplayMode::new(0, 0, Format::X8R8G8B8, 0))
}

/// The request with every ignored field replaced by its default. The result
/// is what combos are ranked against; it may not exist on the system.
pub fn optimal_settings(
    catalog: &Catalog,
    settings: &DeviceSettings,
    options: &MatchOptions,
) -> DeviceSettings {
    let ignore = |m: MatchType| m == MatchType::IgnoreInput;
    let mut optimal = *settings;

    if ignore(options.adapter_ordinal) {
        optimal.adapter_ordinal = 0;
    }
    if ignore(options.device_type) {
        optimal.device_type = DeviceType::Hardware;
    }
    if ignore(options.windowed) {
        optimal.windowed = true;
    }

    let desktop = desktop_mode_of(catalog, optimal.adapter_ordinal);
    if ignore(options.adapter_format) {
        optimal.adapter_format =
            if optimal.windowed || desktop.format.color_channel_bits() >= 8 {
                desktop.format
            } else {
                Format::X8R8G8B8
            };
    }
    if ignore(options.vertex_processing) {
        optimal.vertex_processing = VertexProcessing::Hardware;
    }
    if ignore(options.resolution) {
        (optimal.back_buffer_width, optimal.back_buffer_height) = if optimal.windowed {
            (DEFAULT_WINDOWED_WIDTH, DEFAULT_WINDOWED_HEIGHT)
        } else {
            (desktop.width, desktop.height)
        };
    }
    if ignore(options.back_buffer_format) {
        optimal.back_buffer_format = optimal.adapter_format;
    }
    if ignore(options.back_buffer_count) {
        optimal.back_buffer_count = DEFAULT_BACK_BUFFER_COUNT;
    }
    if ignore(options.multisample) {
        optimal.multisample = MultisampleType::None;
        optimal.multisample_quality = 0;
    }
    if ignore(options.depth_format) && ignore(options.stencil_format) {
        optimal.auto_depth_stencil_format = if optimal.back_buffer_format.color_channel_bits() >= 8
        {
            DepthFormat::D32
        } else {
            DepthFormat::D16
        };
    }
    if ignore(options.refresh_rate) {
        optimal.fullscreen_refresh_rate = 0;
    }
    if ignore(options.present_interval) {
        optimal.present_interval = default_present_interval(optimal.windowed);
    }
    optimal
}

fn default_present_interval(windowed: bool) -> PresentInterval {
    if windowed {
        PresentInterval::Immediate
    } else {
        PresentInterval::Default
    }
}

/// Rejects combos that cannot honor a preserved field.
fn matches_preserved(
    adapter: &AdapterRecord,
    device: &DeviceRecord,
    combo: &DeviceSettingsCombo,
    settings: &DeviceSettings,
    options: &MatchOptions,
) -> bool {
    let preserve = |m: MatchType| m == MatchType::PreserveInput;

    if preserve(options.adapter_ordinal) && combo.ordinal != settings.adapter_ordinal {
        return false;
    }
    if preserve(options.device_type) && combo.device_type != settings.device_type {
        return false;
    }
    if preserve(options.windowed) && combo.windowed != settings.windowed {
        return false;
    }
    if preserve(options.adapter_format) && combo.adapter_format != settings.adapter_format {
        return false;
    }
    if preserve(options.vertex_processing)
        && settings.vertex_processing.needs_hardware_transform()
        && !device.caps.hardware_transform_and_light
    {
        return false;
    }
    if preserve(options.resolution)
        && !adapter.modes_of_format(combo.adapter_format).any(|m| {
            m.width == settings.back_buffer_width && m.height == settings.back_buffer_height
        })
    {
        return false;
    }
    if preserve(options.back_buffer_format)
        && combo.back_buffer_format != settings.back_buffer_format
    {
        return false;
    }
    if preserve(options.multisample)
        && !combo.supports_multisample(settings.multisample, settings.multisample_quality)
    {
        return false;
    }

    let requested_depth = settings.auto_depth_stencil_format;
    if requested_depth != DepthFormat::Unknown {
        if preserve(options.depth_format)
            && preserve(options.stencil_format)
            && !combo.depth_stencil_formats.contains(&requested_depth)
        {
            return false;
        }
        if preserve(options.depth_format)
            && !combo
                .depth_stencil_formats
                .iter()
                .any(|f| f.depth_bits() == requested_depth.depth_bits())
        {
            return false;
        }
        if preserve(options.stencil_format)
            && !combo
                .depth_stencil_formats
                .iter()
                .any(|f| f.stencil_bits() == requested_depth.stencil_bits())
        {
            return false;
        }
    }

    if preserve(options.refresh_rate)
        && !adapter
            .modes_of_format(combo.adapter_format)
            .any(|m| m.refresh_rate == settings.fullscreen_refresh_rate)
    {
        return false;
    }
    if preserve(options.present_interval)
        && !combo.present_intervals.contains(&settings.present_interval)
    {
        return false;
    }
    true
}

/// Partial credit for a color format that differs from the requested one.
fn format_closeness(actual: Format, wanted: Format) -> f32 {
    if actual == wanted {
        return FIELD_WEIGHT;
    }
    let delta = actual.color_channel_bits().abs_diff(wanted.color_channel_bits());
    (0.9 - delta as f32 * 0.2).max(0.0) * FIELD_WEIGHT
}

/// Scores how closely a combo matches the optimal settings. Higher is better.
///
/// Matching ordinal, device type and windowed flag dominate the score; every
/// other field is worth one point, and a few preferences add a tenth.
pub fn rank_combo(
    adapter: &AdapterRecord,
    device: &DeviceRecord,
    combo: &DeviceSettingsCombo,
    optimal: &DeviceSettings,
) -> f32 {
    let desktop = adapter.desktop_mode();
    let hardware_tnl = device.caps.hardware_transform_and_light;
    let mut ranking = 0.0;

    if combo.ordinal == optimal.adapter_ordinal {
        ranking += ORDINAL_WEIGHT;
    }
    if combo.device_type == optimal.device_type {
        ranking += DEVICE_TYPE_WEIGHT;
    }
    if combo.device_type == DeviceType::Hardware {
        ranking += TIE_BREAK;
    }
    if combo.windowed == optimal.windowed {
        ranking += WINDOWED_WEIGHT;
    }

    ranking += format_closeness(combo.adapter_format, optimal.adapter_format);
    if !combo.windowed {
        let preferred = if desktop.format.color_channel_bits() >= 8 {
            desktop.format
        } else {
            Format::X8R8G8B8
        };
        if combo.adapter_format == preferred {
            ranking += TIE_BREAK;
        }
    }

    if optimal.vertex_processing.needs_hardware_transform() && hardware_tnl {
        ranking += FIELD_WEIGHT;
    }
    if hardware_tnl {
        ranking += TIE_BREAK;
    }

    if adapter.modes_of_format(combo.adapter_format).any(|m| {
        m.width == optimal.back_buffer_width && m.height == optimal.back_buffer_height
    }) {
        ranking += FIELD_WEIGHT;
    }

    ranking += format_closeness(combo.back_buffer_format, optimal.back_buffer_format);
    if combo.back_buffer_format == combo.adapter_format {
        ranking += TIE_BREAK;
    }

    if combo.supports_multisample(optimal.multisample, optimal.multisample_quality) {
        ranking += FIELD_WEIGHT;
    }
    if combo
        .depth_stencil_formats
        .contains(&optimal.auto_depth_stencil_format)
    {
        ranking += FIELD_WEIGHT;
    }
    if adapter
        .modes_of_format(combo.adapter_format)
        .any(|m| m.refresh_rate == optimal.fullscreen_refresh_rate)
    {
        ranking += FIELD_WEIGHT;
    }
    if combo.present_intervals.contains(&optimal.present_interval) {
        ranking += FIELD_WEIGHT;
    }
    ranking
}

/// Expands the winning combo into complete settings.
fn build_valid_settings(
    adapter: &AdapterRecord,
    device: &DeviceRecord,
    combo: &DeviceSettingsCombo,
    settings: &DeviceSettings,
    options: &MatchOptions,
) -> Result<DeviceSettings, SelectionError> {
    let desktop = adapter.desktop_mode();

    let vertex_processing = select_vertex_processing(device, settings, options);

    let (width, height) = if options.resolution == MatchType::PreserveInput {
        (settings.back_buffer_width, settings.back_buffer_height)
    } else {
        let wanted = if options.resolution == MatchType::ClosestToInput
            && settings.back_buffer_width != 0
            && settings.back_buffer_height != 0
        {
            (settings.back_buffer_width, settings.back_buffer_height)
        } else if combo.windowed {
            (DEFAULT_WINDOWED_WIDTH, DEFAULT_WINDOWED_HEIGHT)
        } else {
            (desktop.width, desktop.height)
        };
        find_valid_resolution(adapter, combo, wanted)?
    };

    let back_buffer_count = match options.back_buffer_count {
        MatchType::PreserveInput => settings.back_buffer_count,
        MatchType::IgnoreInput => DEFAULT_BACK_BUFFER_COUNT,
        MatchType::ClosestToInput => settings.back_buffer_count.clamp(1, 3),
    };

    let (multisample, multisample_quality) = select_multisample(combo, settings, options);

    let depth = select_depth_stencil(combo, settings, options, multisample);

    let fullscreen_refresh_rate =
        select_refresh_rate(adapter, combo, settings, options, width, height);

    let present_interval = match options.present_interval {
        MatchType::PreserveInput => settings.present_interval,
        MatchType::IgnoreInput => default_present_interval(combo.windowed),
        MatchType::ClosestToInput => {
            if combo.present_intervals.contains(&settings.present_interval) {
                settings.present_interval
            } else {
                default_present_interval(combo.windowed)
            }
        }
    };

    Ok(DeviceSettings {
        adapter_ordinal: combo.ordinal,
        device_type: combo.device_type,
        adapter_format: combo.adapter_format,
        vertex_processing,
        back_buffer_width: width,
        back_buffer_height: height,
        back_buffer_format: combo.back_buffer_format,
        back_buffer_count,
        multisample,
        multisample_quality,
        enable_auto_depth_stencil: depth.is_some(),
        auto_depth_stencil_format: depth.unwrap_or(DepthFormat::Unknown),
        windowed: combo.windowed,
        fullscreen_refresh_rate,
        present_interval,
    })
}

fn select_vertex_processing(
    device: &DeviceRecord,
    settings: &DeviceSettings,
    options: &MatchOptions,
) -> VertexProcessing {
    let hardware_tnl = device.caps.hardware_transform_and_light;
    match options.vertex_processing {
        MatchType::PreserveInput => settings.vertex_processing,
        MatchType::IgnoreInput if hardware_tnl => VertexProcessing::Hardware,
        MatchType::IgnoreInput => VertexProcessing::Software,
        MatchType::ClosestToInput => {
            if !hardware_tnl && settings.vertex_processing.needs_hardware_transform() {
                VertexProcessing::Software
            } else {
                settings.vertex_processing
            }
        }
    }
}

/// Windowed sizes are kept, clamped to the desktop. Fullscreen sizes snap to
/// the closest mode of the combo's adapter format.
fn find_valid_resolution(
    adapter: &AdapterRecord,
    combo: &DeviceSettingsCombo,
    (width, height): (u32, u32),
) -> Result<(u32, u32), SelectionError> {
    if combo.windowed {
        let desktop = adapter.desktop_mode();
        let clamp = |wanted: u32, limit: u32| if limit > 0 { wanted.min(limit) } else { wanted };
        return Ok((clamp(width, desktop.width), clamp(height, desktop.height)));
    }

    adapter
        .modes_of_format(combo.adapter_format)
        .min_by_key(|m| {
            u64::from(m.width.abs_diff(width)) + u64::from(m.height.abs_diff(height))
        })
        .map(|m| (m.width, m.height))
        .ok_or(SelectionError::NoValidResolution {
            ordinal: combo.ordinal,
        })
}

fn select_multisample(
    combo: &DeviceSettingsCombo,
    settings: &DeviceSettings,
    options: &MatchOptions,
) -> (MultisampleType, u32) {
    // Combos may lack `None`; fall back to their first offered level.
    let lowest = if combo.supports_multisample(MultisampleType::None, 0) {
        (MultisampleType::None, 0)
    } else {
        combo
            .multisample_options
            .first()
            .map_or((MultisampleType::None, 0), |option| (option.kind, 0))
    };

    match options.multisample {
        MatchType::PreserveInput => (settings.multisample, settings.multisample_quality),
        MatchType::IgnoreInput => lowest,
        MatchType::ClosestToInput => {
            let wanted = settings.multisample.level();
            let mut best = lowest;
            for option in &combo.multisample_options {
                if option.kind.level().abs_diff(wanted) < best.0.level().abs_diff(wanted) {
                    best = (
                        option.kind,
                        option
                            .max_quality
                            .saturating_sub(1)
                            .min(settings.multisample_quality),
                    );
                }
            }
            best
        }
    }
}

/// Ranks the combo's depth/stencil formats; lower is better. Formats that
/// conflict with the chosen multisample level are skipped. `None` when no
/// format is left.
fn select_depth_stencil(
    combo: &DeviceSettingsCombo,
    settings: &DeviceSettings,
    options: &MatchOptions,
    multisample: MultisampleType,
) -> Option<DepthFormat> {
    let back_buffer_bits = i64::from(combo.back_buffer_format.color_channel_bits());
    let requested = settings.auto_depth_stencil_format;
    let wanted_depth = i64::from(requested.depth_bits());
    let wanted_stencil = i64::from(requested.stencil_bits());

    combo
        .depth_stencil_formats
        .iter()
        .copied()
        .filter(|&format| !combo.is_conflict(format, multisample))
        .min_by_key(|format| {
            let depth = i64::from(format.depth_bits());
            let stencil = i64::from(format.stencil_bits());
            let depth_rank = match options.depth_format {
                MatchType::PreserveInput if depth == wanted_depth => 0,
                MatchType::PreserveInput => DEPTH_MISMATCH_PENALTY,
                MatchType::IgnoreInput => (depth - back_buffer_bits * 4).abs(),
                MatchType::ClosestToInput => (depth - wanted_depth).abs(),
            };
            let stencil_rank = match options.stencil_format {
                MatchType::PreserveInput if stencil == wanted_stencil => 0,
                MatchType::PreserveInput => DEPTH_MISMATCH_PENALTY,
                MatchType::IgnoreInput => stencil,
                MatchType::ClosestToInput => (stencil - wanted_stencil).abs(),
            };
            depth_rank + stencil_rank
        })
}

fn select_refresh_rate(
    adapter: &AdapterRecord,
    combo: &DeviceSettingsCombo,
    settings: &DeviceSettings,
    options: &MatchOptions,
    width: u32,
    height: u32,
) -> u32 {
    if combo.windowed {
        return 0;
    }
    let wanted = match options.refresh_rate {
        MatchType::PreserveInput => return settings.fullscreen_refresh_rate,
        MatchType::ClosestToInput => settings.fullscreen_refresh_rate,
        MatchType::IgnoreInput => adapter.desktop_mode().refresh_rate,
    };
    if wanted == 0 {
        return 0;
    }
    adapter
        .modes_of_format(combo.adapter_format)
        .filter(|m| m.width == width && m.height == height)
        .min_by_key(|m| m.refresh_rate.abs_diff(wanted))
        .map_or(0, |m| m.refresh_rate)
}
