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

//! The enumerated catalog of adapters, devices and device-settings combos.

use serde::Serialize;

use crate::device::{DeviceCaps, DeviceType, VertexProcessing};
use crate::format::{DepthFormat, Format};
use crate::mode::DisplayMode;
use crate::multisample::MultisampleType;
use crate::present::PresentInterval;
use crate::provider::AdapterDetails;

/// A supported multisample level and the number of quality levels it offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MultisampleOption {
    /// The multisample level.
    pub kind: MultisampleType,
    /// Quality levels available, after the configured ceiling was applied.
    /// Valid qualities are `0..max_quality`.
    pub max_quality: u32,
}

/// A depth/stencil format that cannot be used with a multisample level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DepthStencilConflict {
    /// The conflicting depth/stencil format.
    pub depth_format: DepthFormat,
    /// The multisample level it cannot be combined with.
    pub multisample: MultisampleType,
}

/// The five fields that identify a combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ComboKey {
    /// Adapter ordinal.
    pub ordinal: u32,
    /// Device type.
    pub device_type: DeviceType,
    /// Desktop format of the adapter.
    pub adapter_format: Format,
    /// Back-buffer format.
    pub back_buffer_format: Format,
    /// Windowed or fullscreen.
    pub windowed: bool,
}

/// A validated configuration point for one device on one adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSettingsCombo {
    /// Adapter ordinal.
    pub ordinal: u32,
    /// Device type.
    pub device_type: DeviceType,
    /// Desktop format of the adapter.
    pub adapter_format: Format,
    /// Back-buffer format.
    pub back_buffer_format: Format,
    /// Windowed or fullscreen.
    pub windowed: bool,
    /// Compatible depth/stencil formats, in candidate order.
    pub depth_stencil_formats: Vec<DepthFormat>,
    /// Supported multisample levels, in candidate order. Never empty.
    pub multisample_options: Vec<MultisampleOption>,
    /// Depth/stencil and multisample pairs that cannot be used together.
    pub depth_stencil_conflicts: Vec<DepthStencilConflict>,
    /// Usable present intervals, in candidate order.
    pub present_intervals: Vec<PresentInterval>,
}

impl DeviceSettingsCombo {
    /// The combo's identity.
    pub fn key(&self) -> ComboKey {
        ComboKey {
            ordinal: self.ordinal,
            device_type: self.device_type,
            adapter_format: self.adapter_format,
            back_buffer_format: self.back_buffer_format,
            windowed: self.windowed,
        }
    }

    /// Whether the combo offers `kind` with at least `quality + 1` levels.
    pub fn supports_multisample(&self, kind: MultisampleType, quality: u32) -> bool {
        self.multisample_options
            .iter()
            .any(|option| option.kind == kind && option.max_quality > quality)
    }

    /// Whether the depth format and multisample level conflict.
    pub fn is_conflict(&self, depth_format: DepthFormat, multisample: MultisampleType) -> bool {
        self.depth_stencil_conflicts
            .iter()
            .any(|c| c.depth_format == depth_format && c.multisample == multisample)
    }
}

/// One device type available on an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    /// Ordinal of the owning adapter.
    pub ordinal: u32,
    /// The device type.
    pub device_type: DeviceType,
    /// Capabilities reported for the device.
    pub caps: DeviceCaps,
    /// Vertex processing modes available, most capable first.
    pub vertex_processing: Vec<VertexProcessing>,
    /// Valid combos. Never empty.
    pub combos: Vec<DeviceSettingsCombo>,
}

impl DeviceRecord {
    /// Finds a combo by its format and windowed fields.
    pub fn combo(
        &self,
        adapter_format: Format,
        back_buffer_format: Format,
        windowed: bool,
    ) -> Option<&DeviceSettingsCombo> {
        self.combos.iter().find(|combo| {
            combo.adapter_format == adapter_format
                && combo.back_buffer_format == back_buffer_format
                && combo.windowed == windowed
        })
    }
}

/// One adapter with at least one usable device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterRecord {
    /// Identity reported by the provider.
    pub details: AdapterDetails,
    /// The description, with the ordinal appended when descriptions collide.
    pub unique_description: String,
    /// Accepted display modes, sorted by width, height, format, refresh.
    pub display_modes: Vec<DisplayMode>,
    /// Usable devices, in device-type order. Never empty.
    pub devices: Vec<DeviceRecord>,
}

impl AdapterRecord {
    /// The adapter ordinal.
    pub fn ordinal(&self) -> u32 {
        self.details.ordinal
    }

    /// The desktop mode the adapter was running when enumerated.
    pub fn desktop_mode(&self) -> DisplayMode {
        self.details.current_mode
    }

    /// Finds a device by type.
    pub fn device(&self, device_type: DeviceType) -> Option<&DeviceRecord> {
        self.devices.iter().find(|d| d.device_type == device_type)
    }

    /// Display modes of a single format, in catalog order.
    pub fn modes_of_format(&self, format: Format) -> impl Iterator<Item = &DisplayMode> + '_ {
        self.display_modes.iter().filter(move |m| m.format == format)
    }
}

/// The result of an enumeration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    adapters: Vec<AdapterRecord>,
}

impl Catalog {
    pub(crate) fn new(adapters: Vec<AdapterRecord>) -> Self {
        Self { adapters }
    }

    /// All retained adapters, in provider order.
    pub fn adapters(&self) -> &[AdapterRecord] {
        &self.adapters
    }

    /// Returns `true` when no acceptable configuration was found.
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Finds an adapter by ordinal.
    pub fn adapter(&self, ordinal: u32) -> Option<&AdapterRecord> {
        self.adapters.iter().find(|a| a.ordinal() == ordinal)
    }

    /// Finds a device by adapter ordinal and type.
    pub fn device(&self, ordinal: u32, device_type: DeviceType) -> Option<&DeviceRecord> {
        self.adapter(ordinal)?.device(device_type)
    }

    /// Finds a combo by all five key fields.
    pub fn combo(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        windowed: bool,
    ) -> Option<&DeviceSettingsCombo> {
        self.device(ordinal, device_type)?
            .combo(adapter_format, back_buffer_format, windowed)
    }

    /// Finds a combo by key.
    pub fn combo_by_key(&self, key: &ComboKey) -> Option<&DeviceSettingsCombo> {
        self.combo(
            key.ordinal,
            key.device_type,
            key.adapter_format,
            key.back_buffer_format,
            key.windowed,
        )
    }

    /// Iterates every combo together with its adapter and device.
    pub fn combos(
        &self,
    ) -> impl Iterator<Item = (&AdapterRecord, &DeviceRecord, &DeviceSettingsCombo)> + '_ {
        self.adapters.iter().flat_map(|adapter| {
            adapter.devices.iter().flat_map(move |device| {
                device
                    .combos
                    .iter()
                    .map(move |combo| (adapter, device, combo))
            })
        })
    }
}
