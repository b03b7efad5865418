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

//! Recorded capability tables that can stand in for a live graphics layer.
//!
//! A [`HardwareProfile`] lists adapters, their display modes, and per device
//! type the formats and multisample levels the device accepts. It implements
//! [`CapabilityProvider`], so an enumeration pass can be replayed offline from
//! a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::device::{DeviceCaps, DeviceType};
use crate::error::{ProfileError, ProviderError};
use crate::format::{DepthFormat, Format, FormatUsage, SurfaceFormat};
use crate::mode::DisplayMode;
use crate::multisample::MultisampleType;
use crate::provider::{AdapterDetails, CapabilityProvider};

/// A complete set of adapters and their capability tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareProfile {
    /// Adapters, in the order the native layer reports them.
    #[serde(default)]
    pub adapters: Vec<AdapterProfile>,
}

/// One adapter of a [`HardwareProfile`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterProfile {
    /// Identity and desktop mode.
    #[serde(flatten)]
    pub details: AdapterDetails,
    /// Every display mode the adapter reports, any format, any order.
    #[serde(default)]
    pub display_modes: Vec<DisplayMode>,
    /// Devices available on the adapter. Device types not listed fail their
    /// capability query.
    #[serde(default)]
    pub devices: Vec<DeviceProfile>,
}

/// Capability tables of one device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// The device type described.
    pub device_type: DeviceType,
    /// Capabilities returned by the capability query.
    #[serde(default)]
    pub caps: DeviceCaps,
    /// Adapter formats the device can run on.
    #[serde(default)]
    pub adapter_formats: Vec<Format>,
    /// Back buffers accepted in a window.
    #[serde(default)]
    pub windowed_back_buffers: Vec<Format>,
    /// Back buffers accepted fullscreen.
    #[serde(default)]
    pub fullscreen_back_buffers: Vec<Format>,
    /// Back buffers that support post-pixel-shader blending.
    #[serde(default)]
    pub blendable_formats: Vec<Format>,
    /// Depth/stencil formats usable as depth surfaces.
    #[serde(default)]
    pub depth_stencil_formats: Vec<DepthFormat>,
    /// Back-buffer and depth pairs that do not match.
    #[serde(default)]
    pub depth_mismatches: Vec<DepthMismatch>,
    /// Supported multisample levels.
    #[serde(default)]
    pub multisample: Vec<MultisampleProfile>,
}

/// A back buffer and depth/stencil format that cannot be paired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthMismatch {
    /// The back-buffer format.
    pub back_buffer: Format,
    /// The depth/stencil format.
    pub depth: DepthFormat,
}

/// A supported multisample level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisampleProfile {
    /// The multisample level.
    pub kind: MultisampleType,
    /// Quality levels reported for it.
    #[serde(default = "one")]
    pub quality_levels: u32,
    /// Color formats the level applies to; empty means all.
    #[serde(default)]
    pub formats: Vec<Format>,
    /// Only available fullscreen.
    #[serde(default)]
    pub fullscreen_only: bool,
    /// Depth/stencil formats that cannot be multisampled at this level.
    #[serde(default)]
    pub depth_conflicts: Vec<DepthFormat>,
}

fn one() -> u32 {
    1
}

impl MultisampleProfile {
    /// A level with one quality, applying to every format.
    pub fn new(kind: MultisampleType) -> Self {
        Self {
            kind,
            quality_levels: 1,
            formats: Vec::new(),
            fullscreen_only: false,
            depth_conflicts: Vec::new(),
        }
    }
}

impl DeviceProfile {
    /// A device that accepts nothing; fill in the tables before use.
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            device_type,
            caps: DeviceCaps::default(),
            adapter_formats: Vec::new(),
            windowed_back_buffers: Vec::new(),
            fullscreen_back_buffers: Vec::new(),
            blendable_formats: Vec::new(),
            depth_stencil_formats: Vec::new(),
            depth_mismatches: Vec::new(),
            multisample: Vec::new(),
        }
    }
}

impl HardwareProfile {
    /// Parses a profile from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a profile from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ProfileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Serializes the profile as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn adapter(&self, ordinal: u32) -> Option<&AdapterProfile> {
        self.adapters.iter().find(|a| a.details.ordinal == ordinal)
    }

    fn device(&self, ordinal: u32, device_type: DeviceType) -> Option<&DeviceProfile> {
        self.adapter(ordinal)?
            .devices
            .iter()
            .find(|d| d.device_type == device_type)
    }
}

impl CapabilityProvider for HardwareProfile {
    fn adapters(&self) -> Result<Vec<AdapterDetails>, ProviderError> {
        Ok(self.adapters.iter().map(|a| a.details.clone()).collect())
    }

    fn display_modes(&self, ordinal: u32, format: Format) -> Vec<DisplayMode> {
        self.adapter(ordinal)
            .map(|a| {
                a.display_modes
                    .iter()
                    .copied()
                    .filter(|m| m.format == format)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn device_caps(
        &self,
        ordinal: u32,
        device_type: DeviceType,
    ) -> Result<DeviceCaps, ProviderError> {
        if self.adapter(ordinal).is_none() {
            return Err(ProviderError::UnknownAdapter(ordinal));
        }
        self.device(ordinal, device_type)
            .map(|d| d.caps.clone())
            .ok_or(ProviderError::DeviceUnavailable {
                ordinal,
                device_type,
            })
    }

    fn check_device_type(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        windowed: bool,
    ) -> bool {
        let Some(device) = self.device(ordinal, device_type) else {
            return false;
        };
        let back_buffers = if windowed {
            &device.windowed_back_buffers
        } else {
            &device.fullscreen_back_buffers
        };
        device.adapter_formats.contains(&adapter_format) && back_buffers.contains(&back_buffer_format)
    }

    fn check_device_format(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        usage: FormatUsage,
        format: SurfaceFormat,
    ) -> bool {
        let Some(device) = self.device(ordinal, device_type) else {
            return false;
        };
        if !device.adapter_formats.contains(&adapter_format) {
            return false;
        }
        match (usage, format) {
            (FormatUsage::PostPixelShaderBlending, SurfaceFormat::Color(color)) => {
                device.blendable_formats.contains(&color)
            }
            (FormatUsage::DepthStencil, SurfaceFormat::Depth(depth)) => {
                device.depth_stencil_formats.contains(&depth)
            }
            _ => false,
        }
    }

    fn check_depth_stencil_match(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        _adapter_format: Format,
        back_buffer_format: Format,
        depth_format: DepthFormat,
    ) -> bool {
        let Some(device) = self.device(ordinal, device_type) else {
            return false;
        };
        device.depth_stencil_formats.contains(&depth_format)
            && !device
                .depth_mismatches
                .iter()
                .any(|m| m.back_buffer == back_buffer_format && m.depth == depth_format)
    }

    fn check_multisample(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        format: SurfaceFormat,
        windowed: bool,
        kind: MultisampleType,
    ) -> Option<u32> {
        let level = self
            .device(ordinal, device_type)?
            .multisample
            .iter()
            .find(|m| m.kind == kind)?;
        if windowed && level.fullscreen_only {
            return None;
        }
        let supported = match format {
            SurfaceFormat::Color(color) => level.formats.is_empty() || level.formats.contains(&color),
            SurfaceFormat::Depth(depth) => !level.depth_conflicts.contains(&depth),
        };
        supported.then_some(level.quality_levels)
    }
}
