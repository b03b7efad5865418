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

//! Hardware profiles shared by the integration tests.

#![allow(dead_code)]

use std::cell::Cell;

use devcaps_core::profile::{AdapterProfile, DeviceProfile, MultisampleProfile};
use devcaps_core::{
    AdapterDetails, CapabilityProvider, DepthFormat, DeviceCaps, DeviceType, DisplayMode, Format,
    FormatUsage, HardwareProfile, MultisampleType, PresentIntervalFlags, ProviderError,
    SurfaceFormat,
};

pub const DESKTOP: DisplayMode = DisplayMode::new(1280, 1024, Format::X8R8G8B8, 60);

/// Modes of a typical monitor, deliberately out of order, plus one mode in a
/// format that is never an adapter format.
pub fn monitor_modes() -> Vec<DisplayMode> {
    vec![
        DisplayMode::new(1280, 1024, Format::X8R8G8B8, 60),
        DisplayMode::new(1024, 768, Format::X8R8G8B8, 85),
        DisplayMode::new(800, 600, Format::R5G6B5, 60),
        DisplayMode::new(640, 480, Format::X8R8G8B8, 60),
        DisplayMode::new(1024, 768, Format::X8R8G8B8, 60),
        DisplayMode::new(800, 600, Format::X8R8G8B8, 75),
        DisplayMode::new(800, 600, Format::X8R8G8B8, 60),
        DisplayMode::new(1024, 768, Format::A8R8G8B8, 60),
    ]
}

/// A hardware device with T&L: 32-bit and 16-bit desktops, blending on the
/// 32-bit back buffers only, three depth formats and 4x multisampling that
/// cannot be combined with D32.
pub fn hal_device() -> DeviceProfile {
    let mut device = DeviceProfile::new(DeviceType::Hardware);
    device.caps = DeviceCaps {
        presentation_intervals: PresentIntervalFlags::IMMEDIATE
            | PresentIntervalFlags::ONE
            | PresentIntervalFlags::TWO,
        hardware_transform_and_light: true,
        pure_device: true,
    };
    device.adapter_formats = vec![Format::X8R8G8B8, Format::R5G6B5];
    device.windowed_back_buffers = vec![Format::A8R8G8B8, Format::X8R8G8B8, Format::R5G6B5];
    device.fullscreen_back_buffers = vec![Format::X8R8G8B8, Format::R5G6B5];
    device.blendable_formats = vec![Format::A8R8G8B8, Format::X8R8G8B8];
    device.depth_stencil_formats = vec![DepthFormat::D16, DepthFormat::D24S8, DepthFormat::D32];
    device.multisample = vec![
        MultisampleProfile::new(MultisampleType::None),
        MultisampleProfile::new(MultisampleType::Samples2),
        MultisampleProfile {
            quality_levels: 4,
            depth_conflicts: vec![DepthFormat::D32],
            ..MultisampleProfile::new(MultisampleType::Samples4)
        },
    ];
    device
}

/// A software rasterizer without T&L that only renders windowed 32-bit.
pub fn software_device() -> DeviceProfile {
    let mut device = DeviceProfile::new(DeviceType::Software);
    device.caps.presentation_intervals = PresentIntervalFlags::IMMEDIATE;
    device.adapter_formats = vec![Format::X8R8G8B8];
    device.windowed_back_buffers = vec![Format::X8R8G8B8];
    device.blendable_formats = vec![Format::X8R8G8B8];
    device.depth_stencil_formats = vec![DepthFormat::D16];
    device.multisample = vec![MultisampleProfile::new(MultisampleType::None)];
    device
}

pub fn adapter(ordinal: u32, description: &str, devices: Vec<DeviceProfile>) -> AdapterProfile {
    AdapterProfile {
        details: AdapterDetails {
            ordinal,
            description: description.to_string(),
            driver: "test.dll".to_string(),
            current_mode: DESKTOP,
        },
        display_modes: monitor_modes(),
        devices,
    }
}

pub fn single_adapter() -> HardwareProfile {
    HardwareProfile {
        adapters: vec![adapter(0, "Primary Adapter", vec![hal_device()])],
    }
}

pub fn dual_adapter() -> HardwareProfile {
    HardwareProfile {
        adapters: vec![
            adapter(0, "Primary Adapter", vec![hal_device(), software_device()]),
            adapter(1, "Secondary Adapter", vec![hal_device()]),
        ],
    }
}

/// A provider whose adapter list can be switched off between passes.
pub struct FlakyProvider {
    pub profile: HardwareProfile,
    pub available: Cell<bool>,
}

impl FlakyProvider {
    pub fn new(profile: HardwareProfile) -> Self {
        Self {
            profile,
            available: Cell::new(true),
        }
    }
}

impl CapabilityProvider for FlakyProvider {
    fn adapters(&self) -> Result<Vec<AdapterDetails>, ProviderError> {
        if self.available.get() {
            self.profile.adapters()
        } else {
            Err(ProviderError::BackendUnavailable(
                "device lost".to_string(),
            ))
        }
    }

    fn display_modes(&self, ordinal: u32, format: Format) -> Vec<DisplayMode> {
        self.profile.display_modes(ordinal, format)
    }

    fn device_caps(
        &self,
        ordinal: u32,
        device_type: DeviceType,
    ) -> Result<DeviceCaps, ProviderError> {
        self.profile.device_caps(ordinal, device_type)
    }

    fn check_device_type(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        windowed: bool,
    ) -> bool {
        self.profile.check_device_type(
            ordinal,
            device_type,
            adapter_format,
            back_buffer_format,
            windowed,
        )
    }

    fn check_device_format(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        usage: FormatUsage,
        format: SurfaceFormat,
    ) -> bool {
        self.profile
            .check_device_format(ordinal, device_type, adapter_format, usage, format)
    }

    fn check_depth_stencil_match(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        depth_format: DepthFormat,
    ) -> bool {
        self.profile.check_depth_stencil_match(
            ordinal,
            device_type,
            adapter_format,
            back_buffer_format,
            depth_format,
        )
    }

    fn check_multisample(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        format: SurfaceFormat,
        windowed: bool,
        kind: MultisampleType,
    ) -> Option<u32> {
        self.profile
            .check_multisample(ordinal, device_type, format, windowed, kind)
    }
}
