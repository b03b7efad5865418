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

//! The boundary between the enumerator and the native graphics layer.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceCaps, DeviceType};
use crate::error::ProviderError;
use crate::format::{DepthFormat, Format, FormatUsage, SurfaceFormat};
use crate::mode::DisplayMode;
use crate::multisample::MultisampleType;

/// Identity of an adapter as reported by the native layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterDetails {
    /// Unique, non-negative adapter index.
    pub ordinal: u32,
    /// Human-readable adapter description (e.g. "NVIDIA GeForce 6800").
    pub description: String,
    /// Driver or output device name.
    #[serde(default)]
    pub driver: String,
    /// The desktop display mode the adapter is currently running.
    pub current_mode: DisplayMode,
}

/// A source of adapter information and capability answers.
///
/// The enumerator only ever talks to the hardware through this trait, so an
/// implementation may wrap a live graphics API, replay a recorded profile, or
/// answer from a test table. Boolean checks answer "supported or not"; any
/// failure to answer means "not supported".
pub trait CapabilityProvider {
    /// Lists the adapters on the system.
    ///
    /// An error here means the graphics layer itself is unavailable, which is
    /// the one condition that aborts enumeration.
    fn adapters(&self) -> Result<Vec<AdapterDetails>, ProviderError>;

    /// Lists the display modes of `format` an adapter supports, in any order.
    fn display_modes(&self, ordinal: u32, format: Format) -> Vec<DisplayMode>;

    /// Queries the capability bundle of a device type on an adapter.
    fn device_caps(&self, ordinal: u32, device_type: DeviceType)
        -> Result<DeviceCaps, ProviderError>;

    /// Checks whether the device can run with this adapter format and back
    /// buffer, windowed or fullscreen.
    fn check_device_type(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        windowed: bool,
    ) -> bool;

    /// Checks whether `format` supports `usage` on the device while the adapter
    /// runs in `adapter_format`.
    fn check_device_format(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        usage: FormatUsage,
        format: SurfaceFormat,
    ) -> bool;

    /// Checks whether a depth/stencil format can be paired with a back buffer.
    fn check_depth_stencil_match(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        depth_format: DepthFormat,
    ) -> bool;

    /// Checks multisample support for a surface format.
    ///
    /// Returns the number of quality levels when supported.
    fn check_multisample(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        format: SurfaceFormat,
        windowed: bool,
        kind: MultisampleType,
    ) -> Option<u32>;
}

impl<P: CapabilityProvider + ?Sized> CapabilityProvider for &P {
    fn adapters(&self) -> Result<Vec<AdapterDetails>, ProviderError> {
        (**self).adapters()
    }

    fn display_modes(&self, ordinal: u32, format: Format) -> Vec<DisplayMode> {
        (**self).display_modes(ordinal, format)
    }

    fn device_caps(
        &self,
        ordinal: u32,
        device_type: DeviceType,
    ) -> Result<DeviceCaps, ProviderError> {
        (**self).device_caps(ordinal, device_type)
    }

    fn check_device_type(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        windowed: bool,
    ) -> bool {
        (**self).check_device_type(
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
        (**self).check_device_format(ordinal, device_type, adapter_format, usage, format)
    }

    fn check_depth_stencil_match(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        back_buffer_format: Format,
        depth_format: DepthFormat,
    ) -> bool {
        (**self).check_depth_stencil_match(
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
        (**self).check_multisample(ordinal, device_type, format, windowed, kind)
    }
}
