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

//! Device types and the capability bundle reported for each of them.

use serde::{Deserialize, Serialize};

use crate::present::PresentIntervalFlags;

/// A renderer backend available on an adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DeviceType {
    /// Hardware rasterization.
    Hardware,
    /// A pluggable software rasterizer.
    Software,
    /// The reference rasterizer, used for validation.
    Reference,
}

impl DeviceType {
    /// Short name used in listings.
    pub fn name(self) -> &'static str {
        match self {
            DeviceType::Hardware => "HAL",
            DeviceType::Software => "SW",
            DeviceType::Reference => "REF",
        }
    }
}

/// Device types probed on every adapter, in catalog order.
pub const DEVICE_TYPES: [DeviceType; 3] = [
    DeviceType::Hardware,
    DeviceType::Software,
    DeviceType::Reference,
];

/// Capabilities of one device type on one adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceCaps {
    /// Present intervals the device can honor.
    pub presentation_intervals: PresentIntervalFlags,
    /// The device transforms and lights vertices in hardware.
    pub hardware_transform_and_light: bool,
    /// The device can be created as a pure device.
    pub pure_device: bool,
}

/// How a device processes vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VertexProcessing {
    /// Vertices are processed on the CPU.
    Software,
    /// Vertices are processed by the GPU.
    #[default]
    Hardware,
    /// Hardware processing on a pure device.
    PureHardware,
    /// Per-draw switchable between hardware and software.
    Mixed,
}

impl VertexProcessing {
    /// Whether this mode needs hardware transform and lighting.
    pub fn needs_hardware_transform(self) -> bool {
        !matches!(self, VertexProcessing::Software)
    }
}
