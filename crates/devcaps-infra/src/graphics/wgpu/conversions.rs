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

//! Mappings between devcaps formats and their `wgpu` counterparts.
//!
//! Only formats with an exact `wgpu` equivalent are mapped. Everything else
//! converts to `None` and is reported as unsupported.

use devcaps_core::{DepthFormat, DeviceType, Format, MultisampleType, SurfaceFormat};
use wgpu::{Backend, TextureFormat, TextureFormatFeatureFlags};

/// A local conversion trait, so foreign `wgpu` types can be targeted without
/// running into the orphan rules.
pub trait IntoWgpu<T> {
    /// Consumes self and converts it into a `wgpu` type.
    fn into_wgpu(self) -> T;
}

impl IntoWgpu<Option<TextureFormat>> for Format {
    fn into_wgpu(self) -> Option<TextureFormat> {
        match self {
            // 32-bit BGRA; the X variant simply ignores alpha.
            Format::A8R8G8B8 | Format::X8R8G8B8 => Some(TextureFormat::Bgra8Unorm),
            Format::A2R10G10B10 => Some(TextureFormat::Rgb10a2Unorm),
            _ => None,
        }
    }
}

impl IntoWgpu<Option<TextureFormat>> for DepthFormat {
    fn into_wgpu(self) -> Option<TextureFormat> {
        match self {
            DepthFormat::D16 => Some(TextureFormat::Depth16Unorm),
            DepthFormat::D24X8 => Some(TextureFormat::Depth24Plus),
            DepthFormat::D24S8 => Some(TextureFormat::Depth24PlusStencil8),
            DepthFormat::D32 => Some(TextureFormat::Depth32Float),
            _ => None,
        }
    }
}

impl IntoWgpu<Option<TextureFormat>> for SurfaceFormat {
    fn into_wgpu(self) -> Option<TextureFormat> {
        match self {
            SurfaceFormat::Color(format) => format.into_wgpu(),
            SurfaceFormat::Depth(format) => format.into_wgpu(),
        }
    }
}

/// The feature flag advertising a multisample level, for the levels `wgpu`
/// can express.
pub fn multisample_flag(kind: MultisampleType) -> Option<TextureFormatFeatureFlags> {
    match kind {
        MultisampleType::Samples2 => Some(TextureFormatFeatureFlags::MULTISAMPLE_X2),
        MultisampleType::Samples4 => Some(TextureFormatFeatureFlags::MULTISAMPLE_X4),
        MultisampleType::Samples8 => Some(TextureFormatFeatureFlags::MULTISAMPLE_X8),
        MultisampleType::Samples16 => Some(TextureFormatFeatureFlags::MULTISAMPLE_X16),
        _ => None,
    }
}

/// Software adapters rasterize on the CPU; everything else is hardware.
pub fn device_type_of(device_type: wgpu::DeviceType) -> DeviceType {
    match device_type {
        wgpu::DeviceType::Cpu => DeviceType::Software,
        _ => DeviceType::Hardware,
    }
}

/// Returns a human-readable name for a backend.
pub fn backend_name(backend: Backend) -> &'static str {
    match backend {
        Backend::Vulkan => "Vulkan",
        Backend::Metal => "Metal",
        Backend::Dx12 => "DirectX 12",
        Backend::Gl => "OpenGL",
        Backend::BrowserWebGpu => "WebGPU",
        Backend::Noop => "No-op",
    }
}
