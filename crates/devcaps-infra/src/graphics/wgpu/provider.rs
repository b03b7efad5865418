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

//! [`CapabilityProvider`] over the adapters a `wgpu` instance exposes.
//!
//! `wgpu` has no adapter-wide enumeration that works on every platform, so
//! adapters are discovered by requesting a high-performance, a low-power and
//! a fallback adapter and keeping the distinct ones. Each adapter offers a
//! single device type. Format checks come from the adapter's texture format
//! features. Display modes are not visible through `wgpu` and must be
//! supplied with [`WgpuCapabilityProvider::with_display_modes`].

use anyhow::{anyhow, Result};
use wgpu::{
    Adapter, Instance, PowerPreference, RequestAdapterOptions, TextureFormat,
    TextureFormatFeatureFlags, TextureUsages,
};

use devcaps_core::present::PresentIntervalFlags;
use devcaps_core::{
    AdapterDetails, CapabilityProvider, DepthFormat, DeviceCaps, DeviceType, DisplayMode, Format,
    FormatUsage, MultisampleType, ProviderError, SurfaceFormat,
};

use super::conversions::{backend_name, device_type_of, multisample_flag, IntoWgpu};

/// Adapter requests tried during discovery: (power preference, force fallback).
const ADAPTER_REQUESTS: [(PowerPreference, bool); 3] = [
    (PowerPreference::HighPerformance, false),
    (PowerPreference::LowPower, false),
    (PowerPreference::None, true),
];

struct DiscoveredAdapter {
    adapter: Adapter,
    details: AdapterDetails,
    device_type: DeviceType,
}

/// Answers capability queries from `wgpu` adapters.
pub struct WgpuCapabilityProvider {
    adapters: Vec<DiscoveredAdapter>,
    display_modes: Vec<DisplayMode>,
}

impl WgpuCapabilityProvider {
    /// Creates an instance with the default backends and discovers its adapters.
    pub fn new() -> Self {
        let instance = Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());
        Self::from_instance(&instance)
    }

    /// Discovers the adapters of an existing instance.
    pub fn from_instance(instance: &Instance) -> Self {
        let mut adapters: Vec<DiscoveredAdapter> = Vec::new();
        for (power_preference, force_fallback_adapter) in ADAPTER_REQUESTS {
            let adapter = match request_adapter(instance, power_preference, force_fallback_adapter)
            {
                Ok(adapter) => adapter,
                Err(err) => {
                    log::debug!("{err}");
                    continue;
                }
            };

            let info = adapter.get_info();
            let duplicate = adapters.iter().any(|known| {
                let known = known.adapter.get_info();
                known.name == info.name
                    && known.vendor == info.vendor
                    && known.device == info.device
                    && known.backend == info.backend
            });
            if duplicate {
                continue;
            }

            let ordinal = adapters.len() as u32;
            log::info!(
                "Discovered adapter {ordinal}: \"{}\" ({}, {:?})",
                info.name,
                backend_name(info.backend),
                info.device_type
            );
            adapters.push(DiscoveredAdapter {
                details: AdapterDetails {
                    ordinal,
                    description: format!("{} ({})", info.name, backend_name(info.backend)),
                    driver: info.driver.clone(),
                    current_mode: DisplayMode::new(0, 0, Format::X8R8G8B8, 0),
                },
                device_type: device_type_of(info.device_type),
                adapter,
            });
        }

        Self {
            adapters,
            display_modes: Vec::new(),
        }
    }

    /// Sets the display modes and desktop mode reported for every adapter.
    pub fn with_display_modes(mut self, modes: Vec<DisplayMode>, current: DisplayMode) -> Self {
        for adapter in &mut self.adapters {
            adapter.details.current_mode = current;
        }
        self.display_modes = modes;
        self
    }

    /// Number of distinct adapters discovered.
    pub fn adapter_count(&self) -> usize {
        self.adapters.len()
    }

    fn adapter(&self, ordinal: u32) -> Option<&DiscoveredAdapter> {
        self.adapters.get(ordinal as usize)
    }

    /// The adapter, if it exists and offers `device_type`.
    fn device(&self, ordinal: u32, device_type: DeviceType) -> Option<&Adapter> {
        self.adapter(ordinal)
            .filter(|a| a.device_type == device_type)
            .map(|a| &a.adapter)
    }
}

impl Default for WgpuCapabilityProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn request_adapter(
    instance: &Instance,
    power_preference: PowerPreference,
    force_fallback_adapter: bool,
) -> Result<Adapter> {
    pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
        power_preference,
        compatible_surface: None,
        force_fallback_adapter,
    }))
    .map_err(|e| {
        anyhow!(
            "No adapter for {:?} (fallback: {}): {}",
            power_preference,
            force_fallback_adapter,
            e
        )
    })
}

fn features_have(adapter: &Adapter, format: TextureFormat, flag: TextureFormatFeatureFlags) -> bool {
    adapter.get_texture_format_features(format).flags.contains(flag)
}

fn is_renderable(adapter: &Adapter, format: TextureFormat) -> bool {
    adapter
        .get_texture_format_features(format)
        .allowed_usages
        .contains(TextureUsages::RENDER_ATTACHMENT)
}

impl CapabilityProvider for WgpuCapabilityProvider {
    fn adapters(&self) -> Result<Vec<AdapterDetails>, ProviderError> {
        if self.adapters.is_empty() {
            return Err(ProviderError::BackendUnavailable(
                "wgpu reported no adapter".to_string(),
            ));
        }
        Ok(self.adapters.iter().map(|a| a.details.clone()).collect())
    }

    fn display_modes(&self, ordinal: u32, format: Format) -> Vec<DisplayMode> {
        if self.adapter(ordinal).is_none() {
            return Vec::new();
        }
        self.display_modes
            .iter()
            .copied()
            .filter(|m| m.format == format)
            .collect()
    }

    fn device_caps(
        &self,
        ordinal: u32,
        device_type: DeviceType,
    ) -> Result<DeviceCaps, ProviderError> {
        let adapter = self
            .adapter(ordinal)
            .ok_or(ProviderError::UnknownAdapter(ordinal))?;
        if adapter.device_type != device_type {
            return Err(ProviderError::DeviceUnavailable {
                ordinal,
                device_type,
            });
        }
        // Fifo is guaranteed; Immediate is assumed since no surface is known yet.
        Ok(DeviceCaps {
            presentation_intervals: PresentIntervalFlags::IMMEDIATE | PresentIntervalFlags::ONE,
            hardware_transform_and_light: device_type == DeviceType::Hardware,
            pure_device: false,
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
        let Some(adapter) = self.device(ordinal, device_type) else {
            return false;
        };
        let adapter_texture: Option<TextureFormat> = adapter_format.into_wgpu();
        let back_buffer: Option<TextureFormat> = back_buffer_format.into_wgpu();
        let (Some(_), Some(back_buffer)) = (adapter_texture, back_buffer) else {
            return false;
        };
        // A fullscreen swap chain scans out the back buffer directly.
        if !windowed
            && adapter_format.color_channel_bits() != back_buffer_format.color_channel_bits()
        {
            return false;
        }
        is_renderable(adapter, back_buffer)
    }

    fn check_device_format(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        adapter_format: Format,
        usage: FormatUsage,
        format: SurfaceFormat,
    ) -> bool {
        let Some(adapter) = self.device(ordinal, device_type) else {
            return false;
        };
        let adapter_format: Option<TextureFormat> = adapter_format.into_wgpu();
        let format: Option<TextureFormat> = format.into_wgpu();
        let (Some(_), Some(texture_format)) = (adapter_format, format) else {
            return false;
        };
        match usage {
            FormatUsage::PostPixelShaderBlending => features_have(
                adapter,
                texture_format,
                TextureFormatFeatureFlags::BLENDABLE,
            ),
            FormatUsage::DepthStencil => {
                texture_format.is_depth_stencil_format() && is_renderable(adapter, texture_format)
            }
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
        // wgpu pairs any color attachment with any depth attachment of the
        // same size, so both formats only need to exist.
        let color: Option<TextureFormat> = back_buffer_format.into_wgpu();
        let depth: Option<TextureFormat> = depth_format.into_wgpu();
        self.device(ordinal, device_type).is_some() && color.is_some() && depth.is_some()
    }

    fn check_multisample(
        &self,
        ordinal: u32,
        device_type: DeviceType,
        format: SurfaceFormat,
        _windowed: bool,
        kind: MultisampleType,
    ) -> Option<u32> {
        let adapter = self.device(ordinal, device_type)?;
        let texture_format: Option<TextureFormat> = format.into_wgpu();
        let texture_format = texture_format?;
        if kind == MultisampleType::None {
            return Some(1);
        }
        let flag = multisample_flag(kind)?;
        features_have(adapter, texture_format, flag).then_some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> WgpuCapabilityProvider {
        WgpuCapabilityProvider {
            adapters: Vec::new(),
            display_modes: Vec::new(),
        }
    }

    #[test]
    fn test_no_adapter_means_backend_unavailable() {
        let provider = empty();
        assert!(matches!(
            provider.adapters(),
            Err(ProviderError::BackendUnavailable(_))
        ));
        assert_eq!(provider.adapter_count(), 0);
    }

    #[test]
    fn test_unknown_adapter_answers_unsupported() {
        let provider = empty().with_display_modes(
            vec![DisplayMode::new(800, 600, Format::X8R8G8B8, 60)],
            DisplayMode::new(800, 600, Format::X8R8G8B8, 60),
        );
        assert!(provider.display_modes(0, Format::X8R8G8B8).is_empty());
        assert_eq!(
            provider.device_caps(0, DeviceType::Hardware),
            Err(ProviderError::UnknownAdapter(0))
        );
        assert!(!provider.check_device_type(
            0,
            DeviceType::Hardware,
            Format::X8R8G8B8,
            Format::X8R8G8B8,
            true
        ));
        assert_eq!(
            provider.check_multisample(
                0,
                DeviceType::Hardware,
                SurfaceFormat::Color(Format::X8R8G8B8),
                true,
                MultisampleType::None
            ),
            None
        );
    }
}
