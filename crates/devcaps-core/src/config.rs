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

//! Enumeration settings.

use serde::{Deserialize, Serialize};

use crate::device::{DeviceCaps, VertexProcessing};
use crate::format::{DepthFormat, DEFAULT_DEPTH_STENCIL_FORMATS};
use crate::multisample::{MultisampleType, DEFAULT_MULTISAMPLE_TYPES};
use crate::present::{PresentInterval, DEFAULT_PRESENT_INTERVALS};

/// The highest multisample quality ceiling that can be configured.
pub const MULTISAMPLE_QUALITY_LIMIT: u32 = 0xffff;

/// Candidate lists, filters and flags consulted by an enumeration pass.
///
/// Changes only take effect on the next call to
/// [`crate::DeviceEnumerator::enumerate`]; an existing catalog is never
/// re-filtered. Every field may be omitted when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationConfig {
    /// Depth/stencil formats probed for every combo, in output order.
    pub depth_stencil_candidates: Vec<DepthFormat>,
    /// Multisample levels probed for every combo, in output order.
    pub multisample_candidates: Vec<MultisampleType>,
    /// Present intervals probed for every combo, in output order.
    pub present_interval_candidates: Vec<PresentInterval>,
    /// Reject back buffers that cannot be blended into after the pixel shader.
    pub require_post_pixel_shader_blending: bool,
    /// Software vertex processing may be offered to the user.
    pub software_vertex_processing: bool,
    /// Hardware vertex processing may be offered to the user.
    pub hardware_vertex_processing: bool,
    /// Pure hardware vertex processing may be offered to the user.
    pub pure_hardware_vertex_processing: bool,
    /// Mixed vertex processing may be offered to the user.
    pub mixed_vertex_processing: bool,
    /// Smallest accepted display mode width.
    pub min_width: u32,
    /// Largest accepted display mode width.
    pub max_width: u32,
    /// Smallest accepted display mode height.
    pub min_height: u32,
    /// Largest accepted display mode height.
    pub max_height: u32,
    /// Lowest accepted refresh rate.
    pub min_refresh: u32,
    /// Highest accepted refresh rate.
    pub max_refresh: u32,
    /// Ceiling applied to reported multisample quality levels.
    pub multisample_quality_max: u32,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self {
            depth_stencil_candidates: DEFAULT_DEPTH_STENCIL_FORMATS.to_vec(),
            multisample_candidates: DEFAULT_MULTISAMPLE_TYPES.to_vec(),
            present_interval_candidates: DEFAULT_PRESENT_INTERVALS.to_vec(),
            require_post_pixel_shader_blending: true,
            software_vertex_processing: true,
            hardware_vertex_processing: true,
            pure_hardware_vertex_processing: true,
            mixed_vertex_processing: false,
            min_width: 0,
            max_width: u32::MAX,
            min_height: 0,
            max_height: u32::MAX,
            min_refresh: 0,
            max_refresh: u32::MAX,
            multisample_quality_max: MULTISAMPLE_QUALITY_LIMIT,
        }
    }
}

impl EnumerationConfig {
    /// Sets the accepted resolution range, bounds inclusive.
    pub fn set_resolution_bounds(
        &mut self,
        min_width: u32,
        min_height: u32,
        max_width: u32,
        max_height: u32,
    ) {
        self.min_width = min_width;
        self.min_height = min_height;
        self.max_width = max_width;
        self.max_height = max_height;
    }

    /// Sets the accepted refresh-rate range, bounds inclusive.
    pub fn set_refresh_bounds(&mut self, min_refresh: u32, max_refresh: u32) {
        self.min_refresh = min_refresh;
        self.max_refresh = max_refresh;
    }

    /// Sets the multisample quality ceiling, clamped to
    /// [`MULTISAMPLE_QUALITY_LIMIT`].
    pub fn set_multisample_quality_max(&mut self, quality: u32) {
        self.multisample_quality_max = quality.min(MULTISAMPLE_QUALITY_LIMIT);
    }

    /// Restores the default depth/stencil candidates.
    pub fn reset_depth_stencil_candidates(&mut self) {
        self.depth_stencil_candidates = DEFAULT_DEPTH_STENCIL_FORMATS.to_vec();
    }

    /// Restores the default multisample candidates.
    pub fn reset_multisample_candidates(&mut self) {
        self.multisample_candidates = DEFAULT_MULTISAMPLE_TYPES.to_vec();
    }

    /// Restores the default present-interval candidates.
    pub fn reset_present_interval_candidates(&mut self) {
        self.present_interval_candidates = DEFAULT_PRESENT_INTERVALS.to_vec();
    }

    /// Whether a display mode's size and refresh rate fall inside the bounds.
    pub(crate) fn accepts_mode(&self, width: u32, height: u32, refresh_rate: u32) -> bool {
        (self.min_width..=self.max_width).contains(&width)
            && (self.min_height..=self.max_height).contains(&height)
            && (self.min_refresh..=self.max_refresh).contains(&refresh_rate)
    }

    /// Vertex processing modes the configuration allows and the device caps
    /// can run, most capable first.
    pub fn vertex_processing_options(&self, caps: &DeviceCaps) -> Vec<VertexProcessing> {
        let tnl = caps.hardware_transform_and_light;
        [
            (
                VertexProcessing::PureHardware,
                self.pure_hardware_vertex_processing && tnl && caps.pure_device,
            ),
            (
                VertexProcessing::Hardware,
                self.hardware_vertex_processing && tnl,
            ),
            (VertexProcessing::Software, self.software_vertex_processing),
            (VertexProcessing::Mixed, self.mixed_vertex_processing && tnl),
        ]
        .into_iter()
        .filter_map(|(mode, allowed)| allowed.then_some(mode))
        .collect()
    }

    /// The exclusive ceiling stored for a reported quality count.
    pub(crate) fn clamp_quality(&self, quality_levels: u32) -> u32 {
        quality_levels.min(self.multisample_quality_max.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EnumerationConfig::default();
        assert_eq!(config.depth_stencil_candidates.len(), 6);
        assert_eq!(config.multisample_candidates.len(), 17);
        assert_eq!(config.present_interval_candidates.len(), 6);
        assert!(config.require_post_pixel_shader_blending);
        assert!(!config.mixed_vertex_processing);
        assert_eq!(config.multisample_quality_max, 0xffff);
        assert!(config.accepts_mode(1, 1, 0));
    }

    #[test]
    fn test_vertex_processing_follows_caps() {
        let config = EnumerationConfig::default();
        let software_only = DeviceCaps::default();
        assert_eq!(
            config.vertex_processing_options(&software_only),
            vec![VertexProcessing::Software]
        );

        let pure = DeviceCaps {
            hardware_transform_and_light: true,
            pure_device: true,
            ..DeviceCaps::default()
        };
        assert_eq!(
            config.vertex_processing_options(&pure),
            vec![
                VertexProcessing::PureHardware,
                VertexProcessing::Hardware,
                VertexProcessing::Software
            ]
        );
    }

    #[test]
    fn test_resolution_bounds_set_every_field() {
        let mut config = EnumerationConfig::default();
        config.set_resolution_bounds(640, 480, 1600, 1200);
        assert_eq!(
            (
                config.min_width,
                config.min_height,
                config.max_width,
                config.max_height
            ),
            (640, 480, 1600, 1200)
        );
        assert!(config.accepts_mode(800, 600, 60));
        assert!(!config.accepts_mode(1920, 1080, 60));
        assert!(!config.accepts_mode(640, 400, 60));
    }

    #[test]
    fn test_quality_ceiling_is_clamped() {
        let mut config = EnumerationConfig::default();
        config.set_multisample_quality_max(1_000_000);
        assert_eq!(config.multisample_quality_max, MULTISAMPLE_QUALITY_LIMIT);

        config.set_multisample_quality_max(2);
        assert_eq!(config.clamp_quality(8), 3);
        assert_eq!(config.clamp_quality(1), 1);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: EnumerationConfig = toml::from_str(
            r#"
            require_post_pixel_shader_blending = false
            min_width = 640
            depth_stencil_candidates = ["D24S8", "D16"]
            "#,
        )
        .unwrap();
        assert!(!config.require_post_pixel_shader_blending);
        assert_eq!(config.min_width, 640);
        assert_eq!(config.max_width, u32::MAX);
        assert_eq!(
            config.depth_stencil_candidates,
            vec![DepthFormat::D24S8, DepthFormat::D16]
        );
        assert_eq!(config.multisample_candidates.len(), 17);
    }
}
