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

//! Text rendering of catalogs and resolved settings.

use std::fmt;

use devcaps_core::{Catalog, DeviceSettings, DeviceSettingsCombo};

fn join<T: fmt::Debug>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| format!("{item:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn combo_line(combo: &DeviceSettingsCombo) -> String {
    let multisample = combo
        .multisample_options
        .iter()
        .map(|o| format!("{:?}({})", o.kind, o.max_quality))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} / {} {} | depth: {} | msaa: {} | present: {}",
        combo.adapter_format,
        combo.back_buffer_format,
        if combo.windowed { "windowed" } else { "fullscreen" },
        join(&combo.depth_stencil_formats),
        multisample,
        join(&combo.present_intervals),
    )
}

/// Displays every adapter, device and combo of a catalog.
pub struct CatalogReport<'a>(pub &'a Catalog);

impl fmt::Display for CatalogReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let catalog = self.0;
        if catalog.is_empty() {
            return writeln!(f, "No usable adapter found.");
        }

        for adapter in catalog.adapters() {
            writeln!(
                f,
                "Adapter {}: {}",
                adapter.ordinal(),
                adapter.unique_description
            )?;
            if !adapter.details.driver.is_empty() {
                writeln!(f, "  Driver: {}", adapter.details.driver)?;
            }
            writeln!(f, "  Desktop: {}", adapter.desktop_mode())?;
            writeln!(f, "  Display modes: {}", adapter.display_modes.len())?;
            for device in &adapter.devices {
                writeln!(
                    f,
                    "  {} ({} combos, vertex processing: {})",
                    device.device_type.name(),
                    device.combos.len(),
                    join(&device.vertex_processing)
                )?;
                for combo in &device.combos {
                    writeln!(f, "    {}", combo_line(combo))?;
                    for conflict in &combo.depth_stencil_conflicts {
                        writeln!(
                            f,
                            "      conflict: {:?} with {:?}",
                            conflict.depth_format, conflict.multisample
                        )?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Displays resolved settings, one field per line.
pub struct SettingsReport<'a>(pub &'a DeviceSettings);

impl fmt::Display for SettingsReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let settings = self.0;
        writeln!(
            f,
            "Adapter {} {}",
            settings.adapter_ordinal,
            settings.device_type.name()
        )?;
        write!(
            f,
            "  Mode: {}x{} {} ",
            settings.back_buffer_width, settings.back_buffer_height, settings.back_buffer_format,
        )?;
        if settings.windowed {
            writeln!(f, "(windowed)")?;
        } else {
            writeln!(f, "(fullscreen @ {}Hz)", settings.fullscreen_refresh_rate)?;
        }
        writeln!(f, "  Adapter format: {}", settings.adapter_format)?;
        writeln!(f, "  Back buffers: {}", settings.back_buffer_count)?;
        writeln!(f, "  Vertex processing: {:?}", settings.vertex_processing)?;
        writeln!(
            f,
            "  Multisample: {:?} (quality {})",
            settings.multisample, settings.multisample_quality
        )?;
        if settings.enable_auto_depth_stencil {
            writeln!(f, "  Depth/stencil: {:?}", settings.auto_depth_stencil_format)?;
        } else {
            writeln!(f, "  Depth/stencil: none")?;
        }
        writeln!(f, "  Present interval: {:?}", settings.present_interval)
    }
}

/// Renders every adapter, device and combo of a catalog.
pub fn catalog_text(catalog: &Catalog) -> String {
    CatalogReport(catalog).to_string()
}

/// Renders resolved settings, one field per line.
pub fn settings_text(settings: &DeviceSettings) -> String {
    SettingsReport(settings).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_text() {
        assert_eq!(
            catalog_text(&Catalog::default()),
            "No usable adapter found.\n"
        );
    }

    #[test]
    fn test_settings_text() {
        let text = settings_text(&DeviceSettings::default());
        assert!(text.starts_with("Adapter 0 HAL\n"));
        assert!(text.contains("640x480 X8R8G8B8 (windowed)"));
        assert!(text.contains("Depth/stencil: D16"));
    }

    #[test]
    fn test_fullscreen_settings_text() {
        let settings = DeviceSettings {
            windowed: false,
            fullscreen_refresh_rate: 75,
            enable_auto_depth_stencil: false,
            ..DeviceSettings::default()
        };
        let text = settings_text(&settings);
        assert!(text.contains("640x480 X8R8G8B8 (fullscreen @ 75Hz)\n"));
        assert!(text.contains("Depth/stencil: none\n"));
        assert!(text.ends_with("Present interval: Immediate\n"));
    }
}
