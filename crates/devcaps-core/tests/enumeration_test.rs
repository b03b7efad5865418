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

mod common;

use common::{adapter, hal_device, single_adapter, software_device, FlakyProvider, DESKTOP};
use devcaps_core::profile::MultisampleProfile;
use devcaps_core::{
    Acceptability, DepthFormat, DepthStencilConflict, DeviceCaps, DeviceEnumerator, DeviceType,
    DisplayMode, EnumerationError, Format, HardwareProfile, MultisampleType, PresentInterval,
    PresentIntervalFlags, VertexProcessing,
};

fn enumerated(profile: HardwareProfile) -> DeviceEnumerator<HardwareProfile> {
    let mut enumerator = DeviceEnumerator::new(profile);
    enumerator
        .enumerate(None)
        .expect("Enumerating a profile should succeed");
    enumerator
}

#[test]
fn test_enumeration_is_deterministic() {
    let first = enumerated(single_adapter());
    let second = enumerated(single_adapter());
    assert_eq!(
        *first.catalog(),
        *second.catalog(),
        "Two passes over the same provider must build the same catalog"
    );
}

#[test]
fn test_display_modes_are_filtered_and_sorted() {
    let enumerator = enumerated(single_adapter());
    let adapter = enumerator.adapter(0).expect("Adapter 0 should be retained");

    // The A8R8G8B8 mode is not an adapter format and is never collected.
    assert_eq!(adapter.display_modes.len(), 7);
    assert!(adapter
        .display_modes
        .windows(2)
        .all(|pair| pair[0] <= pair[1]));
    assert_eq!(
        adapter.display_modes[0],
        DisplayMode::new(640, 480, Format::X8R8G8B8, 60)
    );
    assert_eq!(
        adapter.display_modes[3],
        DisplayMode::new(800, 600, Format::R5G6B5, 60),
        "Format breaks ties after width and height"
    );
}

#[test]
fn test_combos_follow_format_order() {
    let enumerator = enumerated(single_adapter());
    let device = enumerator
        .device(0, DeviceType::Hardware)
        .expect("The hardware device should be retained");

    let keys: Vec<(Format, Format, bool)> = device
        .combos
        .iter()
        .map(|c| (c.adapter_format, c.back_buffer_format, c.windowed))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Format::X8R8G8B8, Format::A8R8G8B8, true),
            (Format::X8R8G8B8, Format::X8R8G8B8, false),
            (Format::X8R8G8B8, Format::X8R8G8B8, true),
            (Format::R5G6B5, Format::A8R8G8B8, true),
            (Format::R5G6B5, Format::X8R8G8B8, false),
            (Format::R5G6B5, Format::X8R8G8B8, true),
        ]
    );
    assert_eq!(
        device.vertex_processing,
        vec![
            VertexProcessing::PureHardware,
            VertexProcessing::Hardware,
            VertexProcessing::Software
        ]
    );
    assert!(
        enumerator.device(0, DeviceType::Reference).is_none(),
        "A device type whose caps query fails is skipped"
    );
}

#[test]
fn test_combo_lists_are_built() {
    let enumerator = enumerated(single_adapter());
    let combo = enumerator
        .combo(0, DeviceType::Hardware, Format::X8R8G8B8, Format::X8R8G8B8, false)
        .expect("Fullscreen X8R8G8B8 combo should exist");

    assert_eq!(
        combo.depth_stencil_formats,
        vec![DepthFormat::D16, DepthFormat::D24S8, DepthFormat::D32]
    );
    let kinds: Vec<_> = combo.multisample_options.iter().map(|o| o.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MultisampleType::None,
            MultisampleType::Samples2,
            MultisampleType::Samples4
        ]
    );
    assert_eq!(combo.multisample_options[2].max_quality, 4);
    assert_eq!(
        combo.depth_stencil_conflicts,
        vec![DepthStencilConflict {
            depth_format: DepthFormat::D32,
            multisample: MultisampleType::Samples4,
        }]
    );
    assert!(combo.is_conflict(DepthFormat::D32, MultisampleType::Samples4));
    assert_eq!(
        combo.present_intervals,
        vec![
            PresentInterval::Immediate,
            PresentInterval::Default,
            PresentInterval::One,
            PresentInterval::Two
        ]
    );
}

#[test]
fn test_combo_without_multisample_is_discarded() {
    let mut device = hal_device();
    device.multisample = vec![MultisampleProfile {
        formats: vec![Format::X8R8G8B8],
        ..MultisampleProfile::new(MultisampleType::Samples4)
    }];
    let enumerator = enumerated(HardwareProfile {
        adapters: vec![adapter(0, "Primary Adapter", vec![device])],
    });

    assert!(enumerator
        .combo(0, DeviceType::Hardware, Format::X8R8G8B8, Format::A8R8G8B8, true)
        .is_none());
    let device = enumerator.device(0, DeviceType::Hardware).unwrap();
    assert_eq!(device.combos.len(), 4);
    assert!(device
        .combos
        .iter()
        .all(|c| !c.multisample_options.is_empty()));
}

#[test]
fn test_windowed_combos_never_wait_multiple_retraces() {
    let mut device = hal_device();
    device.caps.presentation_intervals = PresentIntervalFlags::ALL;
    let enumerator = enumerated(HardwareProfile {
        adapters: vec![adapter(0, "Primary Adapter", vec![device])],
    });

    for (_, _, combo) in enumerator.catalog().combos() {
        if combo.windowed {
            assert_eq!(
                combo.present_intervals,
                vec![
                    PresentInterval::Immediate,
                    PresentInterval::Default,
                    PresentInterval::One
                ]
            );
        } else {
            assert_eq!(combo.present_intervals.len(), 6);
        }
    }
}

#[test]
fn test_duplicate_descriptions_get_ordinals() {
    let enumerator = enumerated(HardwareProfile {
        adapters: vec![
            adapter(0, "Generic Display Adapter", vec![hal_device()]),
            adapter(1, "GENERIC display adapter", vec![hal_device()]),
        ],
    });
    let catalog = enumerator.catalog();
    let names: Vec<&str> = catalog
        .adapters()
        .iter()
        .map(|a| a.unique_description.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Generic Display Adapter (#0)", "GENERIC display adapter (#1)"]
    );
}

#[test]
fn test_distinct_descriptions_are_unchanged() {
    let enumerator = enumerated(common::dual_adapter());
    let catalog = enumerator.catalog();
    let names: Vec<&str> = catalog
        .adapters()
        .iter()
        .map(|a| a.unique_description.as_str())
        .collect();
    assert_eq!(names, vec!["Primary Adapter", "Secondary Adapter"]);
}

#[test]
fn test_predicate_filters_combos() {
    let mut enumerator = DeviceEnumerator::new(single_adapter());

    let reject_all = |_: &DeviceCaps, _: Format, _: Format, _: bool| false;
    let accept: Acceptability<'_> = &reject_all;
    enumerator.enumerate(Some(accept)).unwrap();
    assert!(
        enumerator.catalog().is_empty(),
        "Rejecting every combo leaves no device and no adapter"
    );

    let windowed_only = |_: &DeviceCaps, _: Format, _: Format, windowed: bool| windowed;
    let accept: Acceptability<'_> = &windowed_only;
    enumerator.enumerate(Some(accept)).unwrap();
    let catalog = enumerator.catalog();
    assert!(!catalog.is_empty());
    assert!(catalog.combos().all(|(_, _, combo)| combo.windowed));
}

#[test]
fn test_lookups_match_every_key_field() {
    let enumerator = enumerated(common::dual_adapter());

    let combo = enumerator
        .combo(1, DeviceType::Hardware, Format::R5G6B5, Format::X8R8G8B8, false)
        .unwrap();
    assert_eq!(combo.ordinal, 1);
    assert_eq!(combo.device_type, DeviceType::Hardware);
    assert_eq!(combo.adapter_format, Format::R5G6B5);
    assert_eq!(combo.back_buffer_format, Format::X8R8G8B8);
    assert!(!combo.windowed);
    assert_eq!(
        enumerator.catalog().combo_by_key(&combo.key()),
        Some(combo)
    );

    assert!(
        enumerator
            .combo(1, DeviceType::Hardware, Format::X1R5G5B5, Format::X8R8G8B8, false)
            .is_none(),
        "Only the adapter format differs and X1R5G5B5 is never an adapter format"
    );
    assert!(
        enumerator
            .combo(1, DeviceType::Hardware, Format::R5G6B5, Format::R5G6B5, false)
            .is_none(),
        "Only the back buffer differs and R5G6B5 cannot blend"
    );
    assert!(enumerator
        .combo(1, DeviceType::Software, Format::X8R8G8B8, Format::X8R8G8B8, true)
        .is_none());
    assert!(enumerator
        .combo(0, DeviceType::Software, Format::X8R8G8B8, Format::X8R8G8B8, false)
        .is_none());
    assert!(enumerator
        .combo(0, DeviceType::Software, Format::X8R8G8B8, Format::X8R8G8B8, true)
        .is_some());
    assert!(enumerator.adapter(2).is_none());
}

#[test]
fn test_backend_loss_clears_catalog() {
    let mut enumerator = DeviceEnumerator::new(FlakyProvider::new(single_adapter()));
    enumerator.enumerate(None).unwrap();
    let snapshot = enumerator.catalog();
    assert!(!snapshot.is_empty());

    enumerator.provider().available.set(false);
    let result = enumerator.enumerate(None);

    assert!(matches!(
        result,
        Err(EnumerationError::BackendUnavailable(_))
    ));
    assert!(enumerator.catalog().is_empty());
    assert!(
        !snapshot.is_empty(),
        "Earlier snapshots are not affected by a later pass"
    );
}

#[test]
fn test_multisample_quality_is_clamped() {
    let mut enumerator = DeviceEnumerator::new(single_adapter());
    enumerator.config_mut().set_multisample_quality_max(1);
    enumerator.enumerate(None).unwrap();

    let combo = enumerator
        .combo(0, DeviceType::Hardware, Format::X8R8G8B8, Format::X8R8G8B8, true)
        .unwrap();
    let samples4 = combo
        .multisample_options
        .iter()
        .find(|o| o.kind == MultisampleType::Samples4)
        .unwrap();
    assert_eq!(samples4.max_quality, 2);
    assert_eq!(combo.multisample_options[0].max_quality, 1);
}

#[test]
fn test_blending_requirement_can_be_disabled() {
    let strict = enumerated(single_adapter());
    assert!(strict
        .combo(0, DeviceType::Hardware, Format::X8R8G8B8, Format::R5G6B5, true)
        .is_none());

    let mut relaxed = DeviceEnumerator::new(single_adapter());
    relaxed.config_mut().require_post_pixel_shader_blending = false;
    relaxed.enumerate(None).unwrap();
    assert!(relaxed
        .combo(0, DeviceType::Hardware, Format::X8R8G8B8, Format::R5G6B5, true)
        .is_some());
    assert!(relaxed
        .combo(0, DeviceType::Hardware, Format::R5G6B5, Format::R5G6B5, false)
        .is_some());
}

#[test]
fn test_mode_bounds_limit_modes_and_formats() {
    let mut enumerator = DeviceEnumerator::new(single_adapter());
    enumerator
        .config_mut()
        .set_resolution_bounds(800, 600, 1024, 768);
    enumerator.enumerate(None).unwrap();
    assert_eq!(enumerator.adapter(0).unwrap().display_modes.len(), 5);

    enumerator.config_mut().set_refresh_bounds(70, 100);
    enumerator.enumerate(None).unwrap();
    let adapter = enumerator.adapter(0).unwrap();
    assert_eq!(
        adapter.display_modes,
        vec![
            DisplayMode::new(800, 600, Format::X8R8G8B8, 75),
            DisplayMode::new(1024, 768, Format::X8R8G8B8, 85),
        ]
    );
    assert!(
        enumerator
            .catalog()
            .combos()
            .all(|(_, _, combo)| combo.adapter_format == Format::X8R8G8B8),
        "R5G6B5 has no mode left and is not the desktop format"
    );
}

#[test]
fn test_adapter_without_modes_is_windowed_only() {
    let mut bare = adapter(0, "Headless Adapter", vec![hal_device()]);
    bare.display_modes.clear();
    let enumerator = enumerated(HardwareProfile {
        adapters: vec![bare],
    });

    let catalog = enumerator.catalog();
    assert!(!catalog.is_empty());
    assert!(catalog
        .combos()
        .all(|(_, _, combo)| combo.windowed && combo.adapter_format == DESKTOP.format));
}

#[test]
fn test_adapter_without_devices_is_dropped() {
    let mut useless = software_device();
    useless.blendable_formats.clear();
    let enumerator = enumerated(HardwareProfile {
        adapters: vec![
            adapter(0, "Broken Adapter", vec![useless]),
            adapter(1, "Working Adapter", vec![hal_device()]),
        ],
    });

    let catalog = enumerator.catalog();
    assert_eq!(catalog.adapters().len(), 1);
    assert_eq!(catalog.adapters()[0].ordinal(), 1);
    assert!(enumerator.adapter(0).is_none());
}

#[test]
fn test_profile_json_replays_identically() {
    let profile = common::dual_adapter();
    let json = profile.to_json_string().unwrap();
    let replayed = HardwareProfile::from_json_str(&json).unwrap();

    assert_eq!(
        *enumerated(profile).catalog(),
        *enumerated(replayed).catalog()
    );
}
