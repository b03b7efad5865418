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

//! # devcaps core
//!
//! Enumerates graphics adapters, their device types and display modes, and
//! filters every combination of adapter format, back-buffer format and
//! windowed flag into a catalog of validated configurations.
//!
//! All hardware access goes through the [`CapabilityProvider`] trait, so the
//! same [`DeviceEnumerator`] runs against a live backend, a recorded
//! [`HardwareProfile`] or a test double.

#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod device;
pub mod enumerator;
pub mod error;
pub mod format;
pub mod mode;
pub mod multisample;
pub mod present;
pub mod profile;
pub mod provider;
pub mod selection;

pub use catalog::{
    AdapterRecord, Catalog, ComboKey, DepthStencilConflict, DeviceRecord, DeviceSettingsCombo,
    MultisampleOption,
};
pub use config::EnumerationConfig;
pub use device::{DeviceCaps, DeviceType, VertexProcessing};
pub use enumerator::{Acceptability, DeviceEnumerator};
pub use error::{EnumerationError, ProfileError, ProviderError, SelectionError};
pub use format::{DepthFormat, Format, FormatUsage, SurfaceFormat};
pub use mode::DisplayMode;
pub use multisample::MultisampleType;
pub use present::{PresentInterval, PresentIntervalFlags};
pub use profile::HardwareProfile;
pub use provider::{AdapterDetails, CapabilityProvider};
pub use selection::{find_valid_settings, DeviceSettings, MatchOptions, MatchType};
