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

//! Defines the error types for enumeration, capability queries, settings
//! selection and hardware profiles.

use std::fmt;

use crate::device::DeviceType;

/// A single capability query could not be answered.
///
/// The enumerator treats this as "not supported" for the item being probed;
/// it is never surfaced from [`crate::DeviceEnumerator::enumerate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The requested device type does not exist on the adapter.
    DeviceUnavailable {
        /// The adapter ordinal that was queried.
        ordinal: u32,
        /// The device type that was queried.
        device_type: DeviceType,
    },
    /// The adapter ordinal is not known to the provider.
    UnknownAdapter(u32),
    /// The native graphics layer could not be reached at all.
    BackendUnavailable(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::DeviceUnavailable {
                ordinal,
                device_type,
            } => write!(
                f,
                "Device type {device_type:?} is not available on adapter {ordinal}"
            ),
            ProviderError::UnknownAdapter(ordinal) => {
                write!(f, "No adapter with ordinal {ordinal}")
            }
            ProviderError::BackendUnavailable(msg) => {
                write!(f, "Graphics backend unavailable: {msg}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// The one unrecoverable enumeration failure.
#[derive(Debug)]
pub enum EnumerationError {
    /// No compatible rendering backend could be loaded. The catalog is left empty.
    BackendUnavailable(ProviderError),
}

impl fmt::Display for EnumerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumerationError::BackendUnavailable(err) => {
                write!(f, "No compatible rendering backend: {err}")
            }
        }
    }
}

impl std::error::Error for EnumerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnumerationError::BackendUnavailable(err) => Some(err),
        }
    }
}

impl From<ProviderError> for EnumerationError {
    fn from(err: ProviderError) -> Self {
        EnumerationError::BackendUnavailable(err)
    }
}

/// Settings could not be resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No catalog combo satisfies the preserved settings.
    NoCompatibleDevices,
    /// The chosen fullscreen combo has no display mode of its adapter format.
    NoValidResolution {
        /// Adapter ordinal of the chosen combo.
        ordinal: u32,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NoCompatibleDevices => {
                write!(f, "No device configuration matches the requested settings.")
            }
            SelectionError::NoValidResolution { ordinal } => {
                write!(f, "Adapter {ordinal} has no usable fullscreen resolution.")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// A hardware profile could not be loaded.
#[derive(Debug)]
pub enum ProfileError {
    /// Reading the profile failed.
    Io {
        /// The path that was read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
    /// The profile is not valid JSON for the profile schema.
    Parse(serde_json::Error),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Io { path, source } => {
                write!(f, "Failed to read hardware profile '{path}': {source}")
            }
            ProfileError::Parse(err) => write!(f, "Invalid hardware profile: {err}"),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileError::Io { source, .. } => Some(source),
            ProfileError::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_enumeration_error_wraps_provider_error() {
        let err: EnumerationError =
            ProviderError::BackendUnavailable("driver missing".to_string()).into();
        assert_eq!(
            format!("{err}"),
            "No compatible rendering backend: Graphics backend unavailable: driver missing"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::DeviceUnavailable {
            ordinal: 1,
            device_type: DeviceType::Reference,
        };
        assert_eq!(
            format!("{err}"),
            "Device type Reference is not available on adapter 1"
        );
    }
}
