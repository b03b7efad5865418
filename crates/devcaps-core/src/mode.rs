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

//! Display modes.

use serde::{Deserialize, Serialize};

use crate::format::Format;

/// A resolution, format and refresh rate an adapter can present.
///
/// The derived ordering compares width, then height, then format, then
/// refresh rate, which is the order mode lists are kept in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisplayMode {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel format.
    pub format: Format,
    /// Refresh rate in Hz; 0 means the adapter default.
    #[serde(default)]
    pub refresh_rate: u32,
}

impl DisplayMode {
    /// Creates a display mode.
    pub const fn new(width: u32, height: u32, format: Format, refresh_rate: u32) -> Self {
        Self {
            width,
            height,
            format,
            refresh_rate,
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} {} @ {}Hz",
            self.width, self.height, self.format, self.refresh_rate
        )
    }
}
