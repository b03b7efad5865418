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

//! Multisample anti-aliasing levels.

use serde::{Deserialize, Serialize};

/// A multisample anti-aliasing level.
///
/// Discriminants are the sample counts; `NonMaskable` is the driver-defined
/// level whose quality, not its count, is selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum MultisampleType {
    /// Multisampling disabled.
    None = 0,
    /// Driver-defined, non-maskable multisampling.
    NonMaskable = 1,
    /// 2 samples per pixel.
    Samples2 = 2,
    /// 3 samples per pixel.
    Samples3 = 3,
    /// 4 samples per pixel.
    Samples4 = 4,
    /// 5 samples per pixel.
    Samples5 = 5,
    /// 6 samples per pixel.
    Samples6 = 6,
    /// 7 samples per pixel.
    Samples7 = 7,
    /// 8 samples per pixel.
    Samples8 = 8,
    /// 9 samples per pixel.
    Samples9 = 9,
    /// 10 samples per pixel.
    Samples10 = 10,
    /// 11 samples per pixel.
    Samples11 = 11,
    /// 12 samples per pixel.
    Samples12 = 12,
    /// 13 samples per pixel.
    Samples13 = 13,
    /// 14 samples per pixel.
    Samples14 = 14,
    /// 15 samples per pixel.
    Samples15 = 15,
    /// 16 samples per pixel.
    Samples16 = 16,
}

impl MultisampleType {
    /// The numeric level, used when measuring how close two levels are.
    pub const fn level(self) -> u32 {
        self as u32
    }

    /// The sample count for counted levels, `None` for `NonMaskable`.
    pub const fn sample_count(self) -> Option<u32> {
        match self {
            MultisampleType::None => Some(1),
            MultisampleType::NonMaskable => None,
            other => Some(other as u32),
        }
    }
}

/// Default multisample candidates, in the order they are tried.
pub const DEFAULT_MULTISAMPLE_TYPES: [MultisampleType; 17] = [
    MultisampleType::None,
    MultisampleType::NonMaskable,
    MultisampleType::Samples2,
    MultisampleType::Samples3,
    MultisampleType::Samples4,
    MultisampleType::Samples5,
    MultisampleType::Samples6,
    MultisampleType::Samples7,
    MultisampleType::Samples8,
    MultisampleType::Samples9,
    MultisampleType::Samples10,
    MultisampleType::Samples11,
    MultisampleType::Samples12,
    MultisampleType::Samples13,
    MultisampleType::Samples14,
    MultisampleType::Samples15,
    MultisampleType::Samples16,
];
