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

//! Surface formats, depth/stencil formats, and their bit-layout metadata.

use serde::{Deserialize, Serialize};

/// A color surface format, as used by display modes, adapters and back buffers.
///
/// Discriminants follow the native format codes, so the derived ordering is the
/// one display modes are sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum Format {
    /// Format is not known or not set.
    Unknown = 0,
    /// 24-bit RGB.
    R8G8B8 = 20,
    /// 32-bit ARGB with 8 bits per channel.
    A8R8G8B8 = 21,
    /// 32-bit RGB with 8 bits per channel, upper byte unused.
    X8R8G8B8 = 22,
    /// 16-bit RGB, 5/6/5 bits.
    R5G6B5 = 23,
    /// 16-bit RGB with 5 bits per channel, top bit unused.
    X1R5G5B5 = 24,
    /// 16-bit ARGB with a 1-bit alpha.
    A1R5G5B5 = 25,
    /// 16-bit ARGB with 4 bits per channel.
    A4R4G4B4 = 26,
    /// 8-bit RGB, 3/3/2 bits.
    R3G3B2 = 27,
    /// 16-bit ARGB, 8-bit alpha and 3/3/2 color.
    A8R3G3B2 = 29,
    /// 16-bit RGB with 4 bits per channel, top nibble unused.
    X4R4G4B4 = 30,
    /// 32-bit ABGR with 10 bits per color channel.
    A2B10G10R10 = 31,
    /// 32-bit ARGB with 10 bits per color channel.
    A2R10G10B10 = 35,
}

impl Format {
    /// Number of bits in each color channel, or 0 for formats without a
    /// uniform per-channel width.
    pub fn color_channel_bits(self) -> u32 {
        match self {
            Format::R8G8B8 | Format::A8R8G8B8 | Format::X8R8G8B8 => 8,
            Format::R5G6B5 | Format::X1R5G5B5 | Format::A1R5G5B5 => 5,
            Format::A4R4G4B4 | Format::X4R4G4B4 => 4,
            Format::R3G3B2 | Format::A8R3G3B2 => 2,
            Format::A2B10G10R10 | Format::A2R10G10B10 => 10,
            Format::Unknown => 0,
        }
    }

    /// Number of alpha bits.
    pub fn alpha_channel_bits(self) -> u32 {
        match self {
            Format::A8R3G3B2 | Format::A8R8G8B8 => 8,
            Format::A1R5G5B5 => 1,
            Format::A4R4G4B4 => 4,
            Format::A2B10G10R10 | Format::A2R10G10B10 => 2,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Formats an adapter may run its desktop in. Display modes of any other
/// format are ignored during enumeration.
pub const ADAPTER_FORMATS: [Format; 4] = [
    Format::X8R8G8B8,
    Format::X1R5G5B5,
    Format::R5G6B5,
    Format::A2R10G10B10,
];

/// Back-buffer formats tried for every adapter format, in this order.
pub const BACK_BUFFER_FORMATS: [Format; 6] = [
    Format::A8R8G8B8,
    Format::X8R8G8B8,
    Format::A1R5G5B5,
    Format::X1R5G5B5,
    Format::R5G6B5,
    Format::A2R10G10B10,
];

/// A depth/stencil buffer format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u32)]
pub enum DepthFormat {
    /// No depth buffer.
    Unknown = 0,
    /// 16-bit lockable depth.
    D16Lockable = 70,
    /// 32-bit depth.
    D32 = 71,
    /// 15-bit depth, 1-bit stencil.
    D15S1 = 73,
    /// 24-bit depth, 8-bit stencil.
    D24S8 = 75,
    /// 24-bit depth, 8 bits unused.
    D24X8 = 77,
    /// 24-bit depth, 4-bit stencil, 4 bits unused.
    D24X4S4 = 79,
    /// 16-bit depth.
    D16 = 80,
    /// 32-bit lockable float depth.
    D32SingleLockable = 82,
    /// 24-bit float depth, 8-bit stencil.
    D24SingleS8 = 83,
}

impl DepthFormat {
    /// Number of depth bits.
    pub fn depth_bits(self) -> u32 {
        match self {
            DepthFormat::D16 | DepthFormat::D16Lockable => 16,
            DepthFormat::D15S1 => 15,
            DepthFormat::D24X8
            | DepthFormat::D24S8
            | DepthFormat::D24X4S4
            | DepthFormat::D24SingleS8 => 24,
            DepthFormat::D32 | DepthFormat::D32SingleLockable => 32,
            DepthFormat::Unknown => 0,
        }
    }

    /// Number of stencil bits.
    pub fn stencil_bits(self) -> u32 {
        match self {
            DepthFormat::D15S1 => 1,
            DepthFormat::D24X4S4 => 4,
            DepthFormat::D24SingleS8 | DepthFormat::D24S8 => 8,
            _ => 0,
        }
    }
}

impl std::fmt::Display for DepthFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// The default depth/stencil candidates, in preference order.
pub const DEFAULT_DEPTH_STENCIL_FORMATS: [DepthFormat; 6] = [
    DepthFormat::D16,
    DepthFormat::D15S1,
    DepthFormat::D24X8,
    DepthFormat::D24S8,
    DepthFormat::D24X4S4,
    DepthFormat::D32,
];

/// Either kind of surface format, for queries that accept both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceFormat {
    /// A color format.
    Color(Format),
    /// A depth/stencil format.
    Depth(DepthFormat),
}

impl From<Format> for SurfaceFormat {
    fn from(format: Format) -> Self {
        SurfaceFormat::Color(format)
    }
}

impl From<DepthFormat> for SurfaceFormat {
    fn from(format: DepthFormat) -> Self {
        SurfaceFormat::Depth(format)
    }
}

/// The usage a format check is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatUsage {
    /// The format is a render target that supports blending, alpha test, fog
    /// and dithering after the pixel shader.
    PostPixelShaderBlending,
    /// The format is used as a depth/stencil surface.
    DepthStencil,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ordering_follows_native_codes() {
        assert!(Format::A8R8G8B8 < Format::X8R8G8B8);
        assert!(Format::X8R8G8B8 < Format::R5G6B5);
        assert!(Format::A2B10G10R10 < Format::A2R10G10B10);
    }

    #[test]
    fn test_channel_bits() {
        assert_eq!(Format::X8R8G8B8.color_channel_bits(), 8);
        assert_eq!(Format::R5G6B5.color_channel_bits(), 5);
        assert_eq!(Format::A2R10G10B10.color_channel_bits(), 10);
        assert_eq!(Format::X8R8G8B8.alpha_channel_bits(), 0);
        assert_eq!(Format::A1R5G5B5.alpha_channel_bits(), 1);
    }

    #[test]
    fn test_depth_and_stencil_bits() {
        assert_eq!(DepthFormat::D24S8.depth_bits(), 24);
        assert_eq!(DepthFormat::D24S8.stencil_bits(), 8);
        assert_eq!(DepthFormat::D15S1.depth_bits(), 15);
        assert_eq!(DepthFormat::D15S1.stencil_bits(), 1);
        assert_eq!(DepthFormat::D32.stencil_bits(), 0);
        assert_eq!(DepthFormat::Unknown.depth_bits(), 0);
    }
}
