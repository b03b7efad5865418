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

//! Present intervals and the capability flags that advertise them.

use serde::{Deserialize, Serialize};

/// How many vertical retraces a present waits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresentInterval {
    /// Present immediately; may tear.
    Immediate,
    /// Wait for one retrace using the default timer resolution. Always available.
    Default,
    /// Wait for one retrace.
    One,
    /// Wait for two retraces.
    Two,
    /// Wait for three retraces.
    Three,
    /// Wait for four retraces.
    Four,
}

impl PresentInterval {
    /// The capability bit advertising this interval. `Default` has none.
    pub const fn bits(self) -> u32 {
        match self {
            PresentInterval::Default => 0,
            PresentInterval::One => 0x0000_0001,
            PresentInterval::Two => 0x0000_0002,
            PresentInterval::Three => 0x0000_0004,
            PresentInterval::Four => 0x0000_0008,
            PresentInterval::Immediate => 0x8000_0000,
        }
    }

    /// Whether the interval waits for more than one retrace. Such intervals
    /// cannot be used by a windowed swap chain.
    pub const fn is_multi_retrace(self) -> bool {
        matches!(
            self,
            PresentInterval::Two | PresentInterval::Three | PresentInterval::Four
        )
    }
}

/// Default present-interval candidates, in the order they are listed.
pub const DEFAULT_PRESENT_INTERVALS: [PresentInterval; 6] = [
    PresentInterval::Immediate,
    PresentInterval::Default,
    PresentInterval::One,
    PresentInterval::Two,
    PresentInterval::Three,
    PresentInterval::Four,
];

/// A bitmask of supported present intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresentIntervalFlags {
    bits: u32,
}

impl PresentIntervalFlags {
    /// No intervals.
    pub const NONE: Self = Self { bits: 0 };
    /// Immediate presentation.
    pub const IMMEDIATE: Self = Self::from_interval(PresentInterval::Immediate);
    /// One retrace.
    pub const ONE: Self = Self::from_interval(PresentInterval::One);
    /// Two retraces.
    pub const TWO: Self = Self::from_interval(PresentInterval::Two);
    /// Three retraces.
    pub const THREE: Self = Self::from_interval(PresentInterval::Three);
    /// Four retraces.
    pub const FOUR: Self = Self::from_interval(PresentInterval::Four);
    /// Every interval that has a capability bit.
    pub const ALL: Self = Self {
        bits: Self::IMMEDIATE.bits
            | Self::ONE.bits
            | Self::TWO.bits
            | Self::THREE.bits
            | Self::FOUR.bits,
    };

    /// Creates flags from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        Self { bits }
    }

    /// Creates flags holding a single interval.
    pub const fn from_interval(interval: PresentInterval) -> Self {
        Self {
            bits: interval.bits(),
        }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u32 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks whether the interval's bit is set. Always false for
    /// [`PresentInterval::Default`], which has no bit.
    pub const fn contains(&self, interval: PresentInterval) -> bool {
        (self.bits & interval.bits()) != 0
    }

    /// Checks if no bit is set.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl FromIterator<PresentInterval> for PresentIntervalFlags {
    fn from_iter<I: IntoIterator<Item = PresentInterval>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::NONE, |acc, interval| acc | Self::from_interval(interval))
    }
}

impl std::ops::BitOr for PresentIntervalFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for PresentIntervalFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_interval_is_never_a_flag() {
        assert!(!PresentIntervalFlags::ALL.contains(PresentInterval::Default));
    }

    #[test]
    fn test_collect_flags() {
        let flags: PresentIntervalFlags = [PresentInterval::One, PresentInterval::Immediate]
            .into_iter()
            .collect();
        assert!(flags.contains(PresentInterval::One));
        assert!(flags.contains(PresentInterval::Immediate));
        assert!(!flags.contains(PresentInterval::Two));
        assert_eq!(flags.bits(), 0x8000_0001);
    }
}
