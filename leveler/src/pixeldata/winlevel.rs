/*
   Copyright 2024-2025 Christopher Speck

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

use std::cmp::Ordering;

use crate::pixeldata::stats::Statistics;

/// Placement of a sample relative to a window. Every sample falls into exactly one band, the
/// window edges themselves are `Inside`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Below,
    Inside,
    Above,
}

/// A Window/Level that maps a range of 16-bit sample values onto the 8-bit display range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowLevel {
    center: i32,
    width: i32,
}

impl WindowLevel {
    #[must_use]
    pub fn new(center: i32, width: i32) -> Self {
        Self { center, width }
    }

    /// Derives a window spanning the observed spread of values. The center is half the spread
    /// measured from zero, not from the minimum, so for images whose minimum is above zero the
    /// window sits lower than the data.
    #[must_use]
    pub fn auto(stats: &Statistics) -> Self {
        let spread = i32::from(stats.spread());
        Self::new(spread / 2, spread)
    }

    /// A copy of this window with its width multiplied by `factor`, saturating on overflow.
    #[must_use]
    pub fn widened(&self, factor: i32) -> Self {
        Self::new(self.center, self.width.saturating_mul(factor))
    }

    #[must_use]
    pub fn center(&self) -> i32 {
        self.center
    }

    pub fn set_center(&mut self, center: i32) {
        self.center = center;
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    /// The lowest value inside the window, `center - width / 2`.
    #[must_use]
    pub fn low(&self) -> i64 {
        i64::from(self.center) - i64::from(self.width) / 2
    }

    /// The highest value inside the window, `center + width / 2`.
    #[must_use]
    pub fn high(&self) -> i64 {
        i64::from(self.center) + i64::from(self.width) / 2
    }

    /// Precomputes the window edges for applying to many samples.
    #[must_use]
    pub fn bounds(&self) -> WindowBounds {
        WindowBounds {
            low: self.low(),
            high: self.high(),
            width: i64::from(self.width),
        }
    }
}

impl std::fmt::Display for WindowLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C:{} W:{}", self.center, self.width)
    }
}

/// The edges of a `WindowLevel`, in a type wide enough that no center/width combination can
/// overflow while mapping 16-bit samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowBounds {
    low: i64,
    high: i64,
    width: i64,
}

impl WindowBounds {
    #[must_use]
    pub fn low(&self) -> i64 {
        self.low
    }

    #[must_use]
    pub fn high(&self) -> i64 {
        self.high
    }

    #[must_use]
    pub fn classify(&self, val: u16) -> Band {
        let val = i64::from(val);
        match (val.cmp(&self.low), val.cmp(&self.high)) {
            (Ordering::Less, _) => Band::Below,
            (_, Ordering::Greater) => Band::Above,
            _ => Band::Inside,
        }
    }

    /// If every value in `[stats.min, stats.max]` falls into the same clipping band, returns that
    /// band.
    #[must_use]
    pub fn classify_range(&self, stats: &Statistics) -> Option<Band> {
        match (self.classify(stats.min()), self.classify(stats.max())) {
            (Band::Below, Band::Below) => Some(Band::Below),
            (Band::Above, Band::Above) => Some(Band::Above),
            _ => None,
        }
    }

    /// The gray level for a value inside the window. The low edge maps to `0`, the high edge to
    /// `255`, and values between are scaled by `255 / width` rounding half up. Values outside the
    /// window saturate to the nearest edge.
    #[must_use]
    pub fn level(&self, val: u16) -> u8 {
        let val = i64::from(val);
        if val <= self.low {
            return u8::MIN;
        }
        if val >= self.high {
            return u8::MAX;
        }
        // low < val < high is only possible with width >= 2.
        let max = i64::from(u8::MAX);
        let scaled = ((val - self.low) * max * 2 + self.width) / (self.width * 2);
        u8::try_from(scaled.clamp(0, max)).unwrap_or(u8::MAX)
    }
}
