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

use std::ops::RangeInclusive;

use crate::pixeldata::slice::SampleSlice;

/// The observed minimum and maximum sample values of an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Statistics {
    min: u16,
    max: u16,
}

impl Statistics {
    /// # Panics
    /// If `min` is greater than `max`.
    #[must_use]
    pub fn new(min: u16, max: u16) -> Self {
        assert!(min <= max, "Statistics min {min} exceeds max {max}");
        Self { min, max }
    }

    /// Scans every sample of the slice. A `SampleSlice` is never empty so this always succeeds.
    #[must_use]
    pub fn scan(slice: &SampleSlice) -> Self {
        Self::from_samples(slice.buffer())
    }

    /// Scans the given samples for their minimum and maximum.
    ///
    /// # Panics
    /// If `samples` is empty, there are no statistics for an empty image.
    #[must_use]
    pub fn from_samples(samples: &[u16]) -> Self {
        assert!(!samples.is_empty(), "Cannot compute statistics of zero samples");

        let mut min: u16 = u16::MAX;
        let mut max: u16 = u16::MIN;
        for &val in samples {
            min = min.min(val);
            max = max.max(val);
        }
        Self { min, max }
    }

    #[must_use]
    pub fn min(&self) -> u16 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> u16 {
        self.max
    }

    /// The distance between the minimum and maximum values.
    #[must_use]
    pub fn spread(&self) -> u16 {
        self.max - self.min
    }

    /// Suggested bounds for a window center, covering the observed values.
    #[must_use]
    pub fn center_range(&self) -> RangeInclusive<i32> {
        i32::from(self.min)..=i32::from(self.max)
    }

    /// Suggested bounds for a window width, up to twice the observed spread.
    #[must_use]
    pub fn width_range(&self) -> RangeInclusive<i32> {
        0..=i32::from(self.spread()) * 2
    }
}

impl std::fmt::Display for Statistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
