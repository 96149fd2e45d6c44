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

use crate::pixeldata::{stats::Statistics, winlevel::WindowLevel, WindowError};

/// The full set of values controlling how an image is displayed: the window/level plus the
/// inversion and clipping-marker flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowParams {
    pub center: i32,
    pub width: i32,
    pub invert: bool,
    pub show_lo_clip: bool,
    pub show_hi_clip: bool,
}

impl WindowParams {
    #[must_use]
    pub fn new(center: i32, width: i32) -> Self {
        Self {
            center,
            width,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_invert(mut self, invert: bool) -> Self {
        self.invert = invert;
        self
    }

    #[must_use]
    pub fn with_lo_clip(mut self, show_lo_clip: bool) -> Self {
        self.show_lo_clip = show_lo_clip;
        self
    }

    #[must_use]
    pub fn with_hi_clip(mut self, show_hi_clip: bool) -> Self {
        self.show_hi_clip = show_hi_clip;
        self
    }

    /// A copy of these parameters with the center and width replaced by the given window, keeping
    /// the display flags.
    #[must_use]
    pub fn with_winlevel(mut self, winlevel: WindowLevel) -> Self {
        self.center = winlevel.center();
        self.width = winlevel.width();
        self
    }

    #[must_use]
    pub fn winlevel(&self) -> WindowLevel {
        WindowLevel::new(self.center, self.width)
    }

    /// Whether any clipping marker is enabled, requiring color output.
    #[must_use]
    pub fn shows_markers(&self) -> bool {
        self.show_lo_clip || self.show_hi_clip
    }

    /// Checks the parameters can be applied.
    ///
    /// # Errors
    /// - `InvalidParameter` if the width is negative.
    pub fn validate(&self) -> Result<(), WindowError> {
        if self.width < 0 {
            return Err(WindowError::InvalidParameter(format!(
                "window width must not be negative: {}",
                self.width
            )));
        }
        Ok(())
    }

    /// A copy of these parameters with the center and width clamped into the suggested ranges
    /// for the given statistics.
    #[must_use]
    pub fn clamped(&self, stats: &Statistics) -> Self {
        let centers = stats.center_range();
        let widths = stats.width_range();
        Self {
            center: self.center.clamp(*centers.start(), *centers.end()),
            width: self.width.clamp(*widths.start(), *widths.end()),
            ..*self
        }
    }
}
