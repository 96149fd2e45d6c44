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

use crate::pixeldata::{params::WindowParams, slice::SampleSlice};

/// An RGB triple.
pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [u8::MIN, u8::MIN, u8::MIN];
pub const WHITE: Rgb = [u8::MAX, u8::MAX, u8::MAX];

/// Color marking samples below the window, when enabled.
pub const LO_CLIP_COLOR: Rgb = [0x00, 0x00, 0xFF];

/// Color marking samples above the window, when enabled.
pub const HI_CLIP_COLOR: Rgb = [0xFF, 0x00, 0x00];

/// Layout of the pixels in a `DisplayBuffer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayFormat {
    /// One byte per pixel.
    Gray,
    /// Three bytes per pixel, in R, G, B order.
    Rgb,
}

impl DisplayFormat {
    /// The format needed to display with the given parameters: clipping markers need color.
    #[must_use]
    pub fn for_params(params: &WindowParams) -> Self {
        if params.shows_markers() {
            DisplayFormat::Rgb
        } else {
            DisplayFormat::Gray
        }
    }

    #[must_use]
    pub fn channels(&self) -> usize {
        match self {
            DisplayFormat::Gray => 1,
            DisplayFormat::Rgb => 3,
        }
    }
}

impl std::fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayFormat::Gray => write!(f, "Gray"),
            DisplayFormat::Rgb => write!(f, "RGB"),
        }
    }
}

/// 8-bit display pixels produced from a `SampleSlice`, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct DisplayBuffer {
    cols: usize,
    rows: usize,
    format: DisplayFormat,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for DisplayBuffer {
    // Default Debug implementation but don't print all bytes, just the length.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayBuffer")
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("format", &self.format)
            .field("bytes.len", &self.bytes.len())
            .finish()
    }
}

impl DisplayBuffer {
    /// A black buffer of the given dimensions.
    #[must_use]
    pub fn new(cols: usize, rows: usize, format: DisplayFormat) -> Self {
        Self {
            cols,
            rows,
            format,
            bytes: vec![u8::MIN; cols * rows * format.channels()],
        }
    }

    /// A black buffer matching the dimensions of the given slice.
    #[must_use]
    pub fn for_slice(slice: &SampleSlice, format: DisplayFormat) -> Self {
        Self::new(slice.cols(), slice.rows(), format)
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn format(&self) -> DisplayFormat {
        self.format
    }

    /// Whether this buffer has the same dimensions as the slice.
    #[must_use]
    pub fn matches(&self, slice: &SampleSlice) -> bool {
        self.cols == slice.cols() && self.rows == slice.rows()
    }

    /// Changes the pixel layout. Contents are not preserved when the layout changes.
    pub fn set_format(&mut self, format: DisplayFormat) {
        if self.format != format {
            self.format = format;
            self.bytes = vec![u8::MIN; self.cols * self.rows * format.channels()];
        }
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The pixel at the given column and row as RGB, gray pixels repeated across channels.
    #[must_use]
    pub fn pixel(&self, col: usize, row: usize) -> Option<Rgb> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let pos = (row * self.cols + col) * self.format.channels();
        match self.format {
            DisplayFormat::Gray => self.bytes.get(pos).map(|&v| [v, v, v]),
            DisplayFormat::Rgb => self
                .bytes
                .get(pos..pos + 3)
                .and_then(|rgb| rgb.try_into().ok()),
        }
    }

    /// Replaces every pixel with the given color. In `Gray` format only the first channel is
    /// used.
    pub fn fill(&mut self, color: Rgb) {
        match self.format {
            DisplayFormat::Gray => self.bytes.fill(color[0]),
            DisplayFormat::Rgb => {
                for px in self.bytes.chunks_exact_mut(3) {
                    px.copy_from_slice(&color);
                }
            }
        }
    }

    /// Replaces every channel value `c` with `255 - c`.
    pub fn invert(&mut self) {
        for c in &mut self.bytes {
            *c = u8::MAX - *c;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pixeldata::{
        display::{DisplayBuffer, DisplayFormat, HI_CLIP_COLOR, LO_CLIP_COLOR},
        params::WindowParams,
    };

    #[test]
    pub fn test_format_for_params() {
        let params = WindowParams::new(0, 10);
        assert_eq!(DisplayFormat::Gray, DisplayFormat::for_params(&params));
        assert_eq!(
            DisplayFormat::Rgb,
            DisplayFormat::for_params(&params.with_lo_clip(true))
        );
        assert_eq!(
            DisplayFormat::Rgb,
            DisplayFormat::for_params(&params.with_hi_clip(true))
        );
        assert_eq!(
            DisplayFormat::Gray,
            DisplayFormat::for_params(&params.with_invert(true))
        );
    }

    #[test]
    pub fn test_fill_and_invert() {
        let mut buf = DisplayBuffer::new(2, 2, DisplayFormat::Rgb);
        assert_eq!(12, buf.bytes().len());
        buf.fill(LO_CLIP_COLOR);
        assert_eq!(Some(LO_CLIP_COLOR), buf.pixel(1, 1));
        buf.invert();
        assert_eq!(Some([255, 255, 0]), buf.pixel(0, 1));
        assert_eq!(None, buf.pixel(2, 0));

        let mut buf = DisplayBuffer::new(3, 1, DisplayFormat::Gray);
        buf.fill(HI_CLIP_COLOR);
        assert_eq!(Some([255, 255, 255]), buf.pixel(2, 0));
        buf.invert();
        assert_eq!(&[0, 0, 0], buf.bytes());
    }

    #[test]
    pub fn test_set_format() {
        let mut buf = DisplayBuffer::new(4, 3, DisplayFormat::Gray);
        assert_eq!(12, buf.bytes().len());
        buf.set_format(DisplayFormat::Rgb);
        assert_eq!(DisplayFormat::Rgb, buf.format());
        assert_eq!(36, buf.bytes().len());
    }
}
