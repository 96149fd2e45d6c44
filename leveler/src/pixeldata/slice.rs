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

use crate::pixeldata::WindowError;

pub const U16_SIZE: usize = std::mem::size_of::<u16>();

/// Read-only 16-bit unsigned samples of a single image, one sample per pixel, in row-major order.
pub struct SampleSlice {
    cols: usize,
    rows: usize,
    buffer: Vec<u16>,
}

impl std::fmt::Debug for SampleSlice {
    // Default Debug implementation but don't print all samples, just the length.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleSlice")
            .field("cols", &self.cols)
            .field("rows", &self.rows)
            .field("buffer.len", &self.buffer.len())
            .finish()
    }
}

impl SampleSlice {
    /// Wrap samples already decoded into `u16`.
    ///
    /// # Errors
    /// - `InvalidSize` if either dimension is zero.
    /// - `BufferLength` if the number of samples is not `cols * rows`.
    pub fn new(cols: usize, rows: usize, buffer: Vec<u16>) -> Result<Self, WindowError> {
        let expected = Self::checked_len(cols, rows)?;
        if buffer.len() != expected {
            return Err(WindowError::BufferLength {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self { cols, rows, buffer })
    }

    /// Interpret headerless little-endian bytes as 16-bit samples.
    ///
    /// # Errors
    /// - `InvalidSize` if either dimension is zero.
    /// - `BufferLength` if the byte count is not `cols * rows * 2`.
    pub fn from_le_bytes(cols: usize, rows: usize, bytes: &[u8]) -> Result<Self, WindowError> {
        Self::from_bytes(cols, rows, bytes, false)
    }

    /// Interpret headerless big-endian bytes as 16-bit samples.
    ///
    /// # Errors
    /// - `InvalidSize` if either dimension is zero.
    /// - `BufferLength` if the byte count is not `cols * rows * 2`.
    pub fn from_be_bytes(cols: usize, rows: usize, bytes: &[u8]) -> Result<Self, WindowError> {
        Self::from_bytes(cols, rows, bytes, true)
    }

    fn from_bytes(
        cols: usize,
        rows: usize,
        bytes: &[u8],
        big_endian: bool,
    ) -> Result<Self, WindowError> {
        let len = Self::checked_len(cols, rows)?;
        let expected = len
            .checked_mul(U16_SIZE)
            .ok_or(WindowError::InvalidSize(cols, rows))?;
        if bytes.len() != expected {
            return Err(WindowError::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }

        let buffer: Vec<u16> = bytes
            .chunks_exact(U16_SIZE)
            .map(|b| {
                let b = [b[0], b[1]];
                if big_endian {
                    u16::from_be_bytes(b)
                } else {
                    u16::from_le_bytes(b)
                }
            })
            .collect();

        Self::new(cols, rows, buffer)
    }

    fn checked_len(cols: usize, rows: usize) -> Result<usize, WindowError> {
        if cols == 0 || rows == 0 {
            return Err(WindowError::InvalidSize(cols, rows));
        }
        cols.checked_mul(rows)
            .ok_or(WindowError::InvalidSize(cols, rows))
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of samples, always `cols * rows` and never zero.
    #[must_use]
    pub fn num_samples(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn buffer(&self) -> &[u16] {
        &self.buffer
    }

    #[must_use]
    pub fn into_buffer(self) -> Vec<u16> {
        self.buffer
    }

    /// The sample at the given column and row, if within bounds.
    #[must_use]
    pub fn sample(&self, col: usize, row: usize) -> Option<u16> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.buffer.get(row * self.cols + col).copied()
    }
}

#[cfg(test)]
mod tests {
    use crate::pixeldata::{slice::SampleSlice, WindowError};

    #[test]
    pub fn test_rejects_zero_size() {
        let res = SampleSlice::new(0, 0, Vec::new());
        assert!(matches!(res, Err(WindowError::InvalidSize(0, 0))));

        let res = SampleSlice::new(4, 0, Vec::new());
        assert!(matches!(res, Err(WindowError::InvalidSize(4, 0))));
    }

    #[test]
    pub fn test_rejects_length_mismatch() {
        let res = SampleSlice::new(2, 2, vec![1, 2, 3]);
        assert!(matches!(
            res,
            Err(WindowError::BufferLength {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    pub fn test_from_bytes() {
        let bytes = [0x01, 0x02, 0xFF, 0x00];

        let le = SampleSlice::from_le_bytes(2, 1, &bytes).unwrap();
        assert_eq!(&[0x0201, 0x00FF], le.buffer());

        let be = SampleSlice::from_be_bytes(1, 2, &bytes).unwrap();
        assert_eq!(&[0x0102, 0xFF00], be.buffer());
        assert_eq!(Some(0xFF00), be.sample(0, 1));
        assert_eq!(None, be.sample(1, 0));
    }

    #[test]
    pub fn test_from_bytes_every_sample() {
        let samples: Vec<u16> = (0..12).map(|i| i * 5000 + 1).collect();
        let le: Vec<u8> = samples.iter().flat_map(|v| v.to_le_bytes()).collect();
        let be: Vec<u8> = samples.iter().flat_map(|v| v.to_be_bytes()).collect();

        let slice = SampleSlice::from_le_bytes(4, 3, &le).unwrap();
        assert_eq!(samples.as_slice(), slice.buffer());
        let slice = SampleSlice::from_be_bytes(3, 4, &be).unwrap();
        assert_eq!(samples, slice.into_buffer());
    }

    #[test]
    pub fn test_from_bytes_odd_length() {
        let res = SampleSlice::from_le_bytes(2, 1, &[0, 1, 2]);
        assert!(matches!(
            res,
            Err(WindowError::BufferLength {
                expected: 4,
                actual: 3
            })
        ));
    }
}
