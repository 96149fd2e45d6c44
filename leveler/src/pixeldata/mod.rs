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

use thiserror::Error;

pub mod display;
pub mod params;
pub mod slice;
pub mod stats;
pub mod winlevel;

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("Invalid size: {0}x{1}")]
    InvalidSize(usize, usize),

    #[error("Buffer length does not match dimensions, expected: {expected}, actual: {actual}")]
    BufferLength { expected: usize, actual: usize },

    #[error("Output dimensions {out_cols}x{out_rows} do not match input {in_cols}x{in_rows}")]
    DimensionMismatch {
        in_cols: usize,
        in_rows: usize,
        out_cols: usize,
        out_rows: usize,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl WindowError {
    /// Whether this error indicates misuse by the caller, as opposed to a rejected value which
    /// can be corrected and retried.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        !matches!(self, WindowError::InvalidParameter(_))
    }
}
