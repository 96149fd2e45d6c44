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

//! Window/level rendering of 16-bit grayscale images into 8-bit gray or RGB display buffers.
//!
//! The [`pixeldata`] module holds the value types: input samples, statistics, window/level and
//! display parameters, and the output buffer. The [`render`] module holds the pure transform and
//! the controller which orchestrates it for an interactive viewer.

pub mod pixeldata;
pub mod render;
