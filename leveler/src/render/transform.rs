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

//! Mapping of 16-bit samples to display pixels.

use tracing::debug;

use crate::pixeldata::{
    display::{DisplayBuffer, DisplayFormat, Rgb, BLACK, HI_CLIP_COLOR, LO_CLIP_COLOR, WHITE},
    params::WindowParams,
    slice::SampleSlice,
    stats::Statistics,
    winlevel::Band,
    WindowError,
};

/// Applies the parameters to every sample of the slice, producing a new display buffer in the
/// format the parameters need. Every pixel is classified from its own sample, `stats` is only
/// reported in logs.
#[must_use]
pub fn transform(slice: &SampleSlice, stats: &Statistics, params: &WindowParams) -> DisplayBuffer {
    let mut out = DisplayBuffer::for_slice(slice, DisplayFormat::for_params(params));
    render(slice, stats, params, false, &mut out);
    out
}

/// Applies the parameters to every sample of the slice, overwriting `out`. A `Gray` buffer is
/// switched to `Rgb` if clipping markers are enabled, an `Rgb` buffer is kept as `Rgb`.
///
/// # Errors
/// - `DimensionMismatch` if `out` does not have the same dimensions as `slice`.
pub fn transform_into(
    slice: &SampleSlice,
    stats: &Statistics,
    params: &WindowParams,
    out: &mut DisplayBuffer,
) -> Result<(), WindowError> {
    prepare(slice, params, out)?;
    render(slice, stats, params, false, out);
    Ok(())
}

/// Like `transform_into`, but when `[stats.min, stats.max]` lies entirely in one clipping band
/// the buffer is filled without classifying each sample. `stats` must have been scanned from
/// `slice`.
pub(crate) fn transform_scanned(
    slice: &SampleSlice,
    stats: &Statistics,
    params: &WindowParams,
    out: &mut DisplayBuffer,
) -> Result<(), WindowError> {
    prepare(slice, params, out)?;
    render(slice, stats, params, true, out);
    Ok(())
}

fn prepare(
    slice: &SampleSlice,
    params: &WindowParams,
    out: &mut DisplayBuffer,
) -> Result<(), WindowError> {
    if !out.matches(slice) {
        return Err(WindowError::DimensionMismatch {
            in_cols: slice.cols(),
            in_rows: slice.rows(),
            out_cols: out.cols(),
            out_rows: out.rows(),
        });
    }
    if params.shows_markers() {
        out.set_format(DisplayFormat::Rgb);
    }
    Ok(())
}

fn render(
    slice: &SampleSlice,
    stats: &Statistics,
    params: &WindowParams,
    uniform_fill: bool,
    out: &mut DisplayBuffer,
) {
    let bounds = params.winlevel().bounds();
    let lo_color: Rgb = if params.show_lo_clip {
        LO_CLIP_COLOR
    } else {
        BLACK
    };
    let hi_color: Rgb = if params.show_hi_clip {
        HI_CLIP_COLOR
    } else {
        WHITE
    };

    let uniform = if uniform_fill {
        bounds.classify_range(stats)
    } else {
        None
    };
    debug!(
        %stats,
        center = params.center,
        width = params.width,
        low = bounds.low(),
        high = bounds.high(),
        format = %out.format(),
        uniform = ?uniform,
        "Applying window"
    );

    match uniform {
        Some(Band::Below) => out.fill(lo_color),
        Some(Band::Above) => out.fill(hi_color),
        _ => {
            let channels = out.format().channels();
            for (px, &val) in out
                .bytes_mut()
                .chunks_exact_mut(channels)
                .zip(slice.buffer())
            {
                let color = match bounds.classify(val) {
                    Band::Below => lo_color,
                    Band::Inside => {
                        let level = bounds.level(val);
                        [level, level, level]
                    }
                    Band::Above => hi_color,
                };
                px.copy_from_slice(&color[..channels]);
            }
        }
    }

    if params.invert {
        out.invert();
    }
}
