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

use std::fs;

use anyhow::{anyhow, Result};
use image::{ColorType, DynamicImage, GrayImage, RgbImage};
use leveler::{
    pixeldata::{
        display::{DisplayBuffer, DisplayFormat},
        params::WindowParams,
        slice::SampleSlice,
    },
    render::controller::{RenderController, Viewer},
};
use tracing::{info, warn};

use crate::args::{InputArgs, WindowArgs};

pub mod renderapp;
pub mod statsapp;
#[cfg(feature = "viewer")]
pub mod viewapp;

/// Loads the 16-bit samples of the input file.
pub(crate) fn load_input(args: &InputArgs) -> Result<SampleSlice> {
    if let Some(dims) = args.raw {
        let bytes = fs::read(&args.file)?;
        let slice = if args.big_endian {
            SampleSlice::from_be_bytes(dims.cols, dims.rows, &bytes)?
        } else {
            SampleSlice::from_le_bytes(dims.cols, dims.rows, &bytes)?
        };
        return Ok(slice);
    }

    let image = image::open(&args.file)?;
    if image.color() != ColorType::L16 {
        warn!(
            color = ?image.color(),
            "Image is not 16-bit grayscale, converting"
        );
    }
    let gray = image.into_luma16();
    let (cols, rows) = gray.dimensions();
    Ok(SampleSlice::new(
        usize::try_from(cols)?,
        usize::try_from(rows)?,
        gray.into_raw(),
    )?)
}

/// Applies the window options given on the command line on top of the controller's initial
/// window. Options which aren't given keep their current value.
pub(crate) fn apply_window<V: Viewer>(
    controller: &mut RenderController<V>,
    args: &WindowArgs,
) -> Result<()> {
    if args.auto {
        controller.auto_window()?;
    }

    let current = *controller.params();
    let params = WindowParams {
        center: args.center.unwrap_or(current.center),
        width: args.width.unwrap_or(current.width),
        invert: args.invert,
        show_lo_clip: args.show_lo_clip,
        show_hi_clip: args.show_hi_clip,
    };
    if params != current {
        controller.set_params(params)?;
    }
    info!(winlevel = %controller.params().winlevel(), "Window applied");
    Ok(())
}

/// Converts a display buffer into an image for encoding.
pub(crate) fn to_image(buffer: &DisplayBuffer) -> Result<DynamicImage> {
    let cols = u32::try_from(buffer.cols())?;
    let rows = u32::try_from(buffer.rows())?;
    let bytes = buffer.bytes().to_vec();
    let image = match buffer.format() {
        DisplayFormat::Gray => GrayImage::from_raw(cols, rows, bytes).map(DynamicImage::ImageLuma8),
        DisplayFormat::Rgb => RgbImage::from_raw(cols, rows, bytes).map(DynamicImage::ImageRgb8),
    };
    image.ok_or_else(|| anyhow!("Display buffer does not fit {cols}x{rows}"))
}

#[cfg(test)]
mod tests {
    use leveler::{
        pixeldata::{
            display::{DisplayBuffer, DisplayFormat, LO_CLIP_COLOR},
            slice::SampleSlice,
        },
        render::controller::RenderController,
    };

    use crate::{
        app::{apply_window, to_image},
        args::WindowArgs,
    };

    #[test]
    pub fn test_apply_window_defaults() {
        let slice = SampleSlice::new(2, 1, vec![0, 510]).unwrap();
        let mut controller = RenderController::new(slice, |_: &DisplayBuffer| {}).unwrap();
        apply_window(&mut controller, &WindowArgs::default()).unwrap();
        assert_eq!(255, controller.params().center);
        assert_eq!(1020, controller.params().width);
    }

    #[test]
    pub fn test_apply_window_overrides() {
        let slice = SampleSlice::new(2, 1, vec![0, 510]).unwrap();
        let mut controller = RenderController::new(slice, |_: &DisplayBuffer| {}).unwrap();
        let args = WindowArgs {
            auto: true,
            width: Some(100),
            show_lo_clip: true,
            ..WindowArgs::default()
        };
        apply_window(&mut controller, &args).unwrap();
        assert_eq!(255, controller.params().center);
        assert_eq!(100, controller.params().width);
        assert_eq!(Some(LO_CLIP_COLOR), controller.output().pixel(0, 0));

        let args = WindowArgs {
            width: Some(-1),
            ..WindowArgs::default()
        };
        assert!(apply_window(&mut controller, &args).is_err());
        assert_eq!(100, controller.params().width);
    }

    #[test]
    pub fn test_to_image() {
        let gray = DisplayBuffer::new(3, 2, DisplayFormat::Gray);
        let image = to_image(&gray).unwrap();
        assert_eq!(3, image.width());
        assert_eq!(2, image.height());
        assert!(image.as_luma8().is_some());

        let rgb = DisplayBuffer::new(3, 2, DisplayFormat::Rgb);
        let image = to_image(&rgb).unwrap();
        assert!(image.as_rgb8().is_some());
    }
}
