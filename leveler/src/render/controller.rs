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

//! Orchestrates the transform for an interactive viewer.

use tracing::{info, warn};

use crate::{
    pixeldata::{
        display::{DisplayBuffer, DisplayFormat},
        params::WindowParams,
        slice::SampleSlice,
        stats::Statistics,
        winlevel::WindowLevel,
        WindowError,
    },
    render::transform::transform_scanned,
};

/// Factor by which the auto window is widened when an image is loaded, so the initial display
/// encloses all values with a soft contrast.
pub const INITIAL_WIDEN: i32 = 2;

/// Receives the display buffer each time it has been recomputed.
pub trait Viewer {
    fn publish(&mut self, image: &DisplayBuffer);
}

impl<F: FnMut(&DisplayBuffer)> Viewer for F {
    fn publish(&mut self, image: &DisplayBuffer) {
        self(image);
    }
}

/// Holds an image, its statistics, and the current parameters, and re-renders the image for the
/// viewer whenever the parameters change. All work happens synchronously within each call.
pub struct RenderController<V: Viewer> {
    slice: SampleSlice,
    stats: Statistics,
    params: WindowParams,
    output: DisplayBuffer,
    viewer: V,
}

impl<V: Viewer> std::fmt::Debug for RenderController<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderController")
            .field("slice", &self.slice)
            .field("stats", &self.stats)
            .field("params", &self.params)
            .field("output", &self.output)
            .finish_non_exhaustive()
    }
}

impl<V: Viewer> RenderController<V> {
    /// Loads the image and publishes its initial rendering.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the output could not be rendered for the slice.
    pub fn new(slice: SampleSlice, viewer: V) -> Result<Self, WindowError> {
        let stats = Statistics::scan(&slice);
        let params = Self::initial_params(&stats, WindowParams::default());
        let output = DisplayBuffer::for_slice(&slice, DisplayFormat::for_params(&params));
        Self::log_load(&slice, &stats, &params);

        let mut controller = Self {
            slice,
            stats,
            params,
            output,
            viewer,
        };
        controller.recompute()?;
        Ok(controller)
    }

    /// Replaces the image, recomputing statistics and the initial window. The display flags of
    /// the current parameters are kept.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the output could not be rendered for the slice.
    pub fn load(&mut self, slice: SampleSlice) -> Result<(), WindowError> {
        let stats = Statistics::scan(&slice);
        let params = Self::initial_params(&stats, self.params);
        Self::log_load(&slice, &stats, &params);

        self.output = DisplayBuffer::for_slice(&slice, DisplayFormat::for_params(&params));
        self.slice = slice;
        self.stats = stats;
        self.params = params;
        self.recompute()
    }

    /// Applies new parameters and publishes the result. Invalid parameters are rejected and the
    /// current parameters stay in effect, without re-rendering.
    ///
    /// # Errors
    /// - `InvalidParameter` if the parameters fail validation.
    pub fn set_params(&mut self, params: WindowParams) -> Result<(), WindowError> {
        if let Err(e) = params.validate() {
            warn!(center = params.center, width = params.width, "Rejected parameters: {e}");
            return Err(e);
        }
        self.params = params;
        self.recompute()
    }

    /// Resets the center and width from the image statistics, without widening, and publishes the
    /// result. Statistics are not re-scanned.
    ///
    /// # Errors
    /// - `DimensionMismatch` if the output could not be rendered for the slice.
    pub fn auto_window(&mut self) -> Result<(), WindowError> {
        let winlevel = WindowLevel::auto(&self.stats);
        info!(%winlevel, "Auto window");
        self.params = self.params.with_winlevel(winlevel);
        self.recompute()
    }

    #[must_use]
    pub fn slice(&self) -> &SampleSlice {
        &self.slice
    }

    #[must_use]
    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    #[must_use]
    pub fn params(&self) -> &WindowParams {
        &self.params
    }

    /// The most recently published rendering.
    #[must_use]
    pub fn output(&self) -> &DisplayBuffer {
        &self.output
    }

    #[must_use]
    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    #[must_use]
    pub fn into_viewer(self) -> V {
        self.viewer
    }

    fn initial_params(stats: &Statistics, flags: WindowParams) -> WindowParams {
        flags.with_winlevel(WindowLevel::auto(stats).widened(INITIAL_WIDEN))
    }

    fn log_load(slice: &SampleSlice, stats: &Statistics, params: &WindowParams) {
        info!(
            cols = slice.cols(),
            rows = slice.rows(),
            %stats,
            winlevel = %params.winlevel(),
            "Loaded image"
        );
    }

    fn recompute(&mut self) -> Result<(), WindowError> {
        self.output.set_format(DisplayFormat::for_params(&self.params));
        transform_scanned(&self.slice, &self.stats, &self.params, &mut self.output)?;
        self.viewer.publish(&self.output);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        pixeldata::{
            display::{DisplayBuffer, DisplayFormat},
            params::WindowParams,
            slice::SampleSlice,
        },
        render::controller::{RenderController, Viewer},
    };

    #[derive(Default)]
    struct Recorder {
        published: Vec<DisplayBuffer>,
    }

    impl Viewer for Recorder {
        fn publish(&mut self, image: &DisplayBuffer) {
            self.published.push(image.clone());
        }
    }

    fn slice() -> SampleSlice {
        SampleSlice::new(3, 1, vec![0, 255, 510]).unwrap()
    }

    #[test]
    pub fn test_initial_load() {
        let controller = RenderController::new(slice(), Recorder::default()).unwrap();
        assert_eq!(0, controller.stats().min());
        assert_eq!(510, controller.stats().max());
        assert_eq!(255, controller.params().center);
        assert_eq!(1020, controller.params().width);

        let published = &controller.viewer().published;
        assert_eq!(1, published.len());
        assert_eq!(controller.output(), &published[0]);
        // Window is [-255, 765].
        assert_eq!(&[64, 128, 191], published[0].bytes());
    }

    #[test]
    pub fn test_set_params() {
        let mut controller = RenderController::new(slice(), Recorder::default()).unwrap();
        let params = WindowParams::new(255, 510).with_hi_clip(true);
        controller.set_params(params).unwrap();
        assert_eq!(&params, controller.params());
        assert_eq!(DisplayFormat::Rgb, controller.output().format());
        assert_eq!(2, controller.viewer().published.len());

        controller.set_params(WindowParams::new(255, 510)).unwrap();
        assert_eq!(DisplayFormat::Gray, controller.output().format());
        assert_eq!(&[0, 128, 255], controller.output().bytes());
    }

    #[test]
    pub fn test_rejects_negative_width() {
        let mut controller = RenderController::new(slice(), Recorder::default()).unwrap();
        let before = *controller.params();
        assert!(controller.set_params(WindowParams::new(10, -1)).is_err());
        assert_eq!(&before, controller.params());
        assert_eq!(1, controller.viewer().published.len());
    }

    #[test]
    pub fn test_auto_window() {
        let mut controller = RenderController::new(slice(), Recorder::default()).unwrap();
        controller
            .set_params(WindowParams::new(5, 7).with_invert(true))
            .unwrap();
        controller.auto_window().unwrap();

        let params = controller.params();
        assert_eq!(255, params.center);
        assert_eq!(510, params.width);
        assert!(params.invert);
        assert_eq!(&[255, 127, 0], controller.output().bytes());
        assert_eq!(3, controller.viewer().published.len());
    }

    #[test]
    pub fn test_closure_viewer() {
        let mut count = 0;
        {
            let mut controller = RenderController::new(slice(), |_: &DisplayBuffer| count += 1)
                .unwrap();
            controller.auto_window().unwrap();
        }
        assert_eq!(2, count);
    }
}
