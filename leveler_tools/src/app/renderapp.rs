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

//! This command applies a window to an image and encodes it as a standard 8-bit image format.

use anyhow::Result;
use leveler::{pixeldata::display::DisplayBuffer, render::controller::RenderController};
use tracing::{debug, info};

use crate::{
    app::{apply_window, load_input, to_image},
    args::RenderArgs,
    CommandApplication,
};

pub struct RenderApp {
    args: RenderArgs,
}

impl RenderApp {
    pub fn new(args: RenderArgs) -> RenderApp {
        RenderApp { args }
    }

    fn render_image(&self) -> Result<()> {
        let mut output = self.args.output.clone();
        if output.extension().is_none() {
            output.set_extension("png");
        }

        let slice = load_input(&self.args.input)?;
        let mut controller = RenderController::new(slice, |image: &DisplayBuffer| {
            debug!(format = %image.format(), "Rendered");
        })?;
        apply_window(&mut controller, &self.args.window)?;

        to_image(controller.output())?.save(&output)?;
        info!(output = %output.display(), "Saved");
        Ok(())
    }
}

impl CommandApplication for RenderApp {
    fn run(&mut self) -> Result<()> {
        self.render_image()
    }
}
