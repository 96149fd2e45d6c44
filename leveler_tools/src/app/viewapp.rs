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

//! This command opens a viewer for interactively adjusting the window of an image.

use std::ops::RangeInclusive;

use anyhow::Result;
use egui::{load::SizedTexture, ColorImage, TextureHandle, TextureOptions};
use leveler::{
    pixeldata::{
        display::{DisplayBuffer, DisplayFormat},
        params::WindowParams,
    },
    render::controller::{RenderController, Viewer},
};
use tracing::{error, warn};

use crate::{
    app::{apply_window, load_input},
    args::ViewArgs,
    CommandApplication,
};

pub struct ViewApp {
    args: ViewArgs,
}

impl ViewApp {
    pub fn new(args: ViewArgs) -> Self {
        Self { args }
    }
}

impl CommandApplication for ViewApp {
    fn run(&mut self) -> Result<()> {
        let slice = load_input(&self.args.input)?;
        let mut controller = RenderController::new(slice, TextureViewer::default())?;
        apply_window(&mut controller, &self.args.window)?;
        if self.args.window.center.is_some() || self.args.window.width.is_some() {
            // Values from the command line are held to the suggested ranges.
            let clamped = controller.params().clamped(controller.stats());
            if clamped != *controller.params() {
                warn!(
                    center = clamped.center,
                    width = clamped.width,
                    "Window clamped to slider ranges"
                );
                controller.set_params(clamped)?;
            }
        }

        let title = format!("leveler - {}", self.args.input.file.display());
        ImageViewer::open_viewer(title, controller)
    }
}

/// Extends a suggested slider range to include the current value. The auto window's center is
/// measured from zero and can fall below the minimum value.
fn reachable(range: RangeInclusive<i32>, value: i32) -> RangeInclusive<i32> {
    (*range.start()).min(value)..=(*range.end()).max(value)
}

fn to_color_image(image: &DisplayBuffer) -> ColorImage {
    let size = [image.cols(), image.rows()];
    match image.format() {
        DisplayFormat::Gray => ColorImage::from_gray(size, image.bytes()),
        DisplayFormat::Rgb => ColorImage::from_rgb(size, image.bytes()),
    }
}

/// Holds the latest published rendering until the UI uploads it to the texture.
#[derive(Default)]
struct TextureViewer {
    pending: Option<ColorImage>,
}

impl Viewer for TextureViewer {
    fn publish(&mut self, image: &DisplayBuffer) {
        self.pending = Some(to_color_image(image));
    }
}

struct ImageViewer {
    controller: RenderController<TextureViewer>,
    texture: TextureHandle,
    // Values as edited in the UI, which may be ahead of the controller by one frame.
    params: WindowParams,
}

impl ImageViewer {
    fn new(
        mut controller: RenderController<TextureViewer>,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        controller.viewer_mut().pending = None;
        let texture = cc.egui_ctx.load_texture(
            "leveler_output",
            to_color_image(controller.output()),
            TextureOptions::NEAREST,
        );
        let params = *controller.params();
        Self {
            controller,
            texture,
            params,
        }
    }

    fn open_viewer(title: String, controller: RenderController<TextureViewer>) -> Result<()> {
        let native_options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title(title)
                .with_inner_size([800.0, 600.0])
                .with_min_inner_size([300.0, 220.0]),
            ..Default::default()
        };

        eframe::run_native(
            "leveler_image_viewer",
            native_options,
            Box::new(move |cc| Ok(Box::new(ImageViewer::new(controller, cc)))),
        )?;

        Ok(())
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let stats = *self.controller.stats();
        let mut changed = false;

        ui.heading("Window");
        let centers = reachable(stats.center_range(), self.params.center);
        let widths = reachable(stats.width_range(), self.params.width);
        ui.horizontal(|ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.params.center, centers).show_value(false))
                .changed();
            changed |= ui.add(egui::DragValue::new(&mut self.params.center)).changed();
            ui.label("Center");
        });
        ui.horizontal(|ui| {
            changed |= ui
                .add(egui::Slider::new(&mut self.params.width, widths).show_value(false))
                .changed();
            changed |= ui.add(egui::DragValue::new(&mut self.params.width)).changed();
            ui.label("Width");
        });

        ui.separator();
        ui.label(format!("Min pixel value: {}", stats.min()));
        ui.label(format!("Max pixel value: {}", stats.max()));

        ui.separator();
        changed |= ui.checkbox(&mut self.params.invert, "Inverted").changed();
        changed |= ui
            .checkbox(&mut self.params.show_lo_clip, "Show low clipping")
            .changed();
        changed |= ui
            .checkbox(&mut self.params.show_hi_clip, "Show high clipping")
            .changed();

        ui.separator();
        if ui.button("Auto-Window").clicked() {
            if let Err(e) = self.controller.auto_window() {
                error!("Auto window failed: {e}");
            }
            self.params = *self.controller.params();
        } else if changed {
            if let Err(e) = self.controller.set_params(self.params) {
                warn!("Reverting window: {e}");
                self.params = *self.controller.params();
            }
        }
    }
}

impl eframe::App for ImageViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    let quit_btn = ui.button("Quit");
                    if quit_btn.clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.add_space(16.0);
            });
        });

        egui::SidePanel::left("window_panel").show(ctx, |ui| {
            self.controls(ui);
        });

        if let Some(image) = self.controller.viewer_mut().pending.take() {
            self.texture.set(image, TextureOptions::NEAREST);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(
                egui::Image::from_texture(SizedTexture::from_handle(&self.texture))
                    .shrink_to_fit(),
            );
        });
    }
}
