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

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "viewer")]
use crate::app::viewapp::ViewApp;
use crate::{
    app::{renderapp::RenderApp, statsapp::StatsApp},
    args::{Arguments, Command},
};

mod app;
mod args;

#[cfg(feature = "dhat")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

pub trait CommandApplication {
    /// Runs the command to completion.
    ///
    /// # Errors
    /// Any error which prevents the command from completing, reported to the user.
    fn run(&mut self) -> Result<()>;
}

fn main() -> Result<()> {
    #[cfg(feature = "dhat")]
    let _profiler = dhat::Profiler::new_heap();

    let args = Arguments::parse();
    init_logging(args.verbose);

    let mut app: Box<dyn CommandApplication> = match args.command {
        Command::Stats(args) => Box::new(StatsApp::new(args)),
        Command::Render(args) => Box::new(RenderApp::new(args)),
        #[cfg(feature = "viewer")]
        Command::View(args) => Box::new(ViewApp::new(args)),
    };
    app.run()
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
