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

//! This command prints the statistics of an image and the windows derived from them.

use anyhow::Result;
use leveler::{
    pixeldata::{stats::Statistics, winlevel::WindowLevel},
    render::controller::INITIAL_WIDEN,
};

use crate::{app::load_input, args::StatsArgs, CommandApplication};

pub struct StatsApp {
    args: StatsArgs,
}

impl StatsApp {
    pub fn new(args: StatsArgs) -> StatsApp {
        StatsApp { args }
    }
}

impl CommandApplication for StatsApp {
    fn run(&mut self) -> Result<()> {
        let slice = load_input(&self.args.input)?;
        let stats = Statistics::scan(&slice);
        let auto = WindowLevel::auto(&stats);
        let initial = auto.widened(INITIAL_WIDEN);
        let centers = stats.center_range();
        let widths = stats.width_range();

        println!("File:           {}", self.args.input.file.display());
        println!("Dimensions:     {}x{}", slice.cols(), slice.rows());
        println!("Min value:      {}", stats.min());
        println!("Max value:      {}", stats.max());
        println!("Auto window:    {auto} ({}..{})", auto.low(), auto.high());
        println!(
            "Initial window: {initial} ({}..{})",
            initial.low(),
            initial.high()
        );
        println!("Center range:   {}..={}", centers.start(), centers.end());
        println!("Width range:    {}..={}", widths.start(), widths.end());
        Ok(())
    }
}
