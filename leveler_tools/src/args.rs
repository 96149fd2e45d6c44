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

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Arguments {
    /// Log at debug level, unless overridden by `RUST_LOG`.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints the dimensions, min/max values, and default windows of an image.
    Stats(StatsArgs),

    /// Applies a window to an image and saves the result as an 8-bit image.
    Render(RenderArgs),

    /// Opens an interactive viewer for adjusting the window of an image.
    #[cfg(feature = "viewer")]
    View(ViewArgs),
}

/// Dimensions of headerless sample data, given as `COLSxROWS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawDims {
    pub cols: usize,
    pub rows: usize,
}

impl FromStr for RawDims {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((cols, rows)) = s.split_once(['x', 'X']) else {
            return Err(format!("Expected COLSxROWS, got: {s}"));
        };
        let cols = cols
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("Invalid columns '{cols}': {e}"))?;
        let rows = rows
            .trim()
            .parse::<usize>()
            .map_err(|e| format!("Invalid rows '{rows}': {e}"))?;
        Ok(Self { cols, rows })
    }
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// The 16-bit grayscale image to load. Any format the `image` crate can decode, or headerless
    /// samples when `--raw` is given. Other color types are converted to 16-bit grayscale.
    pub file: PathBuf,

    /// Read the file as headerless 16-bit unsigned samples with the given dimensions, e.g.
    /// `512x512`.
    #[arg(long, value_name = "COLSxROWS")]
    pub raw: Option<RawDims>,

    /// Headerless samples are big-endian rather than little-endian.
    #[arg(long, requires = "raw")]
    pub big_endian: bool,
}

#[derive(Args, Debug, Default)]
pub struct WindowArgs {
    /// Window center. Defaults to the initial window computed from the image.
    #[arg(long, allow_negative_numbers = true)]
    pub center: Option<i32>,

    /// Window width, must not be negative. Defaults to the initial window computed from the image.
    #[arg(long, allow_negative_numbers = true)]
    pub width: Option<i32>,

    /// Start from the auto window rather than the widened initial window.
    #[arg(long)]
    pub auto: bool,

    /// Invert the displayed values.
    #[arg(long)]
    pub invert: bool,

    /// Mark values below the window in blue instead of black.
    #[arg(long)]
    pub show_lo_clip: bool,

    /// Mark values above the window in red instead of white.
    #[arg(long)]
    pub show_hi_clip: bool,
}

#[derive(Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub window: WindowArgs,

    /// The output image. The format is determined by the extension, defaulting to PNG.
    #[arg(short, long)]
    pub output: PathBuf,
}

#[cfg(feature = "viewer")]
#[derive(Args, Debug)]
pub struct ViewArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub window: WindowArgs,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::args::{Arguments, Command, RawDims};

    #[test]
    pub fn test_raw_dims() {
        assert_eq!(
            Ok(RawDims {
                cols: 512,
                rows: 256
            }),
            "512x256".parse::<RawDims>()
        );
        assert!("512".parse::<RawDims>().is_err());
        assert!("ax2".parse::<RawDims>().is_err());
    }

    #[test]
    pub fn test_render_args() {
        let args = Arguments::try_parse_from([
            "leveler_tools",
            "render",
            "in.raw",
            "--raw",
            "4x2",
            "--big-endian",
            "--center",
            "-20",
            "--width",
            "300",
            "--show-lo-clip",
            "-o",
            "out.png",
        ])
        .unwrap();
        let Command::Render(render) = args.command else {
            panic!("expected render command");
        };
        assert_eq!(Some(RawDims { cols: 4, rows: 2 }), render.input.raw);
        assert!(render.input.big_endian);
        assert_eq!(Some(-20), render.window.center);
        assert_eq!(Some(300), render.window.width);
        assert!(render.window.show_lo_clip);
        assert!(!render.window.show_hi_clip);
        assert!(!render.window.invert);
    }

    #[test]
    pub fn test_big_endian_requires_raw() {
        let res = Arguments::try_parse_from(["leveler_tools", "stats", "in.png", "--big-endian"]);
        assert!(res.is_err());
    }
}
