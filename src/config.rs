// Command line options. Everything has a default, so running with no flags shows
// "message" scrolling across a 1920 px wide work area.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

use crate::board::DEFAULT_SPEED;
use crate::types::WorkArea;

/// Scroll a line of text across the screen as a borderless, text-shaped overlay.
/// Click the text to dismiss it.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Text to show
    #[arg(short, long, default_value = "message", value_parser = NonEmptyStringValueParser::new())]
    pub message: String,

    /// TrueType font (.ttf / .ttc)
    #[arg(short, long, default_value = "../font/BIZ-UDGothicB.ttc")]
    pub font: PathBuf,

    /// Face index inside a font collection
    #[arg(long, default_value_t = 0)]
    pub font_index: u32,

    /// Text size in pixels
    #[arg(short, long, default_value_t = 50.0, value_parser = parse_size)]
    pub size: f32,

    /// Pixels moved left per tick
    #[arg(long, default_value_t = DEFAULT_SPEED, value_parser = clap::value_parser!(i32).range(1..))]
    pub speed: i32,

    /// Milliseconds between ticks
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Usable screen area as left,top,right,bottom
    #[arg(long, default_value = "0,0,1920,1080")]
    pub work_area: WorkArea,

    /// Also write the rasterized text to this PNG file
    #[arg(long)]
    pub dump_png: Option<PathBuf>,
}

/// Largest accepted text size; the canvas is only 100 px tall anyway.
const MAX_SIZE: f32 = 1000.0;

fn parse_size(s: &str) -> Result<f32, String> {
    let size: f32 = s.parse().map_err(|e| format!("{s:?}: {e}"))?;
    if !(size.is_finite() && size > 0.0 && size <= MAX_SIZE) {
        return Err(format!("size must be in (0, {MAX_SIZE}], got {s}"));
    }
    Ok(size)
}

impl Args {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
