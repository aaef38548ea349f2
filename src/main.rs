// What you SEE:
// • The message, in black, scrolls right-to-left along the top of the screen.
// • Only the letters are drawn; the desktop shows through everywhere else.
// • Once it has fully left the screen it comes back in from the right edge.
// • Click the text (or press ESC) to quit.

mod bitmap;
mod board;
mod config;
mod error;
mod glyph;
mod overlay;
mod region;
mod types;
mod window;

use std::process::ExitCode;

use clap::Parser;

use board::Board;
use config::Args;
use error::Error;
use overlay::Overlay;
use window::OverlayWindow;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("{}", failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

/// What the user sees on stderr when startup fails.
fn failure_message(e: &Error) -> String {
    format!("{}: {e}", env!("CARGO_PKG_NAME"))
}

fn run(args: &Args) -> Result<(), Error> {
    /* --- Text -> image ---
       Visual: nothing on screen yet; the message is drawn off-screen. */
    let font = glyph::load_font(&args.font, args.font_index)?;
    let image = glyph::rasterize(&font, &args.message, args.size);
    if let Some(path) = &args.dump_png {
        glyph::save(&image, path)?;
    }

    /* --- Image -> pixels + shape ---
       Visual: still nothing; these two decide what the window will look like. */
    let buffer = bitmap::build(&image)?;
    let region = region::extract(&image);
    log::info!(
        "clip region: {} rects, {} visible pixels, bounds {:?}",
        region.rects().len(),
        region.area(),
        region.bounds()
    );
    if region.is_empty() {
        log::warn!("{:?} has no visible pixels; the overlay will be invisible", args.message);
    }

    /* --- Window just past the right edge of the work area ---
       Visual: the first ticks slide the text in from the right. */
    let wa = args.work_area;
    let board = Board::new(wa.right, wa.top, buffer.width() as i32, buffer.height() as i32)
        .with_velocity(args.speed, 0);
    let host = OverlayWindow::open(board.w() as usize, board.h() as usize, board.x(), board.y())?;

    let mut overlay = Overlay::new(host, &buffer, &region, board, wa);
    overlay.run(args.tick_interval())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_names_the_program() {
        let e = Error::WindowInit("no display".into());
        assert_eq!(failure_message(&e), "marquee: window init error: no display");
    }
}
