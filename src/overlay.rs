// One overlay session: the shaped frame, the board and the window that shows them.
// All events go through `Overlay::handle`, one at a time.

use std::time::{Duration, Instant};

use crate::board::Board;
use crate::error::Error;
use crate::types::{ClipRegion, DevicePixelBuffer, WorkArea};

/// Everything that can happen to the overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Redraw the current frame.
    Paint,
    /// Timer fired: move the board one step.
    Tick,
    /// User clicked the text.
    Dismiss,
    /// Window was closed.
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// What the overlay needs from the windowing system.
pub trait Host {
    /// Show `frame` (0xAARRGGBB, row-major) as the window content.
    fn present(&mut self, frame: &[u32], width: usize, height: usize) -> Result<(), Error>;
    /// Move the window's top-left corner to screen position (x, y).
    fn move_to(&mut self, x: i32, y: i32);
    /// Pump OS events and report a user or window event, if any.
    fn poll(&mut self) -> Option<Event>;
}

/// Combine the device buffer with the clip region into what the window shows:
/// opaque colour inside the region, fully transparent outside it.
pub fn compose_frame(buffer: &DevicePixelBuffer, region: &ClipRegion) -> Vec<u32> {
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let mask = region.to_mask(w, h);
    buffer
        .as_bytes()
        .chunks_exact(DevicePixelBuffer::BYTES_PER_PIXEL)
        .zip(mask)
        .map(|(px, visible)| {
            if visible {
                let (b, g, r) = (px[0] as u32, px[1] as u32, px[2] as u32);
                0xFF00_0000 | (r << 16) | (g << 8) | b
            } else {
                0
            }
        })
        .collect()
}

pub struct Overlay<H: Host> {
    host: H,
    frame: Vec<u32>,
    width: usize,
    height: usize,
    board: Board,
    work_area: WorkArea,
}

impl<H: Host> Overlay<H> {
    /// Take ownership of the window and the prepared buffer/region.
    /// The window is released when the overlay is dropped.
    pub fn new(host: H, buffer: &DevicePixelBuffer, region: &ClipRegion, board: Board, work_area: WorkArea) -> Self {
        Self {
            host,
            frame: compose_frame(buffer, region),
            width: buffer.width() as usize,
            height: buffer.height() as usize,
            board,
            work_area,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn handle(&mut self, event: Event) -> Result<Flow, Error> {
        match event {
            Event::Paint => {
                self.host.present(&self.frame, self.width, self.height)?;
            }
            Event::Tick => {
                self.board.tick(self.work_area.right);
                log::trace!("board at ({}, {})", self.board.x(), self.board.y());
                self.host.move_to(self.board.x(), self.board.y());
                self.host.present(&self.frame, self.width, self.height)?;
            }
            Event::Dismiss | Event::Close => {
                log::info!("{event:?}: closing overlay");
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    /// Paint once, then keep dispatching events until one of them ends the session.
    /// A tick is emitted every `interval`.
    pub fn run(&mut self, interval: Duration) -> Result<(), Error> {
        self.handle(Event::Paint)?;
        let mut last_tick = Instant::now();
        loop {
            let event = match self.host.poll() {
                Some(event) => event,
                None if last_tick.elapsed() >= interval => {
                    last_tick = Instant::now();
                    Event::Tick
                }
                None => continue,
            };
            if self.handle(event)? == Flow::Exit {
                log::debug!("last position ({}, {})", self.board().x(), self.board().y());
                return Ok(());
            }
        }
    }
}
