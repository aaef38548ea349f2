// The real window: borderless, always on top, per-pixel transparent.
// Visual: only the text silhouette is drawn; everything outside it shows the desktop.

use minifb::{Key, MouseButton, Window, WindowOptions};

use crate::error::Error;
use crate::overlay::{Event, Host};

/// How often the window pumps OS events while waiting for the next tick.
const POLL_FPS: usize = 60;

pub struct OverlayWindow {
    window: Window,
    mouse_was_down: bool,
}

impl OverlayWindow {
    /// Open a `width x height` window at (x, y).
    pub fn open(width: usize, height: usize, x: i32, y: i32) -> Result<Self, Error> {
        let options = WindowOptions {
            borderless: true,
            title: false,
            resize: false,
            topmost: true,
            transparency: true,
            none: true,
            ..WindowOptions::default()
        };
        let mut window =
            Window::new("board", width, height, options).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(POLL_FPS);
        window.set_position(x as isize, y as isize);
        log::info!("overlay window {width}x{height} opened at ({x}, {y})");
        Ok(Self { window, mouse_was_down: false })
    }
}

impl Host for OverlayWindow {
    fn present(&mut self, frame: &[u32], width: usize, height: usize) -> Result<(), Error> {
        self.window
            .update_with_buffer(frame, width, height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.window.set_position(x as isize, y as isize);
    }

    fn poll(&mut self) -> Option<Event> {
        self.window.update();

        if !self.window.is_open() || self.window.is_key_down(Key::Escape) {
            return Some(Event::Close);
        }

        // React to the press, not to the button being held.
        let down = self.window.get_mouse_down(MouseButton::Left);
        let pressed = down && !self.mouse_was_down;
        self.mouse_was_down = down;
        pressed.then_some(Event::Dismiss)
    }
}
