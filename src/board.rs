// The scrolling board: where the overlay window is and how it moves each tick.

/// Pixels the board moves left per tick unless configured otherwise.
pub const DEFAULT_SPEED: i32 = 10;

/// Position, fixed size and constant velocity of the overlay.
/// Velocity is subtracted, so a positive `dx` scrolls right-to-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    dx: i32,
    dy: i32,
}

impl Board {
    /// Board of size `w x h` at `(x, y)`, scrolling left at `DEFAULT_SPEED`.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h, dx: DEFAULT_SPEED, dy: 0 }
    }

    pub fn with_velocity(self, dx: i32, dy: i32) -> Self {
        Self { dx, dy, ..self }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn w(&self) -> i32 {
        self.w
    }

    pub fn h(&self) -> i32 {
        self.h
    }

    /// Advance one tick. Once the board is entirely past the left edge
    /// (strictly left of `-w`) it jumps back to `right_bound`. Only x wraps; y never does.
    pub fn tick(&mut self, right_bound: i32) {
        self.x -= self.dx;
        self.y -= self.dy;

        if self.x < -self.w {
            log::debug!("board wrapped at x={} -> {right_bound}", self.x);
            self.x = right_bound;
        }
    }
}
