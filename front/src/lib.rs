//! Frontends for presenting `simp` renderings on screen.

use std::time::Duration;

#[cfg(feature = "minifb")]
pub mod minifb;

/// Per-frame state. The window run method passes an instance of `Frame`
/// to the callback function on every iteration of the main loop.
pub struct Frame<'a, Win> {
    /// Elapsed time since the start of the first frame.
    pub t: Duration,
    /// Elapsed time since the start of the previous frame.
    pub dt: Duration,
    /// Reference to the window object, a render surface.
    pub win: &'a mut Win,
}

/// Common window sizes.
pub mod dims {
    /// Width and height in pixels.
    pub type Dims = (usize, usize);

    pub const QVGA_320_240: Dims = (320, 240);
    pub const VGA_640_480: Dims = (640, 480);
    pub const SVGA_800_600: Dims = (800, 600);
}
