//! Frontend using the `minifb` crate for window creation and event handling.

use std::{
    ops::ControlFlow::{self, Break},
    time::Instant,
};

use log::{error, info};
use minifb::{Key, WindowOptions};

use simp_core::{render::target::Surface, util::buf::Buf2};

use crate::{
    Frame,
    dims::{Dims, SVGA_800_600},
};

/// A lightweight wrapper of a `minifb` window, usable as a render surface.
///
/// Pixels are drawn into an in-memory buffer, which is copied to the
/// window when the frame is presented with
/// [`update_screen`][Surface::update_screen].
pub struct Window {
    /// The wrapped minifb window.
    pub imp: minifb::Window,
    /// The width and height of the window.
    pub dims: Dims,
    buf: Buf2<u32>,
}

/// Builder for creating `Window`s.
pub struct Builder<'title> {
    pub dims: Dims,
    pub title: &'title str,
    pub target_fps: Option<u32>,
    pub opts: WindowOptions,
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self {
            dims: SVGA_800_600,
            title: "// simp //",
            target_fps: Some(60),
            opts: WindowOptions::default(),
        }
    }
}

impl<'t> Builder<'t> {
    /// Sets the width and height of the window.
    pub fn dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }
    /// Sets the title of the window.
    pub fn title(mut self, title: &'t str) -> Self {
        self.title = title;
        self
    }
    /// Sets the frame rate cap of the window. `None` means unlimited
    /// frame rate (the main loop runs as fast as possible).
    pub fn target_fps(mut self, fps: Option<u32>) -> Self {
        self.target_fps = fps;
        self
    }
    /// Sets other `minifb` options.
    pub fn options(mut self, opts: WindowOptions) -> Self {
        self.opts = opts;
        self
    }

    /// Creates the window.
    pub fn build(self) -> minifb::Result<Window> {
        let Self { dims, title, target_fps, opts } = self;
        let mut imp = minifb::Window::new(title, dims.0, dims.1, opts)?;
        if let Some(fps) = target_fps {
            imp.set_target_fps(fps as usize);
        }
        let buf = Buf2::new_default(dims.0, dims.1);
        Ok(Window { imp, dims, buf })
    }
}

impl Window {
    /// Returns a window builder.
    pub fn builder() -> Builder<'static> {
        Builder::default()
    }

    /// Returns the pixel buffer of `self`.
    pub fn buf(&self) -> &Buf2<u32> {
        &self.buf
    }

    /// Runs the main loop of the program, invoking the callback on each
    /// iteration to draw the next frame.
    ///
    /// The pixel buffer is cleared to black before each call. The callback
    /// is expected to present the frame, typically by running a scene
    /// engine drawing into the window.
    ///
    /// The main loop stops and this function returns if:
    /// * the user closes the window via the GUI (e.g. titlebar close button);
    /// * the Esc key is pressed; or
    /// * the callback returns `ControlFlow::Break`.
    pub fn run<F>(&mut self, mut frame_fn: F)
    where
        F: FnMut(&mut Frame<Self>) -> ControlFlow<()>,
    {
        let start = Instant::now();
        let mut last = Instant::now();
        let mut frames = 0u32;
        loop {
            if self.should_quit() {
                break;
            }
            self.buf.fill(0);
            let frame = &mut Frame {
                t: start.elapsed(),
                dt: last.elapsed(),
                win: self,
            };
            last = Instant::now();
            frames += 1;
            if let Break(_) = frame_fn(frame) {
                break;
            }
        }
        let secs = start.elapsed().as_secs_f32();
        info!("{frames} frames in {secs:.1}s");
    }

    fn should_quit(&self) -> bool {
        !self.imp.is_open() || self.imp.is_key_down(Key::Escape)
    }
}

impl Surface for Window {
    fn width(&self) -> usize {
        self.dims.0
    }
    fn height(&self) -> usize {
        self.dims.1
    }
    fn set_pixel(&mut self, x: usize, y: usize, argb: u32) {
        self.buf.set_pixel(x, y, argb);
    }
    fn get_pixel(&self, x: usize, y: usize) -> u32 {
        self.buf.get_pixel(x, y)
    }

    /// Copies the pixel buffer to the window.
    fn update_screen(&mut self) {
        let (w, h) = self.dims;
        if let Err(e) = self.imp.update_with_buffer(self.buf.data(), w, h) {
            error!("could not update window: {e}");
        }
    }
}
