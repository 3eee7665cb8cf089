//! The framebuffer and the aggregator that fills it.
//!
//! Render threads never touch the image.  They push `PixelAssignment`s
//! into a bounded queue, and a single aggregator owns the canvas,
//! draining the queue until every sender has hung up.

use crossbeam::channel::Receiver;
use image::{Rgba, RgbaImage};

use errors::Error;
use planes::checked_dimensions;

/// One computed pixel, addressed by column and row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PixelAssignment {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// Opaque color for the pixel
    pub color: Rgba<u8>,
}

/// Anything the aggregator can paint into.
pub trait Canvas {
    /// Store one pixel.
    fn paint(&mut self, assignment: PixelAssignment);
}

/// The in-memory RGBA image being assembled.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    image: RgbaImage,
}

impl Framebuffer {
    /// A fully transparent black image of the given size.  Fails if
    /// either dimension does not fit the image's `u32` coordinates.
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        let (width, height) = checked_dimensions(width, height)?;
        Ok(Framebuffer {
            image: RgbaImage::new(width, height),
        })
    }

    /// Width and height as the encoder wants them.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Number of pixel columns.
    pub fn width(&self) -> usize {
        self.image.width() as usize
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.image.height() as usize
    }

    /// The color at column `x`, row `y`.
    pub fn pixel(&self, x: usize, y: usize) -> Rgba<u8> {
        *self.image.get_pixel(x as u32, y as u32)
    }

    /// The raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.image
    }

    /// Give up the framebuffer for further processing.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl Canvas for Framebuffer {
    fn paint(&mut self, assignment: PixelAssignment) {
        self.image
            .put_pixel(assignment.x as u32, assignment.y as u32, assignment.color);
    }
}

/// Drain `pixels` into `canvas` until the queue is closed and empty,
/// then hand the canvas back.  This is the only writer the canvas ever
/// has.
pub fn aggregate<C: Canvas>(pixels: Receiver<PixelAssignment>, mut canvas: C) -> C {
    let mut received = 0usize;
    for assignment in pixels.iter() {
        canvas.paint(assignment);
        received += 1;
    }
    debug!("aggregator drained {} pixels", received);
    canvas
}
