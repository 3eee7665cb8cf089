//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a fixed window on the complex plane.  The window is
//! `HORIZONTAL_SPAN` wide and `VERTICAL_SPAN` tall, shifted half a
//! unit left of center so the whole of the set fits.
use num::Complex;
use std::convert::TryFrom;

use errors::Error;

/// Width of the sampled window on the complex plane.
pub const HORIZONTAL_SPAN: f64 = 2.4;

/// Height of the sampled window on the complex plane.
pub const VERTICAL_SPAN: f64 = 2.4;

/// Converts a width and height to the `u32` pair the image buffer
/// addresses pixels with, refusing anything that would be truncated.
pub fn checked_dimensions(width: usize, height: usize) -> Result<(u32, u32), Error> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(Error::TooLarge(width, height)),
    }
}

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels of the integral plane onto the complex window.  The
/// transform depends only on the plane's size, never on which thread
/// asks, so every pixel is sampled at the same point on every run.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The right-lower hand corner of the integral cartesian plane.
    /// The left-upper is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
}

impl PlaneMapper {
    /// Constructor.  An image with no columns or no rows has nothing
    /// to sample and is refused, as is one too large to store.
    pub fn new(width: usize, height: usize) -> Result<PlaneMapper, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage(width, height));
        }
        checked_dimensions(width, height)?;
        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
        })
    }

    /// Number of pixel columns.
    pub fn width(&self) -> usize {
        self.integral_plane.0
    }

    /// Number of pixel rows.
    pub fn height(&self) -> usize {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Given a pixel on the integral cartesian plane, return the point
    /// on the complex plane it samples.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        let width = self.integral_plane.0 as f64;
        let height = self.integral_plane.1 as f64;
        Complex::new(
            (pixel.0 as f64) / width * VERTICAL_SPAN - (VERTICAL_SPAN / 2.0 + 0.5),
            (pixel.1 as f64) / height * HORIZONTAL_SPAN - (HORIZONTAL_SPAN / 2.0),
        )
    }
}
