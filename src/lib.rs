#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set takes a point on the complex plane and
//! repeatedly squares it and adds the original point back, measuring
//! how quickly the result runs off to infinity.  That "velocity" is
//! the number used to color the pixel.  Points that never leave the
//! circle of radius two are the black heart of the set.
//!
//! Every pixel is independent, so the image is cut into columns and
//! the columns are rendered in parallel.  Finished pixels travel
//! through a bounded queue to a single aggregator that owns the
//! framebuffer, so no pixel is ever written by two threads, and a
//! progress monitor watches an atomic column counter to decide when
//! the queue can be closed.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

#[cfg(test)]
extern crate rand;
#[cfg(test)]
extern crate tempfile;

pub mod color;
pub mod config;
pub mod errors;
pub mod escape;
pub mod framebuffer;
pub mod output;
pub mod planes;
pub mod progress;
pub mod renderer;

pub use color::ChannelWeights;
pub use config::Config;
pub use errors::Error;
pub use framebuffer::{Canvas, Framebuffer, PixelAssignment};
pub use renderer::Renderer;
