//! Run configuration, built once from the command line and passed by
//! reference to everything that needs it.

use std::path::PathBuf;
use std::time::Duration;

use color::ChannelWeights;
use errors::Error;
use planes::checked_dimensions;
use progress::DEFAULT_POLL;

/// Default destination file.
pub const DEFAULT_OUTPUT: &str = "mandelbrot.png";

/// Default image width and height.
pub const DEFAULT_SIZE: usize = 2560;

/// Everything a render needs to know.  Construct it with `Config::new`
/// so the dimensions and thread count are checked.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Destination file
    pub output: PathBuf,
    /// Image width in pixels
    pub width: usize,
    /// Image height in pixels
    pub height: usize,
    /// Color channel multipliers
    pub weights: ChannelWeights,
    /// Worker threads; never more than `width` are started
    pub threads: usize,
    /// How often the progress monitor polls
    pub poll: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            output: PathBuf::from(DEFAULT_OUTPUT),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            weights: ChannelWeights::default(),
            threads: num_cpus::get(),
            poll: DEFAULT_POLL,
        }
    }
}

impl Config {
    /// Constructor.  Rejects zero-sized images, images too large to
    /// address, and an empty worker pool.
    pub fn new<P: Into<PathBuf>>(
        output: P,
        width: usize,
        height: usize,
        weights: ChannelWeights,
        threads: usize,
        poll: Duration,
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage(width, height));
        }
        checked_dimensions(width, height)?;
        if threads == 0 {
            return Err(Error::NoThreads);
        }
        Ok(Config {
            output: output.into(),
            width,
            height,
            weights,
            threads,
            poll,
        })
    }

    /// The number of workers actually started: one column each at
    /// most.
    pub fn workers(&self) -> usize {
        self.threads.min(self.width)
    }
}
