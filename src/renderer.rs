//! The work partitioner and dispatcher.
//!
//! Each pixel column is one unit of work.  A pool of scoped worker
//! threads pulls column indices from a shared iterator, walks the rows
//! of each column in order, and pushes every finished pixel into a
//! bounded queue.  A single aggregator thread drains that queue into
//! the framebuffer, while the calling thread runs the progress monitor.
//! The monitor holds the last sender that isn't owned by a worker, so
//! the queue closes only once every column has been delivered.

use std::ops::Range;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam::channel::{bounded, Sender};
use crossbeam::thread::ScopedJoinHandle;
use image::Rgba;
use itertools::iproduct;

use color::ChannelWeights;
use config::Config;
use errors::Error;
use escape::divergence;
use framebuffer::{aggregate, Canvas, Framebuffer, PixelAssignment};
use planes::{Pixel, PlaneMapper};
use progress::{monitor, Completion, Progress};

type Columns = Arc<Mutex<Range<usize>>>;

/// Renders the Mandelbrot set onto a fixed window of the complex plane
/// at the given pixel size and coloring.  Once built, nothing about it
/// changes; it can be shared by reference across threads.
#[derive(Debug)]
pub struct Renderer {
    plane: PlaneMapper,
    weights: ChannelWeights,
}

impl Renderer {
    /// Requires the width and height of the image and the channel
    /// weights.  Fails if either dimension is zero.
    pub fn new(width: usize, height: usize, weights: ChannelWeights) -> Result<Self, Error> {
        let plane = PlaneMapper::new(width, height)?;
        Ok(Renderer { plane, weights })
    }

    /// Build a renderer for a checked configuration.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Renderer::new(config.width, config.height, config.weights)
    }

    /// The plane this renderer samples.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The final color of a single pixel.
    pub fn color_at(&self, pixel: &Pixel) -> Rgba<u8> {
        self.weights.paint(divergence(self.plane.pixel_to_point(pixel)))
    }

    /// Compute every row of column `x` and send each pixel down
    /// `pixels`, blocking while the queue is full.
    pub fn render_column(&self, x: usize, pixels: &Sender<PixelAssignment>) -> Result<(), Error> {
        for y in 0..self.plane.height() {
            let color = self.color_at(&Pixel(x, y));
            pixels
                .send(PixelAssignment { x, y, color })
                .map_err(|_| Error::QueueClosed)?;
        }
        Ok(())
    }

    /// The body of one worker: take columns until there are none left.
    /// Returns how many columns this worker rendered.
    fn work(
        &self,
        id: usize,
        columns: &Columns,
        pixels: &Sender<PixelAssignment>,
        completion: &Completion,
    ) -> Result<usize, Error> {
        let mut rendered = 0;
        loop {
            // A poisoned lock means another worker died holding it.
            let column = match columns.lock() {
                Ok(mut remaining) => remaining.next(),
                Err(_) => {
                    completion.abandon();
                    return Err(Error::WorkerPanic);
                }
            };
            match column {
                Some(x) => {
                    if let Err(e) = self.render_column(x, pixels) {
                        completion.abandon();
                        return Err(e);
                    }
                    completion.finish_column();
                    rendered += 1;
                }
                None => {
                    break;
                }
            }
        }
        debug!("worker {} rendered {} columns", id, rendered);
        Ok(rendered)
    }

    /// The reference implementation: every pixel, in order, on the
    /// calling thread.
    pub fn render_single(&self) -> Result<Framebuffer, Error> {
        let mut buffer = Framebuffer::new(self.plane.width(), self.plane.height())?;
        for (x, y) in iproduct!(0..self.plane.width(), 0..self.plane.height()) {
            let color = self.color_at(&Pixel(x, y));
            buffer.paint(PixelAssignment { x, y, color });
        }
        Ok(buffer)
    }

    /// Render the whole image with `threads` workers, reporting to
    /// `progress` every `poll`.
    pub fn render<P: Progress + ?Sized>(
        &self,
        threads: usize,
        poll: Duration,
        progress: &mut P,
    ) -> Result<Framebuffer, Error> {
        let canvas = Framebuffer::new(self.plane.width(), self.plane.height())?;
        self.render_into(canvas, threads, poll, progress)
    }

    /// Render the whole image into `canvas`.  The canvas is moved into
    /// the aggregator thread for the duration of the render and handed
    /// back once the queue has been drained.
    pub fn render_into<C, P>(
        &self,
        canvas: C,
        threads: usize,
        poll: Duration,
        progress: &mut P,
    ) -> Result<C, Error>
    where
        C: Canvas + Send,
        P: Progress + ?Sized,
    {
        if threads == 0 {
            return Err(Error::NoThreads);
        }
        let width = self.plane.width();
        let workers = threads.min(width);
        let completion = Completion::new(width);
        let columns: Columns = Arc::new(Mutex::new(0..width));
        let (sender, receiver) = bounded(self.plane.height());

        info!(
            "rendering {}x{} with {} workers",
            width,
            self.plane.height(),
            workers
        );

        let outcome = crossbeam::scope(|spawner| {
            let aggregator = spawner.spawn(move |_| aggregate(receiver, canvas));
            let completion = &completion;
            let handles: Vec<ScopedJoinHandle<Result<usize, Error>>> = (0..workers)
                .map(|id| {
                    let columns = columns.clone();
                    let pixels = sender.clone();
                    spawner.spawn(move |_| self.work(id, &columns, &pixels, completion))
                })
                .collect();

            monitor(completion, sender, poll, progress);

            let results: Vec<_> = handles.into_iter().map(|handle| handle.join()).collect();
            (aggregator.join(), results)
        })
        .map_err(|_| Error::WorkerPanic)?;

        let (canvas, results) = outcome;
        let canvas = canvas.map_err(|_| Error::WorkerPanic)?;
        let mut rendered = 0;
        for result in results {
            rendered += result.map_err(|_| Error::WorkerPanic)??;
        }
        debug!("{} columns rendered", rendered);
        Ok(canvas)
    }
}
