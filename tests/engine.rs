extern crate crossbeam;
extern crate image;
extern crate mandelbrot;

use image::Pixel as ImagePixel;
use mandelbrot::planes::{Pixel, PlaneMapper};
use mandelbrot::progress::{monitor, Completion, Quiet};
use mandelbrot::{Canvas, ChannelWeights, Framebuffer, PixelAssignment, Renderer};
use std::time::Duration;

/// Wraps a framebuffer and counts how often each pixel is written.
struct CountingCanvas {
    inner: Framebuffer,
    hits: Vec<usize>,
}

impl CountingCanvas {
    fn new(width: usize, height: usize) -> Self {
        CountingCanvas {
            inner: Framebuffer::new(width, height).unwrap(),
            hits: vec![0; width * height],
        }
    }
}

impl Canvas for CountingCanvas {
    fn paint(&mut self, assignment: PixelAssignment) {
        self.hits[assignment.y * self.inner.width() + assignment.x] += 1;
        self.inner.paint(assignment);
    }
}

fn renderer(width: usize, height: usize) -> Renderer {
    Renderer::new(width, height, ChannelWeights::default()).unwrap()
}

#[test]
fn every_pixel_is_written_exactly_once() {
    for &(width, height, threads) in &[(1, 1, 1), (7, 13, 4), (64, 48, 16), (10, 3, 100)] {
        let r = renderer(width, height);
        let canvas = CountingCanvas::new(width, height);
        let canvas = r
            .render_into(canvas, threads, Duration::from_millis(1), &mut Quiet)
            .unwrap();
        assert!(
            canvas.hits.iter().all(|h| *h == 1),
            "{}x{} on {} threads",
            width,
            height,
            threads
        );
    }
}

#[test]
fn four_by_four_matches_hand_calculation() {
    let r = renderer(4, 4);
    let fb = r.render(4, Duration::from_millis(1), &mut Quiet).unwrap();
    assert_eq!((fb.width(), fb.height()), (4, 4));

    let corner = PlaneMapper::new(4, 4).unwrap().pixel_to_point(&Pixel(0, 0));
    assert_eq!(corner.re, 0.0 / 4.0 * 2.4 - (2.4 / 2.0 + 0.5));
    assert_eq!(corner.im, 0.0 / 4.0 * 2.4 - 2.4 / 2.0);
    assert_eq!(fb.pixel(0, 0).channels(), &[0, 0, 0, 255]);
    assert_eq!(fb.pixel(1, 0).channels(), &[4, 6, 2, 255]);
    // (-0.5, 0) sits in the main cardioid
    assert_eq!(fb.pixel(2, 2).channels(), &[0, 0, 0, 255]);

    let bytes = fb.as_bytes();
    assert_eq!(&bytes[0..8], &[0, 0, 0, 255, 4, 6, 2, 255]);
    assert!(bytes.chunks(4).all(|px| px[3] == 255));
    assert_eq!(bytes, r.render_single().unwrap().as_bytes());
}

#[test]
fn zero_width_is_rejected_up_front() {
    assert!(Renderer::new(0, 10, ChannelWeights::default()).is_err());
}

#[test]
fn zero_columns_do_not_hang_the_monitor() {
    let (tx, rx) = crossbeam::channel::bounded::<PixelAssignment>(1);
    let completion = Completion::new(0);
    let aggregator = std::thread::spawn(move || {
        mandelbrot::framebuffer::aggregate(rx, CountingCanvas::new(0, 0))
    });
    monitor(&completion, tx, Duration::from_secs(3600), &mut Quiet);
    let canvas = aggregator.join().unwrap();
    assert!(canvas.hits.is_empty());
}

#[test]
fn repeated_renders_are_identical() {
    let r = renderer(200, 200);
    let reference = r.render_single().unwrap();
    for run in 0..50 {
        let fb = r.render(8, Duration::from_millis(1), &mut Quiet).unwrap();
        assert!(fb.as_bytes() == reference.as_bytes(), "run {} differs", run);
    }
}

#[test]
fn weights_change_the_palette() {
    let plain = renderer(16, 16).render_single().unwrap();
    let tinted = Renderer::new(16, 16, ChannelWeights::new(5, 7, 11))
        .unwrap()
        .render_single()
        .unwrap();
    assert!(plain.as_bytes() != tinted.as_bytes());
}
