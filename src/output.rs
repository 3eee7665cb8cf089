//! Writes a finished framebuffer to disk as a PNG.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::png::PNGEncoder;
use image::ColorType;

use errors::Error;
use framebuffer::Framebuffer;

/// Create (or truncate) `path` and encode `buffer` into it as 8-bit
/// RGBA.
pub fn write_png(path: &Path, buffer: &Framebuffer) -> Result<(), Error> {
    let output = File::create(path).map_err(|cause| Error::Create {
        path: path.display().to_string(),
        cause,
    })?;
    let (width, height) = buffer.dimensions();
    let encoder = PNGEncoder::new(BufWriter::new(output));
    encoder
        .encode(buffer.as_bytes(), width, height, ColorType::RGBA(8))
        .map_err(|cause| Error::Encode {
            path: path.display().to_string(),
            cause,
        })
}
