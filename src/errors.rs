//! Everything that can go wrong between the command line and the
//! finished image file.

use std::io;

/// Failures reported by the renderer and its output stage.  The
/// arithmetic itself cannot fail; these all come from configuration,
/// the filesystem, or a broken thread lifecycle.
#[derive(Debug, Fail)]
pub enum Error {
    /// One of the image dimensions was zero.
    #[fail(display = "image dimensions must be non-zero, got {}x{}", _0, _1)]
    EmptyImage(usize, usize),

    /// One of the image dimensions does not fit in 32 bits.
    #[fail(display = "image dimensions {}x{} exceed the largest supported image", _0, _1)]
    TooLarge(usize, usize),

    /// The worker pool was asked to run with no threads.
    #[fail(display = "at least one worker thread is required")]
    NoThreads,

    /// The destination file could not be opened for writing.
    #[fail(display = "error opening file {}: {}", path, cause)]
    Create {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[fail(cause)]
        cause: io::Error,
    },

    /// The PNG encoder failed part way through.
    #[fail(display = "error encoding image {}: {}", path, cause)]
    Encode {
        /// Destination path
        path: String,
        /// Underlying I/O error
        #[fail(cause)]
        cause: io::Error,
    },

    /// A worker found the delivery queue closed before its column was
    /// finished.
    #[fail(display = "pixel queue closed while a column was still being rendered")]
    QueueClosed,

    /// A render thread panicked.
    #[fail(display = "a render thread panicked")]
    WorkerPanic,
}
