// One error type for the whole program.
// Every variant states *where* things went wrong; all of them are fatal at startup
// except WindowUpdate, which can also surface mid-run when the window goes away.
use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The font file could not be read from disk.
    #[error("cannot read font {}: {source}", path.display())]
    FontRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The font bytes were read but are not a usable TrueType font.
    #[error("cannot parse font {}: {reason}", path.display())]
    FontParse { path: PathBuf, reason: String },

    /// The device pixel buffer could not be acquired.
    #[error("cannot allocate {bytes} bytes for a {width}x{height} pixel buffer")]
    Allocation {
        width: u32,
        height: u32,
        bytes: usize,
        #[source]
        source: TryReserveError,
    },

    #[error("window init error: {0}")]
    WindowInit(String),

    #[error("window update error: {0}")]
    WindowUpdate(String),

    #[error("cannot write {}: {source}", path.display())]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
