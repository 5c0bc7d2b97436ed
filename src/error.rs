//! Error type for encode operations.

use thiserror::Error;

/// Errors produced while encoding a GIF.
///
/// Every variant aborts the current encode; there is no partial output or
/// retry. Input shape problems are reported before any bytes are produced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// An animation was requested with an empty frame list.
    #[error("animation needs at least one frame")]
    NoFrames,
    /// A frame has zero width or height.
    #[error("frame {frame} has zero width or height")]
    EmptyFrame { frame: usize },
    /// Frame dimensions do not fit the 16-bit fields of the GIF format.
    #[error("frame dimensions {width}x{height} exceed the GIF maximum (65535)")]
    DimensionsTooLarge { width: usize, height: usize },
    /// An animation frame's dimensions differ from the first frame's.
    #[error("frame {frame} is {got:?}, expected {expected:?} from the first frame")]
    FrameSizeMismatch {
        frame: usize,
        expected: (usize, usize),
        got: (usize, usize),
    },
    /// More distinct colors than a global color table can address.
    #[error("{0} distinct colors exceed the 256-entry global color table")]
    TooManyColors(usize),
    /// A pixel was looked up in a color table that does not contain it.
    #[error("pixel color missing from the color table")]
    ColorNotInTable,
    /// A frame rate of zero cannot be converted to a frame delay.
    #[error("frame rate must be at least 1 fps")]
    ZeroFrameRate,
    /// The destination writer failed.
    #[cfg(feature = "std")]
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
