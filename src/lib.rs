//! # raster2gif
//!
//! GIF 89a encoder for RGB raster frames: builds the global color table,
//! compresses pixel indices with the GIF variant of LZW, and serializes the
//! surrounding block structure for still images and animations.
//!
//! The caller supplies frames that already contain at most 256 distinct
//! colors; this crate performs no quantization or dithering.
//!
//! ## Usage
//!
//! ```rust
//! use raster2gif::{EncodeRequest, ImgVec, Rgb};
//!
//! let red = Rgb { r: 255u8, g: 0, b: 0 };
//! let white = Rgb { r: 255u8, g: 255, b: 255 };
//! let frame = ImgVec::new(vec![red, white, white, red], 2, 2);
//!
//! let bytes = EncodeRequest::still(frame.as_ref()).encode()?;
//! assert!(bytes.starts_with(b"GIF89a"));
//! # Ok::<(), raster2gif::EncodeError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod block;
mod encode;
mod error;
mod lzw;
mod palette;

pub use encode::EncodeRequest;
pub use error::EncodeError;
pub use palette::{ColorTable, MAX_COLORS};

// Re-exports for callers constructing frames.
pub use imgref::{Img, ImgRef, ImgVec};
pub use rgb::Rgb;
