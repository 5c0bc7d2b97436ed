//! Request building and GIF stream assembly.

use alloc::vec::Vec;

use imgref::ImgRef;
use rgb::Rgb;

use crate::block;
use crate::error::EncodeError;
use crate::lzw;
use crate::palette::ColorTable;

/// Default animation frame rate, giving a 10 cs frame delay.
const DEFAULT_FPS: u16 = 10;

enum Input<'a> {
    Still(ImgRef<'a, Rgb<u8>>),
    Animation(&'a [ImgRef<'a, Rgb<u8>>]),
}

/// GIF encode request builder.
///
/// A still image produces a plain GIF 89a stream; an animation additionally
/// carries a NETSCAPE looping extension and one sub-image per frame, all
/// sharing a single global color table built from every frame's pixels.
///
/// # Example
///
/// ```rust
/// use raster2gif::{EncodeRequest, ImgVec, Rgb};
///
/// let red = Rgb { r: 255u8, g: 0, b: 0 };
/// let blue = Rgb { r: 0u8, g: 0, b: 255 };
/// let a = ImgVec::new(vec![red; 4], 2, 2);
/// let b = ImgVec::new(vec![blue; 4], 2, 2);
///
/// let frames = [a.as_ref(), b.as_ref()];
/// let bytes = EncodeRequest::animation(&frames)
///     .with_frame_rate(20)
///     .encode()?;
/// assert!(bytes.starts_with(b"GIF89a"));
/// # Ok::<(), raster2gif::EncodeError>(())
/// ```
pub struct EncodeRequest<'a> {
    input: Input<'a>,
    fps: u16,
    loop_count: u16,
}

impl<'a> EncodeRequest<'a> {
    /// Encode a single still image.
    pub fn still(frame: ImgRef<'a, Rgb<u8>>) -> Self {
        Self {
            input: Input::Still(frame),
            fps: DEFAULT_FPS,
            loop_count: 0,
        }
    }

    /// Encode an animation; frames play in order at the configured rate.
    ///
    /// All frames must share the first frame's dimensions.
    pub fn animation(frames: &'a [ImgRef<'a, Rgb<u8>>]) -> Self {
        Self {
            input: Input::Animation(frames),
            fps: DEFAULT_FPS,
            loop_count: 0,
        }
    }

    /// Set the playback rate in frames per second (default 10).
    ///
    /// The shared per-frame delay is `100 / fps` centiseconds, truncating.
    /// Still images always encode a zero delay.
    pub fn with_frame_rate(mut self, fps: u16) -> Self {
        self.fps = fps;
        self
    }

    /// Set how many times the animation repeats; 0 (the default) loops
    /// forever.
    pub fn with_loop_count(mut self, loop_count: u16) -> Self {
        self.loop_count = loop_count;
        self
    }

    /// Encode to an in-memory GIF 89a byte stream.
    pub fn encode(self) -> Result<Vec<u8>, EncodeError> {
        match self.input {
            Input::Still(frame) => {
                let (width, height) = checked_dimensions(frame, 0)?;
                let frames = [frame];
                let table = ColorTable::from_frames(&frames)?;
                assemble(&frames, width, height, &table, 0, None)
            }
            Input::Animation(frames) => {
                let first = frames.first().copied().ok_or(EncodeError::NoFrames)?;
                let (width, height) = checked_dimensions(first, 0)?;
                for (i, frame) in frames.iter().enumerate().skip(1) {
                    checked_dimensions(*frame, i)?;
                    if (frame.width(), frame.height()) != (first.width(), first.height()) {
                        return Err(EncodeError::FrameSizeMismatch {
                            frame: i,
                            expected: (first.width(), first.height()),
                            got: (frame.width(), frame.height()),
                        });
                    }
                }
                if self.fps == 0 {
                    return Err(EncodeError::ZeroFrameRate);
                }
                let delay_cs = 100 / self.fps;
                let table = ColorTable::from_frames(frames)?;
                assemble(frames, width, height, &table, delay_cs, Some(self.loop_count))
            }
        }
    }

    /// Encode and write the full byte stream to `writer`.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(self, mut writer: W) -> Result<(), EncodeError> {
        let bytes = self.encode()?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}

fn checked_dimensions(frame: ImgRef<'_, Rgb<u8>>, index: usize) -> Result<(u16, u16), EncodeError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(EncodeError::EmptyFrame { frame: index });
    }
    match (u16::try_from(frame.width()), u16::try_from(frame.height())) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(EncodeError::DimensionsTooLarge {
            width: frame.width(),
            height: frame.height(),
        }),
    }
}

/// Stitch the full stream: header, screen descriptor, color table, optional
/// looping extension, one control/descriptor/data group per frame, trailer.
fn assemble(
    frames: &[ImgRef<'_, Rgb<u8>>],
    width: u16,
    height: u16,
    table: &ColorTable,
    delay_cs: u16,
    loop_count: Option<u16>,
) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    out.extend_from_slice(block::HEADER);
    block::logical_screen_descriptor(width, height, table.size_bits(), &mut out);
    table.serialize_into(&mut out);
    if let Some(loops) = loop_count {
        block::netscape_loop(loops, &mut out);
    }
    for frame in frames {
        block::graphics_control(delay_cs, &mut out);
        block::image_descriptor(width, height, &mut out);
        let indices = frame_indices(*frame, table)?;
        lzw::image_data(&indices, table.min_code_size(), &mut out);
    }
    out.push(block::TRAILER);
    Ok(out)
}

/// One palette index per pixel, row-major.
fn frame_indices(
    frame: ImgRef<'_, Rgb<u8>>,
    table: &ColorTable,
) -> Result<Vec<u8>, EncodeError> {
    let mut indices = Vec::with_capacity(frame.width() * frame.height());
    for px in frame.pixels() {
        indices.push(table.index_of(px).ok_or(EncodeError::ColorNotInTable)?);
    }
    Ok(indices)
}
