//! GIF block serialization: the length-prefixed sub-block convention and
//! the fixed-layout descriptor and extension blocks.

use alloc::vec::Vec;

pub(crate) const HEADER: &[u8; 6] = b"GIF89a";
pub(crate) const TRAILER: u8 = 0x3B;

const EXTENSION: u8 = 0x21;
const GRAPHIC_CONTROL_LABEL: u8 = 0xF9;
const APPLICATION_LABEL: u8 = 0xFF;
const IMAGE_SEPARATOR: u8 = 0x2C;
const BLOCK_TERMINATOR: u8 = 0x00;
const SUB_BLOCK_MAX: usize = 255;

/// Split `data` into length-prefixed groups of at most 255 bytes and append
/// one zero-length terminator. Empty input produces only the terminator.
pub(crate) fn sub_blocks(data: &[u8], out: &mut Vec<u8>) {
    for chunk in data.chunks(SUB_BLOCK_MAX) {
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
    out.push(BLOCK_TERMINATOR);
}

/// Logical screen descriptor: canvas size plus the packed color table byte
/// (global table present, color resolution 001, not sorted).
pub(crate) fn logical_screen_descriptor(width: u16, height: u16, size_bits: u8, out: &mut Vec<u8>) {
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(0x90 | size_bits);
    out.push(0x00); // background color index
    out.push(0x00); // pixel aspect ratio
}

/// Graphics control extension: fixed packed byte (no user input, no
/// transparency) and the frame delay in centiseconds.
pub(crate) fn graphics_control(delay_cs: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&[EXTENSION, GRAPHIC_CONTROL_LABEL, 0x04, 0x04]);
    out.extend_from_slice(&delay_cs.to_le_bytes());
    out.push(0x00); // transparent color index
    out.push(BLOCK_TERMINATOR);
}

/// NETSCAPE 2.0 application extension. A loop count of zero repeats the
/// animation forever.
pub(crate) fn netscape_loop(loop_count: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&[EXTENSION, APPLICATION_LABEL, 0x0B]);
    out.extend_from_slice(b"NETSCAPE2.0");
    out.extend_from_slice(&[0x03, 0x01]);
    out.extend_from_slice(&loop_count.to_le_bytes());
    out.push(BLOCK_TERMINATOR);
}

/// Image descriptor at the origin: no local color table, no interlace.
pub(crate) fn image_descriptor(width: u16, height: u16, out: &mut Vec<u8>) {
    out.extend_from_slice(&[IMAGE_SEPARATOR, 0, 0, 0, 0]);
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.push(0x00);
}
