//! GIF-variant LZW compression: variable code width, CLEAR/END control
//! codes, LSB-first bit packing.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::block;

/// Highest code value the 12-bit code space allows.
const MAX_CODE: u16 = 4095;

/// LSB-first bit accumulator. The earliest code lands in the lowest-order
/// bits of the earliest byte, carrying across byte boundaries.
struct BitWriter {
    bytes: Vec<u8>,
    acc: u32,
    filled: u32,
}

impl BitWriter {
    fn new() -> Self {
        Self { bytes: Vec::new(), acc: 0, filled: 0 }
    }

    /// Append the low `width` bits of `code` at the current bit offset.
    fn write(&mut self, code: u16, width: u32) {
        self.acc |= u32::from(code) << self.filled;
        self.filled += width;
        while self.filled >= 8 {
            self.bytes.push((self.acc & 0xFF) as u8);
            self.acc >>= 8;
            self.filled -= 8;
        }
    }

    /// Zero-pad the tail to a whole byte and hand back the stream.
    fn finish(mut self) -> Vec<u8> {
        if self.filled > 0 {
            self.bytes.push((self.acc & 0xFF) as u8);
        }
        self.bytes
    }
}

/// Emission width for the next code: the bit length of the most recently
/// assigned dictionary code. The decoder recomputes the same width from its
/// own bookkeeping, so the transitions must match bit for bit.
fn code_width(last_assigned: u16) -> u32 {
    u16::BITS - last_assigned.leading_zeros()
}

/// Compress `indices` and append the complete image data block: one
/// minimum-code-size byte followed by the packed code stream in
/// length-prefixed sub-blocks.
pub(crate) fn image_data(indices: &[u8], min_code_size: u8, out: &mut Vec<u8>) {
    out.push(min_code_size);
    let packed = compress(indices, min_code_size);
    block::sub_blocks(&packed, out);
}

/// Raw LZW code stream for `indices`, packed LSB-first.
///
/// `indices` must be non-empty with every value below `1 << min_code_size`.
fn compress(indices: &[u8], min_code_size: u8) -> Vec<u8> {
    debug_assert!(!indices.is_empty());
    let clear = 1u16 << min_code_size;
    let end = clear + 1;

    // A run is tracked by its dictionary code; single symbols are their own
    // codes, so only multi-symbol runs need explicit entries.
    let mut dict: BTreeMap<(u16, u8), u16> = BTreeMap::new();
    let mut next_code = end;
    let mut width = code_width(end);

    let mut bits = BitWriter::new();
    bits.write(clear, width);

    let mut run = u16::from(indices[0]);
    for &sym in &indices[1..] {
        if let Some(&code) = dict.get(&(run, sym)) {
            run = code;
        } else if next_code >= MAX_CODE {
            // The next assignment would not fit in 12 bits: flush the run,
            // tell the decoder to start over, and discard the dictionary.
            bits.write(run, width);
            bits.write(clear, width);
            dict.clear();
            next_code = end;
            width = code_width(end);
            run = u16::from(sym);
        } else {
            bits.write(run, width);
            next_code += 1;
            width = code_width(next_code);
            dict.insert((run, sym), next_code);
            run = u16::from(sym);
        }
    }
    bits.write(run, width);
    bits.write(end, width);
    bits.finish()
}
