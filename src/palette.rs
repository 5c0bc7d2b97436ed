//! Global color table construction and serialization.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use imgref::ImgRef;
use rgb::{ComponentBytes, Rgb};

use crate::error::EncodeError;

/// Largest number of entries a global color table can address.
pub const MAX_COLORS: usize = 256;

/// An ordered GIF global color table.
///
/// Colors are ordered by descending occurrence count across the frames the
/// table was built from; colors with equal counts keep the order they were
/// first encountered in. The ordering determines every pixel's index and
/// therefore the compressed bytes, so it is part of the output contract.
#[derive(Debug, Clone)]
pub struct ColorTable {
    entries: Vec<Rgb<u8>>,
    index: BTreeMap<[u8; 3], u8>,
}

impl ColorTable {
    /// Count pixel occurrences across `frames` (summed, not per-frame) and
    /// build the table.
    ///
    /// Fails with [`EncodeError::TooManyColors`] as soon as a 257th
    /// distinct color is seen, and with [`EncodeError::EmptyFrame`] when
    /// the frames contain no pixels at all.
    pub fn from_frames(frames: &[ImgRef<'_, Rgb<u8>>]) -> Result<Self, EncodeError> {
        // Insertion-ordered counting: `counts` keeps first-seen order,
        // `slots` maps a color to its position in it.
        let mut counts: Vec<(Rgb<u8>, u64)> = Vec::new();
        let mut slots: BTreeMap<[u8; 3], usize> = BTreeMap::new();
        for frame in frames {
            for px in frame.pixels() {
                match slots.get(&[px.r, px.g, px.b]) {
                    Some(&slot) => counts[slot].1 += 1,
                    None => {
                        if counts.len() == MAX_COLORS {
                            return Err(EncodeError::TooManyColors(counts.len() + 1));
                        }
                        slots.insert([px.r, px.g, px.b], counts.len());
                        counts.push((px, 1));
                    }
                }
            }
        }
        if counts.is_empty() {
            return Err(EncodeError::EmptyFrame { frame: 0 });
        }

        // The sort is stable, so equal counts keep first-seen order.
        counts.sort_by_key(|&(_, n)| core::cmp::Reverse(n));

        let entries: Vec<Rgb<u8>> = counts.into_iter().map(|(color, _)| color).collect();
        let mut index = BTreeMap::new();
        for (i, color) in entries.iter().enumerate() {
            index.insert([color.r, color.g, color.b], i as u8);
        }
        Ok(Self { entries, index })
    }

    /// Number of distinct colors (1..=256).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a successfully built table.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The 3-bit color table size field of the logical screen descriptor.
    ///
    /// The table holds `2^(1 + size_bits())` physical entries, the smallest
    /// power of two that fits the color count, with a minimum of 4.
    pub fn size_bits(&self) -> u8 {
        size_bits_for(self.entries.len())
    }

    /// Initial LZW code width, one more than [`size_bits`](Self::size_bits);
    /// also the leading byte of the image data block.
    pub fn min_code_size(&self) -> u8 {
        self.size_bits() + 1
    }

    /// Append each color's 3 bytes in table order, zero-padded to the
    /// declared power-of-two entry count.
    pub fn serialize_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.entries.as_bytes());
        let total = 1usize << (1 + self.size_bits());
        for _ in self.entries.len()..total {
            out.extend_from_slice(&[0, 0, 0]);
        }
    }

    /// Index of `color` in the table, if present.
    pub fn index_of(&self, color: Rgb<u8>) -> Option<u8> {
        self.index.get(&[color.r, color.g, color.b]).copied()
    }
}

/// Size field for a table of `count` colors: `ceil(log2(count))` floored at
/// 2 bits, minus one.
fn size_bits_for(count: usize) -> u8 {
    debug_assert!(count >= 1 && count <= MAX_COLORS);
    let bits = (usize::BITS - (count - 1).leading_zeros()).max(2);
    (bits - 1) as u8
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use imgref::ImgVec;

    use super::*;

    fn frame(colors: &[Rgb<u8>]) -> ImgVec<Rgb<u8>> {
        ImgVec::new(colors.to_vec(), colors.len(), 1)
    }

    const RED: Rgb<u8> = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb<u8> = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb<u8> = Rgb { r: 0, g: 0, b: 255 };

    #[test]
    fn size_bits_formula() {
        assert_eq!(size_bits_for(1), 1);
        assert_eq!(size_bits_for(2), 1);
        assert_eq!(size_bits_for(4), 1);
        assert_eq!(size_bits_for(5), 2);
        assert_eq!(size_bits_for(8), 2);
        assert_eq!(size_bits_for(15), 3);
        assert_eq!(size_bits_for(16), 3);
        assert_eq!(size_bits_for(17), 4);
        assert_eq!(size_bits_for(256), 7);
    }

    #[test]
    fn size_bits_monotonic_and_sufficient() {
        let mut prev = 0;
        for n in 1..=MAX_COLORS {
            let v = size_bits_for(n);
            assert!(v >= prev, "not monotonic at {n}");
            assert!(1usize << (1 + v) >= n, "table too small for {n} colors");
            prev = v;
        }
    }

    #[test]
    fn orders_by_descending_count() {
        let img = frame(&[GREEN, RED, RED, GREEN, GREEN, BLUE]);
        let table = ColorTable::from_frames(&[img.as_ref()]).unwrap();
        assert_eq!(table.index_of(GREEN), Some(0));
        assert_eq!(table.index_of(RED), Some(1));
        assert_eq!(table.index_of(BLUE), Some(2));
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let img = frame(&[BLUE, RED, GREEN, RED, GREEN, BLUE]);
        let table = ColorTable::from_frames(&[img.as_ref()]).unwrap();
        assert_eq!(table.index_of(BLUE), Some(0));
        assert_eq!(table.index_of(RED), Some(1));
        assert_eq!(table.index_of(GREEN), Some(2));
    }

    #[test]
    fn counts_sum_across_frames() {
        // RED dominates only when both frames are counted together.
        let a = frame(&[BLUE, BLUE, RED]);
        let b = frame(&[RED, RED, GREEN]);
        let table = ColorTable::from_frames(&[a.as_ref(), b.as_ref()]).unwrap();
        assert_eq!(table.index_of(RED), Some(0));
        assert_eq!(table.index_of(BLUE), Some(1));
        assert_eq!(table.index_of(GREEN), Some(2));
    }

    #[test]
    fn serializes_padded_to_declared_size() {
        let img = frame(&[RED, RED, GREEN, BLUE]);
        let table = ColorTable::from_frames(&[img.as_ref()]).unwrap();
        let mut out = vec![];
        table.serialize_into(&mut out);
        assert_eq!(
            out,
            [255, 0, 0, 0, 255, 0, 0, 0, 255, 0, 0, 0],
            "3 colors pad to 4 entries"
        );
    }

    #[test]
    fn rejects_257th_color() {
        let colors: Vec<Rgb<u8>> = (0..257u16)
            .map(|i| Rgb { r: i as u8, g: (i >> 8) as u8, b: 0 })
            .collect();
        let img = frame(&colors);
        let err = ColorTable::from_frames(&[img.as_ref()]).unwrap_err();
        assert!(matches!(err, EncodeError::TooManyColors(257)));
    }

    #[test]
    fn rejects_zero_colors() {
        let err = ColorTable::from_frames(&[]).unwrap_err();
        assert!(matches!(err, EncodeError::EmptyFrame { .. }));
    }

    #[test]
    fn unknown_color_is_absent() {
        let img = frame(&[RED]);
        let table = ColorTable::from_frames(&[img.as_ref()]).unwrap();
        assert_eq!(table.index_of(GREEN), None);
    }
}
