#![no_main]

use libfuzzer_sys::fuzz_target;
use raster2gif::{EncodeRequest, ImgVec, Rgb};

// Arbitrary pixel data through the public API: encoding may reject the
// input but must never panic, and accepted inputs must produce a stream
// framed by the GIF89a header and trailer.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let width = usize::from(data[0] % 64) + 1;
    let pixels: Vec<Rgb<u8>> = data[1..]
        .chunks_exact(3)
        .map(|c| Rgb { r: c[0], g: c[1], b: c[2] })
        .collect();
    let height = pixels.len() / width;
    if height == 0 {
        return;
    }
    let frame = ImgVec::new(pixels[..width * height].to_vec(), width, height);
    if let Ok(bytes) = EncodeRequest::still(frame.as_ref()).encode() {
        assert!(bytes.starts_with(b"GIF89a"));
        assert_eq!(bytes.last(), Some(&0x3B));
    }
});
