#![no_main]

extern crate libfuzzer_sys;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 8]| {
    let mut actual = [0u8; 16 * 4];
    bc13dec::bc1(&data, &mut actual, 16);

    // Every pixel is either opaque or the transparent black palette entry.
    let palette = bc13dec::color_palette(
        bc13dec::read_u16_le(&data, 0),
        bc13dec::read_u16_le(&data, 2),
        false,
    );
    for pixel in actual.chunks_exact(4) {
        assert!(palette.iter().any(|c| c == pixel));
        assert!(pixel[3] == 255 || pixel == [0u8; 4]);
    }
});
