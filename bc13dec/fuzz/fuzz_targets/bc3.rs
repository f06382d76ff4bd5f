#![no_main]

extern crate libfuzzer_sys;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 16]| {
    let mut actual = [0u8; 16 * 4];
    bc13dec::bc3(&data, &mut actual, 16);

    let ramp = bc13dec::alpha_ramp(data[0], data[1]);
    let palette = bc13dec::color_palette(
        bc13dec::read_u16_le(&data, 8),
        bc13dec::read_u16_le(&data, 10),
        true,
    );
    for pixel in actual.chunks_exact(4) {
        assert!(ramp.contains(&pixel[3]));
        assert!(palette.iter().any(|c| c[..3] == pixel[..3]));
    }
});
