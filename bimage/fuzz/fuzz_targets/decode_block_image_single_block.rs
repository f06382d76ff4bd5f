#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (bimage::ImageFormat, &[u8])| {
    let (image_format, data) = input;

    // The largest compressed block is 16 bytes.
    // Each format uses 4x4 pixel blocks.
    let _result = bimage::bcn::rgba8_from_bcn(4, 4, data, image_format);
});
