#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, &[u8])| {
    let (width, height, rgba8_data) = input;

    let _result = bimage::encode_image_file(width as u32, height as u32, rgba8_data);
});
