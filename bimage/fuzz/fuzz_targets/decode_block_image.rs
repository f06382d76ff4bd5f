#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (u8, u8, u8, &[u8])| {
    // Keep dimensions small to avoid spending time on allocations.
    let (width, height, format_code, data) = input;

    if let Ok(rgba) = bimage::decode_block_image(data, width as u32, height as u32, format_code) {
        assert_eq!(width as usize * height as usize * 4, rgba.len());
    }
});
