#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Skip headers describing very large surfaces to avoid out of memory errors.
    if let Ok((header, _)) = bimage::BimageHeader::read(data) {
        if header.width as usize * header.height as usize > 1 << 20 {
            return;
        }
    }

    let _result = bimage::png_from_bimage(data);
});
