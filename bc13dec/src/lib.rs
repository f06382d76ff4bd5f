#![no_std]
//! A safe, no_std, pure Rust decoder for BC1 (DXT1) and BC3 (DXT5) blocks.
//!
//! Endpoint expansion and interpolation use truncating integer division.
//! This matches the texture pipeline these decoders were written for
//! but differs slightly from the rounding used by GPU decoders.
//!
//! Each function writes a 4x4 block of RGBA8 pixels into `decompressed_block`
//! where consecutive rows start `destination_pitch` bytes apart.

/// The number of bytes in a compressed BC1 block.
pub const BC1_BLOCK_SIZE: usize = 8;
/// The number of bytes in a compressed BC3 block.
pub const BC3_BLOCK_SIZE: usize = 16;

/// Decompress a BC1 block with 3 color + punch-through alpha or 4 color modes.
pub fn bc1(compressed_block: &[u8; 8], decompressed_block: &mut [u8], destination_pitch: usize) {
    color_block(
        compressed_block,
        decompressed_block,
        destination_pitch,
        false,
    )
}

/// Decompress a BC3 block with an interpolated alpha ramp and 4 color mode.
pub fn bc3(compressed_block: &[u8; 16], decompressed_block: &mut [u8], destination_pitch: usize) {
    let (alpha_block, color_block_bytes) = split_bc3(compressed_block);

    color_block(
        &color_block_bytes,
        decompressed_block,
        destination_pitch,
        true,
    );
    smooth_alpha_block(&alpha_block, &mut decompressed_block[3..], destination_pitch, 4);
}

fn split_bc3(compressed_block: &[u8; 16]) -> ([u8; 8], [u8; 8]) {
    let mut alpha = [0u8; 8];
    let mut color = [0u8; 8];
    alpha.copy_from_slice(&compressed_block[..8]);
    color.copy_from_slice(&compressed_block[8..]);
    (alpha, color)
}

/// Read a little-endian `u16` starting at `offset`.
#[inline]
pub fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Read a little-endian `u32` starting at `offset`.
#[inline]
pub fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Read a little-endian `u64` starting at `offset`.
#[inline]
pub fn read_u64_le(bytes: &[u8], offset: usize) -> u64 {
    let mut value = [0u8; 8];
    value.copy_from_slice(&bytes[offset..offset + 8]);
    u64::from_le_bytes(value)
}

/// Expand a packed 5-6-5 color to 8 bits per channel.
///
/// Channels are scaled with `x * 255 / max` instead of bit replication.
pub fn rgb888_from_rgb565(color: u16) -> [u8; 3] {
    let color = color as u32;
    let r = ((color >> 11) & 0x1F) * 255 / 31;
    let g = ((color >> 5) & 0x3F) * 255 / 63;
    let b = (color & 0x1F) * 255 / 31;
    [r as u8, g as u8, b as u8]
}

/// Build the 4 color palette for the packed endpoints `c0` and `c1`.
///
/// The comparison selecting the 3 color mode uses the packed values and not the expanded colors.
/// BC3 color blocks always use the 4 color mode with `only_opaque_mode`.
pub fn color_palette(c0: u16, c1: u16, only_opaque_mode: bool) -> [[u8; 4]; 4] {
    let [r0, g0, b0] = rgb888_from_rgb565(c0).map(u32::from);
    let [r1, g1, b1] = rgb888_from_rgb565(c1).map(u32::from);

    let mut ref_colors = [[0u8; 4]; 4];
    ref_colors[0] = [r0 as u8, g0 as u8, b0 as u8, 255u8];
    ref_colors[1] = [r1 as u8, g1 as u8, b1 as u8, 255u8];

    if c0 > c1 || only_opaque_mode {
        // color_2 = 2/3*color_0 + 1/3*color_1
        // color_3 = 1/3*color_0 + 2/3*color_1
        let r = (2 * r0 + r1) / 3;
        let g = (2 * g0 + g1) / 3;
        let b = (2 * b0 + b1) / 3;
        ref_colors[2] = [r as u8, g as u8, b as u8, 255u8];

        let r = (r0 + 2 * r1) / 3;
        let g = (g0 + 2 * g1) / 3;
        let b = (b0 + 2 * b1) / 3;
        ref_colors[3] = [r as u8, g as u8, b as u8, 255u8];
    } else {
        // color_2 = 1/2*color_0 + 1/2*color_1
        // color_3 = transparent black
        let r = (r0 + r1) / 2;
        let g = (g0 + g1) / 2;
        let b = (b0 + b1) / 2;
        ref_colors[2] = [r as u8, g as u8, b as u8, 255u8];

        ref_colors[3] = [0u8; 4];
    }

    ref_colors
}

/// Build the 8 entry alpha ramp for the endpoints `a0` and `a1`.
pub fn alpha_ramp(a0: u8, a1: u8) -> [u8; 8] {
    let a0 = a0 as u32;
    let a1 = a1 as u32;

    let mut alpha = [0u32; 8];
    alpha[0] = a0;
    alpha[1] = a1;

    if a0 > a1 {
        // 6 interpolated alpha values from 6/7*a0 + 1/7*a1 to 1/7*a0 + 6/7*a1.
        for i in 1..7 {
            alpha[i + 1] = ((7 - i as u32) * a0 + i as u32 * a1) / 7;
        }
    } else {
        // 4 interpolated alpha values from 4/5*a0 + 1/5*a1 to 1/5*a0 + 4/5*a1.
        for i in 1..5 {
            alpha[i + 1] = ((5 - i as u32) * a0 + i as u32 * a1) / 5;
        }
        alpha[6] = 0x00;
        alpha[7] = 0xFF;
    }

    alpha.map(|a| a as u8)
}

fn color_block(
    compressed_block: &[u8; 8],
    decompressed_block: &mut [u8],
    destination_pitch: usize,
    only_opaque_mode: bool,
) {
    let c0 = read_u16_le(compressed_block, 0);
    let c1 = read_u16_le(compressed_block, 2);

    let ref_colors = color_palette(c0, c1, only_opaque_mode);

    let mut color_indices = read_u32_le(compressed_block, 4);

    for i in 0..4 {
        for j in 0..4 {
            let idx = color_indices & 0x03;
            let start = i * destination_pitch + j * 4;
            if only_opaque_mode {
                // Alpha for BC3 comes from the separate alpha block.
                decompressed_block[start..start + 3]
                    .copy_from_slice(&ref_colors[idx as usize][..3]);
            } else {
                decompressed_block[start..start + 4].copy_from_slice(&ref_colors[idx as usize]);
            }
            color_indices >>= 2;
        }
    }
}

fn smooth_alpha_block(
    compressed_block: &[u8; 8],
    decompressed_block: &mut [u8],
    destination_pitch: usize,
    pixel_size: usize,
) {
    let alpha = alpha_ramp(compressed_block[0], compressed_block[1]);

    // The 48 index bits follow the two endpoint bytes.
    let mut indices = read_u64_le(compressed_block, 0) >> 16;
    for i in 0..4 {
        for j in 0..4 {
            let index = i * destination_pitch + j * pixel_size;
            decompressed_block[index] = alpha[(indices & 0x07) as usize];
            indices >>= 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bc1_block(c0: u16, c1: u16, indices: u32) -> [u8; 8] {
        let mut block = [0u8; 8];
        block[0..2].copy_from_slice(&c0.to_le_bytes());
        block[2..4].copy_from_slice(&c1.to_le_bytes());
        block[4..8].copy_from_slice(&indices.to_le_bytes());
        block
    }

    fn decode_bc1(block: &[u8; 8]) -> [[u8; 4]; 16] {
        let mut pixels = [[0u8; 4]; 16];
        let mut bytes = [0u8; 64];
        bc1(block, &mut bytes, 16);
        for (pixel, chunk) in pixels.iter_mut().zip(bytes.chunks_exact(4)) {
            pixel.copy_from_slice(chunk);
        }
        pixels
    }

    fn decode_bc3(block: &[u8; 16]) -> [[u8; 4]; 16] {
        let mut pixels = [[0u8; 4]; 16];
        let mut bytes = [0u8; 64];
        bc3(block, &mut bytes, 16);
        for (pixel, chunk) in pixels.iter_mut().zip(bytes.chunks_exact(4)) {
            pixel.copy_from_slice(chunk);
        }
        pixels
    }

    #[test]
    fn rgb565_expansion_truncates() {
        assert_eq!([0, 0, 0], rgb888_from_rgb565(0x0000));
        assert_eq!([255, 255, 255], rgb888_from_rgb565(0xFFFF));
        assert_eq!([255, 0, 0], rgb888_from_rgb565(0xF800));
        assert_eq!([0, 255, 0], rgb888_from_rgb565(0x07E0));
        assert_eq!([0, 0, 255], rgb888_from_rgb565(0x001F));
        // 1 * 255 / 31 = 8.2 and 1 * 255 / 63 = 4.04
        assert_eq!([8, 4, 8], rgb888_from_rgb565(0x0821));
        // 16 * 255 / 31 = 131.6 and 32 * 255 / 63 = 129.5
        assert_eq!([131, 129, 131], rgb888_from_rgb565(0x8410));
    }

    #[test]
    fn read_little_endian() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(0x0201, read_u16_le(&bytes, 0));
        assert_eq!(0x0403, read_u16_le(&bytes, 2));
        assert_eq!(0x08070605, read_u32_le(&bytes, 4));
        assert_eq!(0x0807060504030201, read_u64_le(&bytes, 0));
    }

    #[test]
    fn palette_four_color_mode() {
        // Red and blue with c0 > c1.
        let palette = color_palette(0xF800, 0x001F, false);
        assert_eq!(
            [
                [255, 0, 0, 255],
                [0, 0, 255, 255],
                [170, 0, 85, 255],
                [85, 0, 170, 255]
            ],
            palette
        );
    }

    #[test]
    fn palette_three_color_mode() {
        // Blue and red with c0 < c1.
        let palette = color_palette(0x001F, 0xF800, false);
        assert_eq!(
            [
                [0, 0, 255, 255],
                [255, 0, 0, 255],
                [127, 0, 127, 255],
                [0, 0, 0, 0]
            ],
            palette
        );
    }

    #[test]
    fn palette_equal_endpoints_uses_three_color_mode() {
        let palette = color_palette(0x8410, 0x8410, false);
        assert_eq!([131, 129, 131, 255], palette[2]);
        assert_eq!([0, 0, 0, 0], palette[3]);
    }

    #[test]
    fn palette_compares_packed_values() {
        // Dark red 0x0800 is greater than bright green 0x07E0 as an integer.
        let palette = color_palette(0x0800, 0x07E0, false);
        assert_eq!([5, 85, 0, 255], palette[2]);
        assert_eq!([2, 170, 0, 255], palette[3]);
    }

    #[test]
    fn palette_opaque_mode_ignores_order() {
        let palette = color_palette(0x001F, 0xF800, true);
        assert_eq!([85, 0, 170, 255], palette[2]);
        assert_eq!([170, 0, 85, 255], palette[3]);
    }

    #[test]
    fn bc1_solid_block() {
        let block = bc1_block(0x8410, 0x8410, 0);
        assert_eq!([[131, 129, 131, 255]; 16], decode_bc1(&block));
    }

    #[test]
    fn bc1_punch_through_alpha() {
        // All indices set to 3 selects the transparent entry.
        let block = bc1_block(0x001F, 0xF800, 0xFFFFFFFF);
        assert_eq!([[0u8; 4]; 16], decode_bc1(&block));
    }

    #[test]
    fn bc1_index_order() {
        // Pixel i uses index i % 4 so each row is 0, 1, 2, 3.
        let indices = (0..16).fold(0u32, |acc, i| acc | ((i % 4) << (i * 2)));
        let block = bc1_block(0xF800, 0x001F, indices);
        let pixels = decode_bc1(&block);
        for row in pixels.chunks_exact(4) {
            assert_eq!(
                [
                    [255, 0, 0, 255],
                    [0, 0, 255, 255],
                    [170, 0, 85, 255],
                    [85, 0, 170, 255]
                ],
                row
            );
        }
    }

    #[test]
    fn bc1_destination_pitch() {
        // Write the block into the top left of an 8x4 surface.
        let block = bc1_block(0xFFFF, 0xFFFF, 0);
        let mut surface = [0u8; 8 * 4 * 4];
        bc1(&block, &mut surface, 8 * 4);
        for row in surface.chunks_exact(8 * 4) {
            assert_eq!([255u8; 16], row[..16]);
            assert_eq!([0u8; 16], row[16..]);
        }
    }

    #[test]
    fn alpha_ramp_eight_values() {
        assert_eq!([255, 0, 218, 182, 145, 109, 72, 36], alpha_ramp(255, 0));
    }

    #[test]
    fn alpha_ramp_six_values() {
        assert_eq!([0, 255, 51, 102, 153, 204, 0, 255], alpha_ramp(0, 255));
    }

    #[test]
    fn alpha_ramp_equal_endpoints() {
        assert_eq!([100, 100, 100, 100, 100, 100, 0, 255], alpha_ramp(100, 100));
    }

    #[test]
    fn bc3_alpha_and_color() {
        let mut block = [0u8; 16];
        block[0] = 255;
        block[1] = 0;
        // Pixel i uses alpha index i % 8.
        let alpha_indices = (0..16).fold(0u64, |acc, i| acc | ((i % 8) << (i * 3)));
        block[2..8].copy_from_slice(&alpha_indices.to_le_bytes()[..6]);
        block[8..16].copy_from_slice(&bc1_block(0xF800, 0x001F, 0)[..]);

        let pixels = decode_bc3(&block);
        let expected_alpha = [255, 0, 218, 182, 145, 109, 72, 36];
        for (i, pixel) in pixels.iter().enumerate() {
            assert_eq!([255, 0, 0, expected_alpha[i % 8]], *pixel);
        }
    }

    #[test]
    fn bc3_color_never_uses_punch_through() {
        // c0 < c1 with index 3 would be transparent black for BC1.
        let mut block = [0u8; 16];
        block[0] = 255;
        block[1] = 255;
        block[8..16].copy_from_slice(&bc1_block(0x001F, 0xF800, 0xFFFFFFFF)[..]);

        let pixels = decode_bc3(&block);
        assert_eq!([[170, 0, 85, 255]; 16], pixels);
    }
}
