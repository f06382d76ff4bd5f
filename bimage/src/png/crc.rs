//! CRC-32 as defined by ISO 3309 and used for PNG chunks.

// Reversed form of the polynomial 0x04C11DB7.
const POLYNOMIAL: u32 = 0xEDB8_8320;

static CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// Update a running `crc` with `bytes`.
///
/// Start with `u32::MAX` and invert the result after the last update,
/// which allows checksumming a chunk tag and its data without concatenating them.
pub fn update_crc(crc: u32, bytes: &[u8]) -> u32 {
    bytes.iter().fold(crc, |c, b| {
        CRC_TABLE[((c ^ *b as u32) & 0xFF) as usize] ^ (c >> 8)
    })
}

/// Calculate the CRC-32 of `bytes`.
pub fn calc_crc(bytes: &[u8]) -> u32 {
    !update_crc(u32::MAX, bytes)
}
