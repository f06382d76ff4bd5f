use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeImageError {
    #[error("format code {format_code:#04X} is not a supported block compressed format")]
    UnsupportedFormat { format_code: u8 },

    #[error("surface dimensions {width} x {height} are not valid")]
    InvalidDimensions { width: u32, height: u32 },
}

#[derive(Debug, Error)]
pub enum EncodeImageError {
    #[error("image dimensions {width} x {height} contain no pixels")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("image pixel count {width} x {height} would overflow")]
    PixelCountWouldOverflow { width: u32, height: u32 },

    #[error("expected image to have exactly {expected} bytes but found {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("chunk {chunk_type:?} with {length} bytes exceeds the maximum chunk length")]
    ChunkTooLarge { chunk_type: [u8; 4], length: usize },

    #[error("error compressing image data")]
    Compress(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ReadBimageError {
    #[error("expected header to have at least {expected} bytes but found {actual}")]
    NotEnoughData { expected: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum ConvertBimageError {
    #[error("error reading bimage header: {0}")]
    Read(#[from] ReadBimageError),

    #[error("error decoding surface: {0}")]
    Decode(#[from] DecodeImageError),

    #[error("error encoding PNG: {0}")]
    Encode(#[from] EncodeImageError),
}
