use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StegoError {
    #[error("Fractal parameters are required")]
    MissingParameters,

    #[error("Capacity exceeded: payload needs {required} carrier bits but the mask has {available}")]
    CapacityExceeded { required: u64, available: u64 },

    #[error("Invalid data length extracted: {length} bytes (maximum {max})")]
    InvalidLength { length: u32, max: u64 },

    #[error("Truncated extraction: expected {expected} bits, carrier positions ran out after {read}")]
    TruncatedExtraction { expected: u64, read: u64 },

    #[error("Invalid fractal parameters: {0}")]
    InvalidParameters(String),

    #[error("Unknown fractal variant: {0}")]
    UnknownVariant(String),

    #[error("Unknown steganography algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Image dimensions differ: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error("Mask generation cancelled")]
    Cancelled,

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Image encode error: {0}")]
    ImageEncode(String),

    #[error("Refusing lossy output format for {0}: embedded bits would not survive")]
    LossyFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StegoError>;
