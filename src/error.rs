use std::fmt::Display;

use image::ImageError;

#[derive(Debug)]
pub enum Error {
    InputFileNotFound(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    FailedToDecodeImage(String, ImageError),
    InvalidPixel(usize),
    UnsupportedBitDepth(u16),
    ImageDimensionsMismatch { expected: usize, actual: usize },
    ImageTooLarge { width: usize, height: usize },
    UnsupportedOutputFormat(String),
    FailedToEncodeImage(String, ImageError),
    UnableToWriteOutputFile(String, std::io::Error),
    TransformationAborted,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputFileNotFound(path) => {
                write!(f, "File not found! (\"{}\")", path)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::FailedToDecodeImage(path, error) => {
                write!(f, "Unable to decode image '{}': {}", path, error)
            }
            Self::InvalidPixel(number_of_channels) => {
                write!(
                    f,
                    "Invalid pixel. Expected 3 color channels, but got {}.",
                    number_of_channels
                )
            }
            Self::UnsupportedBitDepth(bits) => {
                write!(
                    f,
                    "Unsupported bit depth of {} bits per channel. Only 8 bits are supported.",
                    bits
                )
            }
            Self::ImageDimensionsMismatch { expected, actual } => {
                write!(
                    f,
                    "Number of channel values ({}) does not match the image size ({})",
                    actual, expected
                )
            }
            Self::ImageTooLarge { width, height } => {
                write!(f, "Image of {}x{} dots is too large to encode", width, height)
            }
            Self::UnsupportedOutputFormat(extension) => {
                write!(f, "Unsupported image type! (\"{}\")", extension)
            }
            Self::FailedToEncodeImage(path, error) => {
                write!(f, "Unable to encode image '{}': {}", path, error)
            }
            Self::UnableToWriteOutputFile(path, error) => {
                write!(f, "Unable to write output file '{}': {}", path, error)
            }
            Self::TransformationAborted => {
                write!(f, "Transformation aborted before all rows were computed")
            }
        }
    }
}

impl std::error::Error for Error {}
