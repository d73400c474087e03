use crate::color::CHANNELS;
use crate::error::Error;
use crate::Result;

pub mod reader;
pub mod transformer;
pub mod writer;

/// Row major grid of 8 bit RGB dots.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    width: usize,
    height: usize,
    dots: Vec<u8>,
}

impl Image {
    /// Creates a black image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            dots: vec![0; width * height * CHANNELS],
        }
    }

    /// Wraps an interleaved channel buffer.
    ///
    /// Fails with [`Error::InvalidPixel`] unless every dot carries exactly
    /// three channels.
    pub fn from_raw(width: usize, height: usize, channels: usize, dots: Vec<u8>) -> Result<Self> {
        if channels != CHANNELS {
            return Err(Error::InvalidPixel(channels));
        }
        let expected = width * height * CHANNELS;
        if dots.len() != expected {
            return Err(Error::ImageDimensionsMismatch {
                expected,
                actual: dots.len(),
            });
        }
        Ok(Self {
            width,
            height,
            dots,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[cfg(test)]
    pub(crate) fn dot(&self, column_index: usize, row_index: usize) -> &[u8] {
        let start = (row_index * self.width + column_index) * CHANNELS;
        &self.dots[start..start + CHANNELS]
    }

    pub fn row(&self, row_index: usize) -> &[u8] {
        let row_length = self.row_length();
        let start = row_index * row_length;
        &self.dots[start..start + row_length]
    }

    pub fn rows_mut(&mut self, start_row: usize, end_row: usize) -> &mut [u8] {
        let row_length = self.row_length();
        &mut self.dots[start_row * row_length..end_row * row_length]
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.dots
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.dots
    }

    fn row_length(&self) -> usize {
        self.width * CHANNELS
    }
}

pub trait ImageReader {
    fn read_image(&mut self) -> Result<Image>;
}

pub trait ImageWriter {
    fn write_image(&mut self, image: Image) -> Result<()>;
}
