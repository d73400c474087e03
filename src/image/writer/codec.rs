use std::{
    io::{Cursor, Write},
    path::Path,
};

use image::{ImageError, ImageFormat, RgbImage};
use tempfile::NamedTempFile;

use crate::{
    color::CHANNELS,
    error::Error,
    image::{Image, ImageWriter},
    Result,
};

/// Encodes in the format implied by the extension of the output path.
///
/// The image is encoded into memory first and then moved into place from a
/// temporary file next to the output, so a failure never leaves a partial
/// file behind.
pub struct CodecImageWriter<'a> {
    path: &'a Path,
}

impl<'a> CodecImageWriter<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    fn path_name(&self) -> String {
        self.path.display().to_string()
    }

    fn extension(&self) -> String {
        self.path
            .extension()
            .map(|extension| extension.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn output_directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn output_format(&self) -> Result<ImageFormat> {
        ImageFormat::from_path(self.path)
            .map_err(|_| Error::UnsupportedOutputFormat(self.extension()))
    }

    fn encode(&self, image: Image, format: ImageFormat) -> Result<Vec<u8>> {
        let (width, height) = match (u32::try_from(image.width()), u32::try_from(image.height())) {
            (Ok(width), Ok(height)) => (width, height),
            _ => {
                return Err(Error::ImageTooLarge {
                    width: image.width(),
                    height: image.height(),
                })
            }
        };
        let expected = image.width() * image.height() * CHANNELS;
        let dots = image.into_raw();
        let actual = dots.len();
        let buffer = RgbImage::from_raw(width, height, dots)
            .ok_or(Error::ImageDimensionsMismatch { expected, actual })?;
        let mut encoded = Cursor::new(Vec::new());
        buffer
            .write_to(&mut encoded, format)
            .map_err(|e| match e {
                ImageError::Unsupported(_) => Error::UnsupportedOutputFormat(self.extension()),
                e => Error::FailedToEncodeImage(self.path_name(), e),
            })?;
        Ok(encoded.into_inner())
    }

    /// Replaces the output file only once all bytes reached the disk.
    fn persist(&self, encoded: &[u8]) -> Result<()> {
        let to_write_error = |e: std::io::Error| Error::UnableToWriteOutputFile(self.path_name(), e);
        let mut file = NamedTempFile::new_in(self.output_directory()).map_err(to_write_error)?;
        file.write_all(encoded).map_err(to_write_error)?;
        file.as_file().sync_all().map_err(to_write_error)?;
        file.persist(self.path).map_err(|e| to_write_error(e.error))?;
        Ok(())
    }
}

impl ImageWriter for CodecImageWriter<'_> {
    fn write_image(&mut self, image: Image) -> Result<()> {
        let format = self.output_format()?;
        let (width, height) = (image.width(), image.height());
        let encoded = self.encode(image, format)?;
        self.persist(&encoded)?;
        log::info!(
            "Wrote '{}' ({}x{}, {:?})",
            self.path_name(),
            width,
            height,
            format
        );
        Ok(())
    }
}
