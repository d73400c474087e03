use std::path::Path;

use image::DynamicImage;

use crate::{
    color::CHANNELS,
    error::Error,
    image::{Image, ImageReader},
    Result,
};

/// Decodes any format the `image` crate recognizes by its content.
pub struct CodecImageReader<'a> {
    path: &'a Path,
}

impl<'a> CodecImageReader<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    fn path_name(&self) -> String {
        self.path.display().to_string()
    }
}

impl ImageReader for CodecImageReader<'_> {
    fn read_image(&mut self) -> Result<Image> {
        if !self.path.is_file() {
            return Err(Error::InputFileNotFound(self.path_name()));
        }
        let decoded = image::ImageReader::open(self.path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| Error::UnableToOpenInputFileForReading(self.path_name(), e))?
            .decode()
            .map_err(|e| Error::FailedToDecodeImage(self.path_name(), e))?;
        log::info!(
            "Loaded '{}' ({}x{}, {:?})",
            self.path_name(),
            decoded.width(),
            decoded.height(),
            decoded.color()
        );
        into_image(decoded)
    }
}

fn into_image(decoded: DynamicImage) -> Result<Image> {
    let color = decoded.color();
    let channels = color.channel_count() as usize;
    if channels != CHANNELS {
        return Err(Error::InvalidPixel(channels));
    }
    match decoded {
        DynamicImage::ImageRgb8(buffer) => {
            let (width, height) = buffer.dimensions();
            Image::from_raw(
                width as usize,
                height as usize,
                CHANNELS,
                buffer.into_raw(),
            )
        }
        _ => Err(Error::UnsupportedBitDepth(
            color.bits_per_pixel() / channels as u16,
        )),
    }
}

#[cfg(test)]
mod test {
    use image::{DynamicImage, GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

    use super::{into_image, CodecImageReader};
    use crate::{error::Error, image::ImageReader};

    #[test]
    fn convert_rgb8() {
        let mut buffer = RgbImage::new(2, 1);
        buffer.put_pixel(1, 0, Rgb([1, 2, 3]));
        let image = into_image(DynamicImage::ImageRgb8(buffer)).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.height(), 1);
        assert_eq!(image.dot(1, 0), &[1, 2, 3]);
    }

    #[test]
    fn reject_rgba8() {
        let buffer = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 4]));
        let result = into_image(DynamicImage::ImageRgba8(buffer));
        assert!(matches!(result, Err(Error::InvalidPixel(4))));
    }

    #[test]
    fn reject_gray8() {
        let result = into_image(DynamicImage::ImageLuma8(GrayImage::new(2, 2)));
        assert!(matches!(result, Err(Error::InvalidPixel(1))));
    }

    #[test]
    fn reject_rgb16() {
        let result = into_image(DynamicImage::new_rgb16(2, 2));
        assert!(matches!(result, Err(Error::UnsupportedBitDepth(16))));
    }

    #[test]
    fn read_missing_file() {
        let path = std::env::temp_dir().join("subpixelizer-does-not-exist.png");
        let result = CodecImageReader::new(&path).read_image();
        assert!(matches!(result, Err(Error::InputFileNotFound(_))));
    }

    #[test]
    fn read_corrupt_file() {
        let directory = tempfile::tempdir().unwrap();
        let path = directory.path().join("corrupt.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let result = CodecImageReader::new(&path).read_image();
        assert!(matches!(result, Err(Error::FailedToDecodeImage(_, _))));
    }
}
