use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

use super::Image;
use crate::{color::CHANNELS, error::Error, Result};

mod pixel;
mod subpixel;

pub use pixel::PixelDecoder;
pub use subpixel::{SubpixelEncoder, SubpixelMode};

/// A row local remapping of dots.
///
/// Every output row depends on the input row with the same index only, so
/// rows can be computed in any order.
pub trait Transformer: Send + Sync {
    fn output_width(&self, input_width: usize) -> usize;

    /// Fills `output_row`, which arrives zero initialized with
    /// `output_width(input_width) * 3` channel values.
    fn transform_row(&self, input_row: &[u8], output_row: &mut [u8]) -> Result<()>;

    fn transform(&self, image: &Image) -> Result<Image> {
        let output_width = self.output_width(image.width());
        let dots = transform_band(self, image, 0, image.height(), output_width)?;
        Image::from_raw(output_width, image.height(), CHANNELS, dots)
    }
}

fn transform_band<T: Transformer + ?Sized>(
    transformer: &T,
    image: &Image,
    start_row: usize,
    end_row: usize,
    output_width: usize,
) -> Result<Vec<u8>> {
    let row_length = output_width * CHANNELS;
    let mut band = vec![0; (end_row - start_row) * row_length];
    if row_length == 0 {
        return Ok(band);
    }
    for (row_index, output_row) in (start_row..end_row).zip(band.chunks_exact_mut(row_length)) {
        transformer.transform_row(image.row(row_index), output_row)?;
    }
    Ok(band)
}

/// Splits an image into horizontal bands and transforms them on a thread pool.
pub struct ParallelTransformer<'a> {
    threadpool: &'a ThreadPool,
}

impl<'a> ParallelTransformer<'a> {
    pub fn new(threadpool: &'a ThreadPool) -> Self {
        ParallelTransformer { threadpool }
    }

    pub fn transform(
        &self,
        transformer: Arc<dyn Transformer>,
        image: Arc<Image>,
    ) -> Result<Image> {
        let output_width = transformer.output_width(image.width());
        let height = image.height();
        let mut output = Image::new(output_width, height);
        if output_width == 0 || height == 0 {
            return Ok(output);
        }

        let band_height = self.band_height(height);
        let (sender, receiver) = mpsc::channel();
        let mut number_of_bands = 0;
        for start_row in (0..height).step_by(band_height) {
            let end_row = usize::min(start_row + band_height, height);
            let sender = sender.clone();
            let transformer = Arc::clone(&transformer);
            let image = Arc::clone(&image);
            log::debug!("Dispatching rows {}..{}", start_row, end_row);
            self.threadpool.execute(move || {
                let band = transform_band(&*transformer, &image, start_row, end_row, output_width);
                // the receiver is gone once an earlier band failed
                let _ = sender.send((start_row, end_row, band));
            });
            number_of_bands += 1;
        }
        drop(sender);

        for _ in 0..number_of_bands {
            let (start_row, end_row, band) = receiver
                .recv()
                .map_err(|_| Error::TransformationAborted)?;
            output.rows_mut(start_row, end_row).copy_from_slice(&band?);
        }
        Ok(output)
    }

    fn band_height(&self, height: usize) -> usize {
        let workers = self.threadpool.max_count().max(1);
        height.div_ceil(workers).max(1)
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use threadpool::ThreadPool;

    use super::{ParallelTransformer, PixelDecoder, SubpixelEncoder, SubpixelMode, Transformer};
    use crate::image::Image;

    fn gradient_image(width: usize, height: usize) -> Image {
        let dots = (0..width * height * 3)
            .map(|index| (index * 7 % 256) as u8)
            .collect::<Vec<u8>>();
        Image::from_raw(width, height, 3, dots).unwrap()
    }

    #[test]
    fn parallel_subpixel_matches_sequential() {
        let image = gradient_image(11, 13);
        let encoder = SubpixelEncoder::new(SubpixelMode::Color);
        let expected = encoder.transform(&image).unwrap();
        let threadpool = ThreadPool::new(4);
        let actual = ParallelTransformer::new(&threadpool)
            .transform(Arc::new(encoder), Arc::new(image))
            .unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn parallel_pixel_matches_sequential() {
        let image = gradient_image(10, 7);
        let expected = PixelDecoder.transform(&image).unwrap();
        let threadpool = ThreadPool::new(3);
        let actual = ParallelTransformer::new(&threadpool)
            .transform(Arc::new(PixelDecoder), Arc::new(image))
            .unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn more_workers_than_rows() {
        let image = gradient_image(4, 2);
        let expected = PixelDecoder.transform(&image).unwrap();
        let threadpool = ThreadPool::new(8);
        let actual = ParallelTransformer::new(&threadpool)
            .transform(Arc::new(PixelDecoder), Arc::new(image))
            .unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn zero_width_image_yields_zero_width_output() {
        let threadpool = ThreadPool::new(2);
        let output = ParallelTransformer::new(&threadpool)
            .transform(
                Arc::new(SubpixelEncoder::new(SubpixelMode::Grayscale)),
                Arc::new(Image::new(0, 3)),
            )
            .unwrap();
        assert_eq!(output.width(), 0);
        assert_eq!(output.height(), 3);
    }
}
