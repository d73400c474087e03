use super::Transformer;
use crate::{
    color::{luminosity, to_channel_value, CHANNELS},
    Result,
};

/// Recombines every run of three subpixel columns into one dot.
///
/// Output channel `c` of the dot at column `x` holds the luminosity of the
/// source dot at column `3x + c`. A trailing partial run leaves the missing
/// channels black.
pub struct PixelDecoder;

impl Transformer for PixelDecoder {
    fn output_width(&self, input_width: usize) -> usize {
        input_width.div_ceil(CHANNELS)
    }

    fn transform_row(&self, input_row: &[u8], output_row: &mut [u8]) -> Result<()> {
        for (channel_value, source_dot) in output_row.iter_mut().zip(input_row.chunks(CHANNELS)) {
            *channel_value = to_channel_value(luminosity(source_dot)?);
        }
        Ok(())
    }
}
