use super::Transformer;
use crate::{color::CHANNELS, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SubpixelMode {
    /// Every subpixel is a gray shade of its channel intensity.
    Grayscale,
    /// Every subpixel shows only its own channel.
    Color,
}

/// Spreads the channels of each dot over three neighbouring dots.
///
/// The output is three times as wide as the input, the height is unchanged.
/// The dot at column `x` becomes the dots at columns `3x`, `3x + 1` and
/// `3x + 2`, carrying its red, green and blue intensity respectively.
pub struct SubpixelEncoder {
    mode: SubpixelMode,
}

impl SubpixelEncoder {
    pub fn new(mode: SubpixelMode) -> Self {
        SubpixelEncoder { mode }
    }
}

impl Transformer for SubpixelEncoder {
    fn output_width(&self, input_width: usize) -> usize {
        input_width * CHANNELS
    }

    fn transform_row(&self, input_row: &[u8], output_row: &mut [u8]) -> Result<()> {
        let subpixels = output_row.chunks_exact_mut(CHANNELS);
        let intensities = input_row.chunks_exact(CHANNELS).flatten();
        for (channel_index, (subpixel, intensity)) in subpixels.zip(intensities).enumerate() {
            match self.mode {
                SubpixelMode::Grayscale => subpixel.fill(*intensity),
                SubpixelMode::Color => subpixel[channel_index % CHANNELS] = *intensity,
            }
        }
        Ok(())
    }
}
