use crate::error::Error;
use crate::Result;

/// Number of color channels per dot: red, green, blue.
pub const CHANNELS: usize = 3;

pub const RED: usize = 0;
pub const GREEN: usize = 1;
pub const BLUE: usize = 2;

/// ITU-R BT.709 luma coefficients in channel order.
const LUMINOSITY_WEIGHTS: [f32; CHANNELS] = [0.2126_f32, 0.7152_f32, 0.0722_f32];

/// Perceived brightness of a dot.
///
/// The result is not clamped; use [`to_channel_value`] to bring it back into
/// the 8 bit channel range.
pub fn luminosity(dot: &[u8]) -> Result<f32> {
    if dot.len() != CHANNELS {
        return Err(Error::InvalidPixel(dot.len()));
    }
    let red = dot[RED] as f32 * LUMINOSITY_WEIGHTS[RED];
    let green = dot[GREEN] as f32 * LUMINOSITY_WEIGHTS[GREEN];
    let blue = dot[BLUE] as f32 * LUMINOSITY_WEIGHTS[BLUE];
    Ok(red + green + blue)
}

/// Rounds half to even and clamps into `0..=255`.
pub fn to_channel_value(value: f32) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round_ties_even().clamp(u8::MIN as f32, u8::MAX as f32) as u8
}
