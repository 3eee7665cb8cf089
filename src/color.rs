//! Turns a divergence score into a pixel color.
//!
//! The score is scaled to an 8-bit intensity, and each channel is the
//! intensity times that channel's weight, wrapped modulo 255.  Note
//! the modulus is 255, not 256: a product that is an exact multiple
//! of 255 comes out black.
//!
//! Weights may be negative.  The product keeps its sign through the
//! remainder and is then truncated to its low byte, so a weight of -2
//! at intensity 2 gives 252.

use image::{Pixel, Rgba};

/// Modulus applied to every weighted channel.
pub const CHANNEL_MODULUS: i64 = 255;

/// Scale a divergence score to an 8-bit intensity, truncating.
pub fn intensity(score: f64) -> u32 {
    (score * 255.0) as u32
}

/// One weighted color channel.  The product wraps on overflow.
pub fn channel(weight: i64, intensity: u32) -> u8 {
    (weight.wrapping_mul(i64::from(intensity)) % CHANNEL_MODULUS) as u8
}

/// The red, green and blue multipliers applied to the intensity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChannelWeights {
    /// Red multiplier
    pub red: i64,
    /// Green multiplier
    pub green: i64,
    /// Blue multiplier
    pub blue: i64,
}

impl Default for ChannelWeights {
    fn default() -> Self {
        ChannelWeights {
            red: 2,
            green: 3,
            blue: 1,
        }
    }
}

impl ChannelWeights {
    /// Constructor.
    pub fn new(red: i64, green: i64, blue: i64) -> Self {
        ChannelWeights { red, green, blue }
    }

    /// The opaque color for a divergence score.
    pub fn paint(&self, score: f64) -> Rgba<u8> {
        let i = intensity(score);
        Rgba::from_channels(
            channel(self.red, i),
            channel(self.green, i),
            channel(self.blue, i),
            255,
        )
    }
}
