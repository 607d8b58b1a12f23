//! Pure power-law transfer curves.

use serde::{Deserialize, Serialize};

/// A display gamma curve: `encoded = linear^(1/g)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GammaCurve(pub f64);

impl GammaCurve {
    /// Rec. 709 / BT.1886 style display gamma.
    pub const DISPLAY_2_2: Self = Self(2.2);
    /// Effective encoding gamma of the limited-range delivery codec.
    pub const CODEC_1_96: Self = Self(1.96);

    /// Convert from encoded to linear light. Non-positive input maps to 0.
    #[inline]
    pub fn to_linear(self, v: f64) -> f64 {
        if v <= 0.0 {
            0.0
        } else {
            v.powf(self.0)
        }
    }

    /// Convert from linear light to encoded.
    #[inline]
    pub fn from_linear(self, v: f64) -> f64 {
        if v <= 0.0 || self.0 == 0.0 {
            0.0
        } else {
            v.powf(1.0 / self.0)
        }
    }

    /// Re-express a value encoded with `self` under `target`.
    #[inline]
    pub fn reencode(self, v: f64, target: Self) -> f64 {
        target.from_linear(self.to_linear(v))
    }
}
