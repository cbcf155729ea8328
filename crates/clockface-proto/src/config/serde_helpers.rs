use log::warn;
use serde::{Deserialize, Deserializer, de::IgnoredAny};

use super::HandWidth;

/// Shapes a hand width may take in a config document.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawHandWidth {
    Pixels(i64),
    Fractional(f64),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for HandWidth {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let width = match RawHandWidth::deserialize(deserializer)? {
            RawHandWidth::Pixels(pixels) if pixels > 0 => HandWidth::from_pixels(pixels),
            RawHandWidth::Fractional(pixels) if pixels.is_finite() && pixels >= 0.5 => {
                HandWidth::from_pixels(pixels.round() as i64)
            }
            RawHandWidth::Pixels(_) | RawHandWidth::Fractional(_) => {
                warn!("Hand width must be a positive pixel count, using 1");
                HandWidth::MIN
            }
            RawHandWidth::Other(_) => {
                warn!("Hand width is not a number, using 1");
                HandWidth::MIN
            }
        };

        Ok(width)
    }
}
