mod serde_helpers;
mod validation;

use hex_color::HexColor;
use iced::Color;
use serde::Deserialize;
use std::num::NonZeroU32;

pub use validation::ConfigValidationError;

pub const DEFAULT_CONFIG_FILE_PATH: &str = "~/.config/clockface/config.toml";

/// Stroke width of a clock hand in whole pixels, never zero.
///
/// Deserialization is lenient: anything that is not a positive pixel count
/// collapses to [`HandWidth::MIN`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandWidth(NonZeroU32);

impl HandWidth {
    pub const MIN: Self = Self(NonZeroU32::MIN);

    /// Builds a width from a raw pixel count, clamping non-positive values to
    /// one pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use clockface_proto::config::HandWidth;
    ///
    /// assert_eq!(HandWidth::from_pixels(6).get(), 6);
    /// assert_eq!(HandWidth::from_pixels(0), HandWidth::MIN);
    /// assert_eq!(HandWidth::from_pixels(-4), HandWidth::MIN);
    /// ```
    pub fn from_pixels(pixels: i64) -> Self {
        u32::try_from(pixels)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .unwrap_or(Self::MIN)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }

    pub fn as_f32(self) -> f32 {
        self.0.get() as f32
    }
}

impl Default for HandWidth {
    fn default() -> Self {
        Self::MIN
    }
}

/// Configurable stroke widths of the three hands.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct HandsConfig {
    #[serde(default, alias = "hourHandWidth")]
    pub hour_hand_width: HandWidth,
    #[serde(default, alias = "minuteHandWidth", alias = "minutHand")]
    pub minute_hand_width: HandWidth,
    #[serde(default, alias = "secondHandWidth")]
    pub second_hand_width: HandWidth,
}

/// Space reserved on each side of the widget before the dial is placed.
#[derive(Deserialize, Clone, Copy, Default, Debug, PartialEq)]
pub struct Insets {
    #[serde(default)]
    pub top: f32,
    #[serde(default)]
    pub right: f32,
    #[serde(default)]
    pub bottom: f32,
    #[serde(default)]
    pub left: f32,
}

impl Insets {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// How the hand positions are derived from the system clock.
#[derive(Deserialize, Default, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadingMode {
    /// Epoch arithmetic reduced modulo 3600 for every hand. Hands do not
    /// track the civil time of day.
    #[default]
    Legacy,
    /// Local time of day, seconds and minutes in 0..60 and the hour placed on
    /// the same 60-step scale.
    Civil,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct WindowConfig {
    #[serde(default = "default_window_extent")]
    pub width: f32,
    #[serde(default = "default_window_extent")]
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_extent(),
            height: default_window_extent(),
        }
    }
}

fn default_window_extent() -> f32 {
    300.0
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Appearance {
    #[serde(default = "default_background")]
    pub background: HexColor,
}

impl Appearance {
    pub fn background_color(&self) -> Color {
        Color::from_rgba8(
            self.background.r,
            self.background.g,
            self.background.b,
            f32::from(self.background.a) / 255.0,
        )
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            background: default_background(),
        }
    }
}

fn default_background() -> HexColor {
    HexColor::rgb(255, 255, 255)
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub hands: HandsConfig,
    #[serde(default)]
    pub padding: Insets,
    #[serde(default)]
    pub reading: ReadingMode,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub appearance: Appearance,
}

fn default_log_level() -> String {
    "warn".to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            hands: HandsConfig::default(),
            padding: Insets::ZERO,
            reading: ReadingMode::default(),
            window: WindowConfig::default(),
            appearance: Appearance::default(),
        }
    }
}
