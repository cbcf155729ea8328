use clockface_proto::{config::HandsConfig, ports::surface::StrokeStyle};
use iced::Color;

use super::Hand;

/// Stroke width of the rim and the tick marks.
pub const RIM_WIDTH: f32 = 3.0;

const SECOND_HAND_COLOR: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// The four stroke styles of a clock face, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceStyles {
    pub rim: StrokeStyle,
    pub hour: StrokeStyle,
    pub minute: StrokeStyle,
    pub second: StrokeStyle,
}

impl FaceStyles {
    pub fn new(hands: &HandsConfig) -> Self {
        Self {
            rim: StrokeStyle::round(Color::BLACK, RIM_WIDTH),
            hour: StrokeStyle::round(Color::BLACK, hands.hour_hand_width.as_f32()),
            minute: StrokeStyle::round(Color::BLACK, hands.minute_hand_width.as_f32()),
            second: StrokeStyle::round(SECOND_HAND_COLOR, hands.second_hand_width.as_f32()),
        }
    }

    pub fn hand(&self, hand: Hand) -> &StrokeStyle {
        match hand {
            Hand::Hour => &self.hour,
            Hand::Minute => &self.minute,
            Hand::Second => &self.second,
        }
    }

    pub fn anti_aliased(&self) -> bool {
        [self.rim, self.hour, self.minute, self.second]
            .iter()
            .any(|style| style.anti_alias)
    }
}

impl Default for FaceStyles {
    fn default() -> Self {
        Self::new(&HandsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use clockface_proto::{
        config::HandWidth,
        ports::surface::StrokeCap,
    };

    use super::*;

    #[test]
    fn default_widths_are_one_pixel() {
        let styles = FaceStyles::default();

        for hand in Hand::ALL {
            assert_eq!(styles.hand(hand).width, 1.0);
        }
        assert_eq!(styles.rim.width, RIM_WIDTH);
    }

    #[test]
    fn hand_widths_follow_config() {
        let styles = FaceStyles::new(&HandsConfig {
            hour_hand_width: HandWidth::from_pixels(9),
            minute_hand_width: HandWidth::from_pixels(6),
            second_hand_width: HandWidth::from_pixels(0),
        });

        assert_eq!(styles.hour.width, 9.0);
        assert_eq!(styles.minute.width, 6.0);
        assert_eq!(styles.second.width, 1.0);
    }

    #[test]
    fn colors_and_caps_are_fixed() {
        let styles = FaceStyles::default();

        assert_eq!(styles.rim.color, Color::BLACK);
        assert_eq!(styles.hour.color, Color::BLACK);
        assert_eq!(styles.minute.color, Color::BLACK);
        assert_eq!(styles.second.color, SECOND_HAND_COLOR);
        for style in [styles.rim, styles.hour, styles.minute, styles.second] {
            assert_eq!(style.cap, StrokeCap::Round);
            assert!(style.anti_alias);
        }
        assert!(styles.anti_aliased());
    }
}
