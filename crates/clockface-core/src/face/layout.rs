use clockface_proto::config::Insets;
use iced::{Size, Vector};

/// Square region of the widget the dial is drawn into.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutBox {
    /// Side length of the square, never negative.
    pub side: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl LayoutBox {
    /// Largest square that fits the padded content area, centered in it.
    ///
    /// Content areas that padding has shrunk below zero produce an empty box.
    ///
    /// # Examples
    ///
    /// ```
    /// use clockface_core::face::LayoutBox;
    /// use clockface_proto::config::Insets;
    /// use iced::Size;
    ///
    /// let layout = LayoutBox::compute(Size::new(300.0, 200.0), &Insets::ZERO);
    /// assert_eq!(layout.side, 200.0);
    /// assert_eq!((layout.offset_x, layout.offset_y), (50.0, 0.0));
    /// ```
    pub fn compute(bounds: Size, padding: &Insets) -> Self {
        let content_width = bounds.width - padding.horizontal();
        let content_height = bounds.height - padding.vertical();
        let side = content_width.min(content_height).max(0.0);

        Self {
            side,
            offset_x: (content_width - side) / 2.0 + padding.left,
            offset_y: (content_height - side) / 2.0 + padding.top,
        }
    }

    pub fn radius(&self) -> f32 {
        self.side / 2.0
    }

    pub fn offset(&self) -> Vector {
        Vector::new(self.offset_x, self.offset_y)
    }
}
