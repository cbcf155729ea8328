use clockface_proto::ports::surface::{DrawSurface, StrokeCap, StrokeStyle};
use iced::{
    Point, Vector,
    widget::canvas::{Frame, LineCap, Path, Stroke},
};

/// [`DrawSurface`] over an iced canvas frame.
///
/// Anti-aliasing is a renderer-wide setting in iced, so the per-stroke flag is
/// honored by the application settings rather than here.
pub(crate) struct FrameSurface<'a> {
    frame: &'a mut Frame,
}

impl<'a> FrameSurface<'a> {
    pub(crate) fn new(frame: &'a mut Frame) -> Self {
        Self { frame }
    }
}

impl DrawSurface for FrameSurface<'_> {
    fn save(&mut self) {
        self.frame.push_transform();
    }

    fn restore(&mut self) {
        self.frame.pop_transform();
    }

    fn translate(&mut self, offset: Vector) {
        self.frame.translate(offset);
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, style: &StrokeStyle) {
        self.frame.stroke(&Path::circle(center, radius), to_stroke(style));
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.frame.stroke(&Path::line(from, to), to_stroke(style));
    }
}

pub(crate) fn to_stroke(style: &StrokeStyle) -> Stroke<'static> {
    let line_cap = match style.cap {
        StrokeCap::Butt => LineCap::Butt,
        StrokeCap::Round => LineCap::Round,
        StrokeCap::Square => LineCap::Square,
    };

    Stroke::default()
        .with_color(style.color)
        .with_width(style.width)
        .with_line_cap(line_cap)
}

#[cfg(test)]
mod tests {
    use iced::{Color, widget::canvas::Style};

    use super::*;

    #[test]
    fn stroke_carries_color_width_and_cap() {
        let stroke = to_stroke(&StrokeStyle::round(Color::BLACK, 4.0));

        assert_eq!(stroke.width, 4.0);
        assert!(matches!(stroke.line_cap, LineCap::Round));
        assert!(matches!(stroke.style, Style::Solid(color) if color == Color::BLACK));
    }

    #[test]
    fn square_caps_are_mapped() {
        let style = StrokeStyle {
            cap: StrokeCap::Square,
            ..StrokeStyle::round(Color::WHITE, 1.0)
        };

        assert!(matches!(to_stroke(&style).line_cap, LineCap::Square));
    }
}
