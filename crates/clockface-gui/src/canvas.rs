use clockface_core::face::ClockFace;
use iced::{
    Rectangle, Renderer, Theme, mouse,
    widget::canvas::{Cache, Geometry, Program},
};

use crate::surface::FrameSurface;

/// Canvas program rendering a [`ClockFace`] into a geometry cache.
///
/// The cache must be cleared whenever the face's reading or layout changes.
pub(crate) struct ClockCanvas<'a> {
    face: &'a ClockFace,
    cache: &'a Cache,
}

impl<'a> ClockCanvas<'a> {
    pub(crate) fn new(face: &'a ClockFace, cache: &'a Cache) -> Self {
        Self { face, cache }
    }
}

impl<Message> Program<Message> for ClockCanvas<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            self.face.draw(&mut FrameSurface::new(frame));
        });

        vec![geometry]
    }
}
