use std::ops::{Deref, DerefMut};

use iced::{Color, Point, Vector};

/// Shape painted at both ends of a stroked line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrokeCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke parameters applied to a line or a circle outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
    pub cap: StrokeCap,
    pub anti_alias: bool,
}

impl StrokeStyle {
    /// Anti-aliased stroke with round caps.
    pub const fn round(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: StrokeCap::Round,
            anti_alias: true,
        }
    }
}

/// Abstract 2D drawing surface.
///
/// Coordinates are in pixels with the origin at the top-left corner of the
/// widget and the y axis pointing down. `save` and `restore` bracket a
/// transform scope: every `translate` issued after a `save` is undone by the
/// matching `restore`.
pub trait DrawSurface {
    fn save(&mut self);

    fn restore(&mut self);

    fn translate(&mut self, offset: Vector);

    fn stroke_circle(&mut self, center: Point, radius: f32, style: &StrokeStyle);

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle);
}

/// Transform scope that restores the wrapped surface when dropped.
///
/// # Examples
///
/// ```
/// use clockface_proto::ports::surface::{DrawSurface, SavedSurface, StrokeStyle};
/// use iced::{Point, Vector};
///
/// #[derive(Default)]
/// struct Depth(i32);
///
/// impl DrawSurface for Depth {
///     fn save(&mut self) { self.0 += 1; }
///     fn restore(&mut self) { self.0 -= 1; }
///     fn translate(&mut self, _offset: Vector) {}
///     fn stroke_circle(&mut self, _: Point, _: f32, _: &StrokeStyle) {}
///     fn stroke_line(&mut self, _: Point, _: Point, _: &StrokeStyle) {}
/// }
///
/// let mut surface = Depth::default();
/// {
///     let mut scope = SavedSurface::new(&mut surface);
///     scope.translate(Vector::new(4.0, 2.0));
/// }
/// assert_eq!(surface.0, 0);
/// ```
pub struct SavedSurface<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawSurface + ?Sized> SavedSurface<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawSurface + ?Sized> Deref for SavedSurface<'_, S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> DerefMut for SavedSurface<'_, S> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl<S: DrawSurface + ?Sized> Drop for SavedSurface<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
