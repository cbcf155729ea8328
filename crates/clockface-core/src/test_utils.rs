#![cfg(test)]

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Local};
use clockface_proto::ports::{
    surface::{DrawSurface, StrokeStyle},
    wall_clock::WallClock,
};
use iced::{Point, Vector};

/// Wall clock frozen at a settable instant.
#[derive(Debug)]
pub(crate) struct FixedClock {
    millis: AtomicI64,
}

impl FixedClock {
    pub(crate) fn at_millis(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    pub(crate) fn set_millis(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst))
            .expect("timestamp in range")
            .with_timezone(&Local)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SurfaceOp {
    Save,
    Restore,
    Translate(Vector),
    Circle {
        center: Point,
        radius: f32,
        style: StrokeStyle,
    },
    Line {
        from: Point,
        to: Point,
        style: StrokeStyle,
    },
}

/// Drawing surface that records every call in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub(crate) fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub(crate) fn circles(&self) -> Vec<(Point, f32, StrokeStyle)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Circle {
                    center,
                    radius,
                    style,
                } => Some((*center, *radius, *style)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn lines(&self) -> Vec<(Point, Point, StrokeStyle)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Line { from, to, style } => Some((*from, *to, *style)),
                _ => None,
            })
            .collect()
    }

    /// Every `save` is matched by a later `restore`.
    pub(crate) fn is_balanced(&self) -> bool {
        let mut depth = 0_i32;

        for op in &self.ops {
            match op {
                SurfaceOp::Save => depth += 1,
                SurfaceOp::Restore => depth -= 1,
                _ => {}
            }

            if depth < 0 {
                return false;
            }
        }

        depth == 0
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.ops.push(SurfaceOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(SurfaceOp::Restore);
    }

    fn translate(&mut self, offset: Vector) {
        self.ops.push(SurfaceOp::Translate(offset));
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, style: &StrokeStyle) {
        self.ops.push(SurfaceOp::Circle {
            center,
            radius,
            style: *style,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        self.ops.push(SurfaceOp::Line {
            from,
            to,
            style: *style,
        });
    }
}
