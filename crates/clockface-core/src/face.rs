//! Analog clock face: a rim with sixty ticks and three hands.
//!
//! The face is toolkit-agnostic. A host constructs it from [`Config`], feeds
//! it the widget bounds through [`ClockFace::layout`], renders it through any
//! [`DrawSurface`] and forwards [`crate::event_bus::BusEvent::Tick`] events
//! to [`ClockFace::tick`].

pub mod dial;

mod layout;
mod reading;
mod style;

use std::sync::Arc;

use clockface_proto::{
    config::{Config, Insets, ReadingMode},
    ports::{
        surface::{DrawSurface, SavedSurface},
        wall_clock::WallClock,
    },
};
use iced::{Point, Size};
use log::{debug, trace};

pub use layout::LayoutBox;
pub use reading::ClockReading;
pub use style::{FaceStyles, RIM_WIDTH};

use crate::{face_context::FaceContext, timer::RedrawTimer};
use dial::Hand;

#[derive(Debug)]
pub struct ClockFace {
    styles: FaceStyles,
    padding: Insets,
    mode: ReadingMode,
    layout: LayoutBox,
    reading: ClockReading,
    clock: Arc<dyn WallClock>,
    context: FaceContext,
    timer: RedrawTimer,
}

impl ClockFace {
    /// Builds the face, reads the clock once and arms the first redraw.
    ///
    /// The layout stays empty until the host calls [`ClockFace::layout`].
    pub fn new(config: &Config, clock: Arc<dyn WallClock>, context: FaceContext) -> Self {
        let mut face = Self {
            styles: FaceStyles::new(&config.hands),
            padding: config.padding,
            mode: config.reading,
            layout: LayoutBox::default(),
            reading: ClockReading::read(config.reading, clock.as_ref()),
            clock,
            context,
            timer: RedrawTimer::default(),
        };

        face.timer.arm(&face.context);
        face
    }

    pub fn styles(&self) -> &FaceStyles {
        &self.styles
    }

    pub fn layout_box(&self) -> LayoutBox {
        self.layout
    }

    pub fn reading(&self) -> ClockReading {
        self.reading
    }

    pub fn has_pending_redraw(&self) -> bool {
        self.timer.is_pending()
    }

    /// Recomputes the dial square for the widget bounds.
    pub fn layout(&mut self, bounds: Size) -> LayoutBox {
        let layout = LayoutBox::compute(bounds, &self.padding);

        if layout != self.layout {
            debug!(
                "Clock face laid out: side {} at ({}, {})",
                layout.side, layout.offset_x, layout.offset_y
            );
        }

        self.layout = layout;
        layout
    }

    /// Issues the rim, the ticks and the hands for the current reading.
    ///
    /// The translation to the layout box is scoped: the surface transform is
    /// back to its previous state when this returns.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        let mut surface = SavedSurface::new(surface);
        surface.translate(self.layout.offset());

        let radius = self.layout.radius();
        let center = Point::new(radius, radius);

        surface.stroke_circle(center, radius, &self.styles.rim);

        for tick in dial::ticks() {
            surface.stroke_line(
                dial::dial_point(radius, tick.angle, tick.inner),
                dial::dial_point(radius, tick.angle, tick.outer),
                &self.styles.rim,
            );
        }

        for hand in Hand::ALL {
            surface.stroke_line(
                center,
                hand.tip(radius, &self.reading),
                self.styles.hand(hand),
            );
        }
    }

    /// Timer callback: refreshes the reading and schedules the next redraw.
    pub fn tick(&mut self) {
        self.reading = ClockReading::read(self.mode, self.clock.as_ref());
        trace!("Clock reading updated: {:?}", self.reading);

        self.timer.arm(&self.context);
    }
}

#[cfg(test)]
mod tests {
    use std::{num::NonZeroUsize, time::Duration};

    use clockface_proto::config::{HandWidth, HandsConfig};
    use iced::Vector;
    use tokio::{runtime::Handle, time::sleep};

    use super::*;
    use crate::{
        event_bus::{BusEvent, EventBus, EventReceiver},
        test_utils::{FixedClock, RecordingSurface, SurfaceOp},
    };

    fn face_with(config: &Config, millis: i64) -> (ClockFace, EventReceiver) {
        let bus = EventBus::new(NonZeroUsize::new(8).expect("capacity"));
        let receiver = bus.receiver();
        let context = FaceContext::new(bus.sender(), Handle::current());
        let face = ClockFace::new(config, Arc::new(FixedClock::at_millis(millis)), context);

        (face, receiver)
    }

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-3 && (actual.y - expected.y).abs() < 1e-3,
            "{actual:?} != {expected:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn construction_reads_clock_and_arms_timer() {
        let (face, _receiver) = face_with(&Config::default(), 900_000);

        assert_eq!(face.reading(), ClockReading::from_epoch_millis(900_000));
        assert_eq!(face.layout_box(), LayoutBox::default());
        assert!(face.has_pending_redraw());
    }

    #[tokio::test(start_paused = true)]
    async fn construction_applies_hand_widths() {
        let config = Config {
            hands: HandsConfig {
                hour_hand_width: HandWidth::from_pixels(8),
                minute_hand_width: HandWidth::from_pixels(4),
                second_hand_width: HandWidth::from_pixels(-2),
            },
            ..Config::default()
        };
        let (face, _receiver) = face_with(&config, 0);

        assert_eq!(face.styles().hour.width, 8.0);
        assert_eq!(face.styles().minute.width, 4.0);
        assert_eq!(face.styles().second.width, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn layout_applies_configured_padding() {
        let config = Config {
            padding: Insets::uniform(10.0),
            ..Config::default()
        };
        let (mut face, _receiver) = face_with(&config, 0);

        let layout = face.layout(Size::new(220.0, 120.0));

        assert_eq!(layout.side, 100.0);
        assert_eq!(layout.offset(), Vector::new(60.0, 10.0));
        assert_eq!(face.layout_box(), layout);
        assert_eq!(face.layout(Size::new(220.0, 120.0)), layout);
    }

    #[tokio::test(start_paused = true)]
    async fn draw_issues_rim_ticks_and_hands_in_scope() {
        let (mut face, _receiver) = face_with(&Config::default(), 900_000);
        face.layout(Size::new(300.0, 200.0));

        let mut surface = RecordingSurface::default();
        face.draw(&mut surface);

        let ops = surface.ops();
        assert_eq!(ops.first(), Some(&SurfaceOp::Save));
        assert_eq!(ops.get(1), Some(&SurfaceOp::Translate(Vector::new(50.0, 0.0))));
        assert_eq!(ops.last(), Some(&SurfaceOp::Restore));
        assert!(surface.is_balanced());

        let circles = surface.circles();
        assert_eq!(circles.len(), 1);
        assert_eq!(circles[0].0, Point::new(100.0, 100.0));
        assert_eq!(circles[0].1, 100.0);
        assert_eq!(circles[0].2, face.styles().rim);

        let lines = surface.lines();
        assert_eq!(lines.len(), 60 + 3);
        assert!(lines[..60].iter().all(|line| line.2 == face.styles().rim));
    }

    #[tokio::test(start_paused = true)]
    async fn draw_places_hands_from_reading() {
        let (mut face, _receiver) = face_with(&Config::default(), 900_000);
        face.layout(Size::new(300.0, 200.0));

        let mut surface = RecordingSurface::default();
        face.draw(&mut surface);

        let lines = surface.lines();
        let [hour, minute, second] = [&lines[60], &lines[61], &lines[62]];
        let center = Point::new(100.0, 100.0);

        assert_eq!(hour.0, center);
        assert_close(hour.1, Point::new(100.0, 40.0));
        assert_eq!(hour.2, face.styles().hour);

        assert_eq!(minute.0, center);
        assert_close(minute.1, Point::new(180.0, 100.0));
        assert_eq!(minute.2, face.styles().minute);

        // 900 seconds on the 60-step scale is fifteen full turns.
        assert_eq!(second.0, center);
        assert_close(second.1, Point::new(100.0, 5.0));
        assert_eq!(second.2, face.styles().second);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_marks_use_both_radii() {
        let (mut face, _receiver) = face_with(&Config::default(), 0);
        face.layout(Size::new(200.0, 200.0));

        let mut surface = RecordingSurface::default();
        face.draw(&mut surface);

        let lines = surface.lines();
        assert_close(lines[0].0, Point::new(15.0, 100.0));
        assert_close(lines[0].1, Point::new(5.0, 100.0));
        assert_close(lines[1].0, dial::dial_point(100.0, tick_angle(1), 0.90));
        assert_close(lines[1].1, dial::dial_point(100.0, tick_angle(1), 0.95));
    }

    fn tick_angle(index: usize) -> f64 {
        dial::Tick::new(index).angle
    }

    #[tokio::test(start_paused = true)]
    async fn empty_layout_still_draws_balanced() {
        let (face, _receiver) = face_with(&Config::default(), 0);

        let mut surface = RecordingSurface::default();
        face.draw(&mut surface);

        assert!(surface.is_balanced());
        assert_eq!(surface.circles()[0].1, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn each_pass_leaves_exactly_one_pending_redraw() {
        let (mut face, mut receiver) = face_with(&Config::default(), 0);
        face.layout(Size::new(100.0, 100.0));

        for _ in 0..3 {
            face.draw(&mut RecordingSurface::default());
            assert!(face.has_pending_redraw());

            sleep(Duration::from_millis(1001)).await;
            assert_eq!(receiver.drain().expect("drain"), vec![BusEvent::Tick]);
            assert!(!face.has_pending_redraw());

            face.tick();
        }

        sleep(Duration::from_millis(1001)).await;
        assert_eq!(receiver.drain().expect("drain"), vec![BusEvent::Tick]);
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_ticks_do_not_stack_requests() {
        let (mut face, mut receiver) = face_with(&Config::default(), 0);

        face.tick();
        sleep(Duration::from_millis(500)).await;
        face.tick();
        sleep(Duration::from_millis(500)).await;
        face.tick();

        sleep(Duration::from_millis(999)).await;
        assert!(receiver.drain().expect("drain").is_empty());

        sleep(Duration::from_millis(2)).await;
        assert_eq!(receiver.drain().expect("drain"), vec![BusEvent::Tick]);

        sleep(Duration::from_secs(3)).await;
        assert!(receiver.drain().expect("drain").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn tick_refreshes_reading_from_clock() {
        let bus = EventBus::new(NonZeroUsize::new(8).expect("capacity"));
        let context = FaceContext::new(bus.sender(), Handle::current());
        let clock = Arc::new(FixedClock::at_millis(0));
        let mut face = ClockFace::new(&Config::default(), clock.clone(), context);

        clock.set_millis(61_000);
        face.tick();

        assert_eq!(face.reading().seconds, 61.0);
        assert_eq!(face.reading().minutes, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn teardown_cancels_pending_redraw() {
        let (face, mut receiver) = face_with(&Config::default(), 0);
        drop(face);

        sleep(Duration::from_secs(2)).await;
        assert!(receiver.drain().expect("drain").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn civil_mode_reads_time_of_day() {
        let config = Config {
            reading: ReadingMode::Civil,
            ..Config::default()
        };
        let clock = FixedClock::at_millis(900_000);
        let (face, _receiver) = face_with(&config, 900_000);

        assert_eq!(face.reading(), ClockReading::from_time_of_day(&clock.now()));
    }
}
