//! Placement of ticks and hands on the dial.
//!
//! Every point is expressed relative to the top-left corner of the layout box,
//! so the dial center sits at `(radius, radius)`. An angle of zero points at
//! the left edge and the y axis points down.

use std::f64::consts::{FRAC_PI_2, TAU};

use iced::Point;

use super::ClockReading;

pub const TICK_COUNT: usize = 60;
/// Inner radius fraction of the twelve hour marks.
pub const HOUR_TICK_INNER: f32 = 0.85;
pub const MINUTE_TICK_INNER: f32 = 0.90;
pub const TICK_OUTER: f32 = 0.95;

/// One of the sixty radial marks on the rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub index: usize,
    pub angle: f64,
    pub inner: f32,
    pub outer: f32,
}

impl Tick {
    pub fn new(index: usize) -> Self {
        let inner = if index % 5 == 0 {
            HOUR_TICK_INNER
        } else {
            MINUTE_TICK_INNER
        };

        Self {
            index,
            angle: TAU * (index as f64 / TICK_COUNT as f64),
            inner,
            outer: TICK_OUTER,
        }
    }

    pub fn is_hour_mark(&self) -> bool {
        self.index % 5 == 0
    }
}

pub fn ticks() -> impl Iterator<Item = Tick> {
    (0..TICK_COUNT).map(Tick::new)
}

/// Point `fraction` of the way from the dial center to the rim along `angle`.
pub fn dial_point(radius: f32, angle: f64, fraction: f32) -> Point {
    let reach = radius * fraction;

    Point::new(
        radius - angle.cos() as f32 * reach,
        radius - angle.sin() as f32 * reach,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Hour,
    Minute,
    Second,
}

impl Hand {
    /// Back-to-front drawing order.
    pub const ALL: [Hand; 3] = [Hand::Hour, Hand::Minute, Hand::Second];

    /// Angle of the hand for a value on the 60-step scale.
    pub fn angle(self, value: f32) -> f64 {
        let sweep = TAU * (f64::from(value) / 60.0);

        match self {
            Hand::Hour => FRAC_PI_2 - sweep,
            Hand::Minute | Hand::Second => FRAC_PI_2 + sweep,
        }
    }

    /// Hand length as a fraction of the dial radius.
    pub fn length(self) -> f32 {
        match self {
            Hand::Hour => 0.6,
            Hand::Minute => 0.8,
            Hand::Second => 0.95,
        }
    }

    pub fn value(self, reading: &ClockReading) -> f32 {
        match self {
            Hand::Hour => reading.hours,
            Hand::Minute => reading.minutes,
            Hand::Second => reading.seconds,
        }
    }

    /// End point of the hand for `reading` on a dial of `radius`.
    pub fn tip(self, radius: f32, reading: &ClockReading) -> Point {
        dial_point(radius, self.angle(self.value(reading)), self.length())
    }
}
