//! Bounded position history for bodies without a static orbit.
//!
//! A [`Trail`] is a FIFO of simulation-unit points; [`TrailRecorder`] appends
//! the current position of a body and evicts the oldest points once the
//! configured length is exceeded. Coordinates are rounded to a fixed
//! precision before being stored so that sub-precision jitter does not show
//! up in the rendered polyline.

use nalgebra::Point2;
use std::collections::VecDeque;

use crate::{body::Body, config::TrailConfig};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Point2<f64>>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points from oldest to newest.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &Point2<f64>> + '_ {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<&Point2<f64>> {
        self.points.back()
    }

    fn push_bounded(&mut self, point: Point2<f64>, max_length: usize) {
        self.points.push_back(point);
        while self.points.len() > max_length {
            self.points.pop_front();
        }
    }
}

/// Appends body positions to their trails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailRecorder {
    max_length: usize,
    precision: f64,
}

impl TrailRecorder {
    pub fn new(config: &TrailConfig) -> Self {
        Self {
            max_length: config.max_length,
            precision: config.precision,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn round(&self, value: f64) -> f64 {
        (value / self.precision).round() * self.precision
    }

    /// Push the body's current `(x, y)` onto its trail.
    ///
    /// Bodies without a trail (static orbit or no track at all) are left
    /// untouched.
    pub fn append(&self, body: &mut Body) {
        let position = body.position();
        let point = Point2::new(self.round(position.x), self.round(position.y));
        if let Some(trail) = body.trail_mut() {
            trail.push_bounded(point, self.max_length);
        }
    }
}
