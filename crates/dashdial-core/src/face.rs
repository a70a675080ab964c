//! Clock face layout.
//!
//! Everything the drawing layer needs to paint a radial dial: radii, ticks,
//! hour labels and colored bezel segments. Layouts are re-derived on every
//! render; nothing here is incrementally maintained.

use crate::geometry::{RingSegment, describe_arc_segment, point_on_circle, tick_angle};
use crate::time::{ClockMode, TimeOfDay};
use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};

/// Offset of the hard drop shadow behind the face.
pub const SHADOW_OFFSET: f64 = 4.0;

/// Stroke width of the face outline.
pub const STROKE_WIDTH: f64 = 3.0;

/// Inner bezel radius as a fraction of the dial size.
pub const INNER_RADIUS_RATIO: f64 = 0.267;

/// Gap between the face edge and the outer end of each tick.
pub const TICK_INSET: f64 = 4.0;

/// Distance of hour labels inward from the face edge.
pub const LABEL_INSET: f64 = 45.0;

/// Color of the elapsed-time bezel segment (teal).
pub const ELAPSED_COLOR: Color = Color::from_rgb8(0x2d, 0xd4, 0xbf);

/// Size and labelling of a radial dial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialLayout {
    /// Diameter of the dial's drawing area.
    pub size: f64,
    pub mode: ClockMode,
    /// Show a label on every `label_step`-th hour.
    pub label_step: usize,
}

impl Default for DialLayout {
    fn default() -> Self {
        Self {
            size: 300.0,
            mode: ClockMode::TwelveHour,
            label_step: 3,
        }
    }
}

impl DialLayout {
    pub fn new(size: f64, mode: ClockMode, label_step: usize) -> Self {
        Self { size, mode, label_step }
    }

    pub fn center(&self) -> Point {
        Point::new(self.size / 2.0, self.size / 2.0)
    }

    /// Face radius, shrunk so the outline and shadow stay inside the drawing area.
    pub fn outer_radius(&self) -> f64 {
        self.size / 2.0 - SHADOW_OFFSET - STROKE_WIDTH
    }

    pub fn inner_radius(&self) -> f64 {
        self.size * INNER_RADIUS_RATIO
    }

    /// Center of the shadow circle.
    pub fn shadow_center(&self) -> Point {
        let c = self.center();
        Point::new(c.x + SHADOW_OFFSET, c.y + SHADOW_OFFSET)
    }

    /// Hour ticks interleaved with half-hour ticks, clockwise from the top.
    pub fn ticks(&self) -> Vec<Tick> {
        let hours = self.mode.divisions();
        let quarter = hours / 4;
        let count = hours * 2;
        let center = self.center();
        let edge = self.outer_radius() - TICK_INSET;

        (0..count)
            .map(|index| {
                let kind = if index % 2 == 1 {
                    TickKind::HalfHour
                } else if (index / 2) % quarter == 0 {
                    TickKind::Quarter
                } else {
                    TickKind::Hour
                };
                let angle = tick_angle(index, count);
                Tick {
                    index,
                    angle,
                    kind,
                    outer: point_on_circle(center, edge, angle),
                    inner: point_on_circle(center, edge - kind.length(), angle),
                }
            })
            .collect()
    }

    /// Hour labels for every `label_step`-th division.
    pub fn labels(&self) -> Vec<HourLabel> {
        let hours = self.mode.divisions();
        let step = self.label_step.max(1);
        let center = self.center();
        let radius = self.outer_radius() - LABEL_INSET;

        (0..hours)
            .filter(|i| i % step == 0)
            .map(|index| {
                let angle = tick_angle(index, hours);
                HourLabel {
                    index,
                    angle,
                    position: point_on_circle(center, radius, angle),
                    text: self.mode.hour_label(index),
                }
            })
            .collect()
    }
}

/// Visual weight of a tick mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// Hours at 12, 3, 6 and 9 (or every sixth hour on a 24h dial).
    Quarter,
    Hour,
    HalfHour,
}

impl TickKind {
    pub fn length(self) -> f64 {
        match self {
            TickKind::Quarter => 20.0,
            TickKind::Hour => 12.0,
            TickKind::HalfHour => 6.0,
        }
    }

    pub fn width(self) -> f64 {
        match self {
            TickKind::Quarter => 4.0,
            TickKind::Hour => 2.0,
            TickKind::HalfHour => 1.0,
        }
    }
}

/// A tick mark running from `outer` inward to `inner`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub index: usize,
    pub angle: f64,
    pub kind: TickKind,
    pub outer: Point,
    pub inner: Point,
}

/// Hour text anchored (centered) at `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct HourLabel {
    pub index: usize,
    pub angle: f64,
    pub position: Point,
    pub text: String,
}

/// A colored span of the bezel ring.
#[derive(Debug, Clone, Copy)]
pub struct BezelSegment {
    pub start: f64,
    pub end: f64,
    pub color: Color,
}

impl BezelSegment {
    pub fn new(start: f64, end: f64, color: Color) -> Self {
        Self { start, end, color }
    }

    /// The wedge this segment fills between the dial's inner and outer radius.
    pub fn ring(&self, layout: &DialLayout) -> RingSegment {
        describe_arc_segment(
            layout.center(),
            layout.inner_radius(),
            layout.outer_radius(),
            self.start,
            self.end,
        )
    }
}

/// Segment from 12 o'clock to the current minute.
///
/// At the top of the cycle the segment has zero sweep and draws as a sliver.
pub fn elapsed_segment(time: &TimeOfDay) -> BezelSegment {
    BezelSegment::new(0.0, time.dial_angle(), ELAPSED_COLOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radii() {
        let layout = DialLayout::default();
        assert_eq!(layout.center(), Point::new(150.0, 150.0));
        assert_eq!(layout.outer_radius(), 143.0);
        assert!((layout.inner_radius() - 80.1).abs() < 1e-9);
        assert_eq!(layout.shadow_center(), Point::new(154.0, 154.0));
    }

    #[test]
    fn test_ticks_12h() {
        let layout = DialLayout::default();
        let ticks = layout.ticks();
        assert_eq!(ticks.len(), 24);

        let quarters: Vec<usize> = ticks
            .iter()
            .filter(|t| t.kind == TickKind::Quarter)
            .map(|t| t.index)
            .collect();
        assert_eq!(quarters, vec![0, 6, 12, 18]);
        assert_eq!(ticks.iter().filter(|t| t.kind == TickKind::Hour).count(), 8);
        assert_eq!(ticks.iter().filter(|t| t.kind == TickKind::HalfHour).count(), 12);

        // Top tick is vertical and 20 long.
        let top = &ticks[0];
        assert_eq!(top.angle, 0.0);
        assert!((top.outer.x - 150.0).abs() < 1e-9);
        assert!((top.outer.y - 11.0).abs() < 1e-9);
        assert!((top.inner.y - 31.0).abs() < 1e-9);

        assert_eq!(ticks[1].angle, 15.0);
        assert_eq!(ticks[1].kind.width(), 1.0);
    }

    #[test]
    fn test_ticks_24h_quarters() {
        let layout = DialLayout::new(400.0, ClockMode::TwentyFourHour, 6);
        let ticks = layout.ticks();
        assert_eq!(ticks.len(), 48);
        let quarters: Vec<f64> = ticks
            .iter()
            .filter(|t| t.kind == TickKind::Quarter)
            .map(|t| t.angle)
            .collect();
        assert_eq!(quarters, vec![0.0, 90.0, 180.0, 270.0]);
    }

    #[test]
    fn test_labels_12h() {
        let layout = DialLayout::default();
        let labels = layout.labels();
        let texts: Vec<&str> = labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["12", "03", "06", "09"]);

        let three = &labels[1];
        assert_eq!(three.angle, 90.0);
        assert!((three.position.x - (150.0 + 98.0)).abs() < 1e-9);
        assert!((three.position.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_labels_24h_and_zero_step() {
        let layout = DialLayout::new(300.0, ClockMode::TwentyFourHour, 6);
        let texts: Vec<String> = layout.labels().into_iter().map(|l| l.text).collect();
        assert_eq!(texts, vec!["00", "06", "12", "18"]);

        let every = DialLayout::new(300.0, ClockMode::TwelveHour, 0);
        assert_eq!(every.labels().len(), 12);
    }

    #[test]
    fn test_elapsed_segment() {
        let layout = DialLayout::default();
        let time = TimeOfDay::new(9, 0, 0).unwrap();
        let seg = elapsed_segment(&time);
        assert_eq!(seg.start, 0.0);
        assert_eq!(seg.end, 270.0);

        let rgba = seg.color.to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (0x2d, 0xd4, 0xbf));

        let ring = seg.ring(&layout);
        assert!(ring.large_arc());
        assert_eq!(ring.sweep(), 270.0);
    }

    #[test]
    fn test_elapsed_segment_at_noon_is_degenerate() {
        let seg = elapsed_segment(&TimeOfDay::new(12, 0, 45).unwrap());
        assert!(seg.ring(&DialLayout::default()).is_degenerate());
    }
}
