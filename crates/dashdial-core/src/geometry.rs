//! Dial geometry: angles, points on a circle and ring segment paths.
//!
//! Angles are in degrees with 0 at the top of the circle (12 o'clock),
//! increasing clockwise in screen space (y grows downward).

use kurbo::{Arc, BezPath, Point, SvgArc, Vec2};
use std::fmt::Write as _;

/// Full turn in degrees.
pub const FULL_TURN: f64 = 360.0;

/// Tolerance used when flattening ring segment arcs into cubic curves.
pub const ARC_TOLERANCE: f64 = 0.1;

/// Normalize an angle in degrees into `[0, 360)`.
///
/// Non-finite input normalizes to 0.
pub fn normalize_angle(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let n = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if n >= FULL_TURN { 0.0 } else { n }
}

/// Clockwise angular distance from `start` to `end`, in `[0, 360)`.
pub fn sweep(start: f64, end: f64) -> f64 {
    (normalize_angle(end) - normalize_angle(start) + FULL_TURN) % FULL_TURN
}

/// Angle of division `index` when the circle is split into `divisions` equal parts.
pub fn tick_angle(index: usize, divisions: usize) -> f64 {
    if divisions == 0 {
        return 0.0;
    }
    index as f64 * FULL_TURN / divisions as f64
}

/// Project a dial angle onto a circle.
///
/// Angle 0 lands directly above `center`, 90 directly to its right.
pub fn point_on_circle(center: Point, radius: f64, angle: f64) -> Point {
    let rad = (normalize_angle(angle) - 90.0).to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// A single drawing command of a ring segment outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc with the SVG flag semantics.
    ArcTo {
        radius: f64,
        large_arc: bool,
        /// `true` sweeps clockwise on screen.
        sweep: bool,
        to: Point,
    },
    Close,
}

/// Closed annular wedge between two radii and two angles.
///
/// The outline runs along the outer arc clockwise, steps inward, and comes
/// back along the inner arc counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSegment {
    commands: Vec<PathCommand>,
    sweep: f64,
    large_arc: bool,
}

impl RingSegment {
    /// The draw commands: move, outer arc, line, inner arc, close.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Clockwise sweep of the wedge in degrees, in `[0, 360)`.
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    /// Whether the arcs take the longer way around (sweep above 180°).
    pub fn large_arc(&self) -> bool {
        self.large_arc
    }

    /// Zero-sweep wedges are accepted and render as a sliver at most.
    pub fn is_degenerate(&self) -> bool {
        self.sweep == 0.0
    }

    /// SVG path data with coordinates rounded to three decimals.
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match *cmd {
                PathCommand::MoveTo(p) => write!(d, "M {:.3},{:.3}", p.x, p.y),
                PathCommand::LineTo(p) => write!(d, "L {:.3},{:.3}", p.x, p.y),
                PathCommand::ArcTo { radius, large_arc, sweep, to } => write!(
                    d,
                    "A {:.3},{:.3} 0 {},{} {:.3},{:.3}",
                    radius,
                    radius,
                    u8::from(large_arc),
                    u8::from(sweep),
                    to.x,
                    to.y
                ),
                PathCommand::Close => write!(d, "Z"),
            };
        }
        d
    }

    /// Convert to a `BezPath` for vector renderers.
    ///
    /// Arcs that collapse (same endpoints or zero radius) become straight lines.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut current = Point::ZERO;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    path.move_to(p);
                    current = p;
                }
                PathCommand::LineTo(p) => {
                    path.line_to(p);
                    current = p;
                }
                PathCommand::ArcTo { radius, large_arc, sweep, to } => {
                    let svg_arc = SvgArc {
                        from: current,
                        to,
                        radii: Vec2::new(radius, radius),
                        x_rotation: 0.0,
                        large_arc,
                        sweep,
                    };
                    match Arc::from_svg_arc(&svg_arc) {
                        Some(arc) => {
                            for el in arc.append_iter(ARC_TOLERANCE) {
                                path.push(el);
                            }
                        }
                        None => path.line_to(to),
                    }
                    current = to;
                }
                PathCommand::Close => path.close_path(),
            }
        }
        path
    }
}

/// Describe the annular wedge between `inner_radius` and `outer_radius`,
/// running clockwise from `start_angle` to `end_angle`.
pub fn describe_arc_segment(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> RingSegment {
    let start = normalize_angle(start_angle);
    let end = normalize_angle(end_angle);
    let delta = sweep(start, end);
    let large_arc = delta > 180.0;

    let commands = vec![
        PathCommand::MoveTo(point_on_circle(center, outer_radius, start)),
        PathCommand::ArcTo {
            radius: outer_radius,
            large_arc,
            sweep: true,
            to: point_on_circle(center, outer_radius, end),
        },
        PathCommand::LineTo(point_on_circle(center, inner_radius, end)),
        PathCommand::ArcTo {
            radius: inner_radius,
            large_arc,
            sweep: false,
            to: point_on_circle(center, inner_radius, start),
        },
        PathCommand::Close,
    ];

    RingSegment { commands, sweep: delta, large_arc }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_point(p: Point, x: f64, y: f64) {
        assert!((p.x - x).abs() < EPS, "x: {} != {}", p.x, x);
        assert!((p.y - y).abs() < EPS, "y: {} != {}", p.y, y);
    }

    #[test]
    fn test_normalize_range() {
        for a in [-720.5, -360.0, -90.0, -1e-20, 0.0, 45.0, 359.999, 360.0, 725.0] {
            let n = normalize_angle(a);
            assert!((0.0..360.0).contains(&n), "{} -> {}", a, n);
        }
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(f64::NAN), 0.0);
        assert_eq!(normalize_angle(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_normalize_full_turn_invariant() {
        for a in [-450.0, -12.5, 0.0, 30.0, 181.25, 359.5, 1000.0] {
            let diff = (normalize_angle(a + 360.0) - normalize_angle(a)).abs();
            assert!(diff < 1e-9, "{}: {}", a, diff);
        }
    }

    #[test]
    fn test_point_on_circle_cardinals() {
        let c = Point::new(100.0, 100.0);
        assert_point(point_on_circle(c, 50.0, 0.0), 100.0, 50.0);
        assert_point(point_on_circle(c, 50.0, 90.0), 150.0, 100.0);
        assert_point(point_on_circle(c, 50.0, 180.0), 100.0, 150.0);
        assert_point(point_on_circle(c, 50.0, 270.0), 50.0, 100.0);
        assert_point(point_on_circle(c, 50.0, -90.0), 50.0, 100.0);
        assert_point(point_on_circle(c, 50.0, 450.0), 150.0, 100.0);
    }

    #[test]
    fn test_sweep() {
        assert_eq!(sweep(0.0, 90.0), 90.0);
        assert_eq!(sweep(270.0, 90.0), 180.0);
        assert_eq!(sweep(90.0, 90.0), 0.0);
        assert_eq!(sweep(-90.0, 0.0), 90.0);
    }

    #[test]
    fn test_large_arc_flag() {
        let c = Point::new(0.0, 0.0);
        let quarter = describe_arc_segment(c, 50.0, 100.0, 0.0, 90.0);
        assert_eq!(quarter.sweep(), 90.0);
        assert!(!quarter.large_arc());

        let three_quarters = describe_arc_segment(c, 50.0, 100.0, 0.0, 270.0);
        assert_eq!(three_quarters.sweep(), 270.0);
        assert!(three_quarters.large_arc());

        let half = describe_arc_segment(c, 50.0, 100.0, 0.0, 180.0);
        assert!(!half.large_arc());
    }

    #[test]
    fn test_segment_commands() {
        let c = Point::new(100.0, 100.0);
        let seg = describe_arc_segment(c, 50.0, 100.0, 0.0, 90.0);
        let cmds = seg.commands();
        assert_eq!(cmds.len(), 5);

        match cmds[0] {
            PathCommand::MoveTo(p) => assert_point(p, 100.0, 0.0),
            ref other => panic!("expected MoveTo, got {:?}", other),
        }
        match cmds[1] {
            PathCommand::ArcTo { radius, sweep, to, .. } => {
                assert_eq!(radius, 100.0);
                assert!(sweep);
                assert_point(to, 200.0, 100.0);
            }
            ref other => panic!("expected outer ArcTo, got {:?}", other),
        }
        match cmds[2] {
            PathCommand::LineTo(p) => assert_point(p, 150.0, 100.0),
            ref other => panic!("expected LineTo, got {:?}", other),
        }
        match cmds[3] {
            PathCommand::ArcTo { radius, sweep, to, .. } => {
                assert_eq!(radius, 50.0);
                assert!(!sweep);
                assert_point(to, 100.0, 50.0);
            }
            ref other => panic!("expected inner ArcTo, got {:?}", other),
        }
        assert_eq!(cmds[4], PathCommand::Close);
    }

    #[test]
    fn test_svg_path_format() {
        let seg = describe_arc_segment(Point::new(100.0, 100.0), 50.0, 100.0, 90.0, 180.0);
        assert_eq!(
            seg.to_svg_path(),
            "M 200.000,100.000 A 100.000,100.000 0 0,1 100.000,200.000 \
             L 100.000,150.000 A 50.000,50.000 0 0,0 150.000,100.000 Z"
        );
    }

    #[test]
    fn test_degenerate_segment_is_not_an_error() {
        let seg = describe_arc_segment(Point::new(10.0, 10.0), 5.0, 10.0, 30.0, 390.0);
        assert!(seg.is_degenerate());
        assert!(!seg.large_arc());
        // Collapsed arcs fall back to straight lines.
        assert!(!seg.to_bez_path().elements().is_empty());

        let zero_radius = describe_arc_segment(Point::ZERO, 0.0, 0.0, 0.0, 90.0);
        assert_eq!(zero_radius.commands().len(), 5);
        assert!(!zero_radius.to_bez_path().elements().is_empty());
    }

    #[test]
    fn test_bez_path_stays_on_ring() {
        let c = Point::new(100.0, 100.0);
        let seg = describe_arc_segment(c, 50.0, 100.0, 0.0, 270.0);
        let path = seg.to_bez_path();
        for el in path.elements() {
            if let Some(p) = el.end_point() {
                let d = p.distance(c);
                assert!(d > 49.0 && d < 101.0, "point {:?} at distance {}", p, d);
            }
        }
    }

    #[test]
    fn test_tick_angle() {
        assert_eq!(tick_angle(0, 12), 0.0);
        assert_eq!(tick_angle(3, 12), 90.0);
        assert_eq!(tick_angle(6, 24), 90.0);
        assert_eq!(tick_angle(1, 0), 0.0);
    }
}
