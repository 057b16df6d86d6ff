//! Wire routing (orthogonal Manhattan paths).
//!
//! Every wire is a two-bend path through the midpoint of its endpoints. The
//! dominant axis picks the jog: a wider-than-tall span jogs vertically at
//! `mid_x`; anything else, ties included, jogs horizontally at `mid_y`.

use crate::types::Point;

/// Which jog a route takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteBranch {
    /// `deltaX > deltaY`: run along `start.y`, jog at `mid_x`, run along `end.y`.
    Horizontal,
    /// `deltaX <= deltaY`: run along `start.x`, jog at `mid_y`, run along `end.x`.
    Vertical,
}

pub fn branch_for(start: Point, end: Point) -> RouteBranch {
    let delta_x = (start.x - end.x).abs();
    let delta_y = (start.y - end.y).abs();
    if delta_x > delta_y {
        RouteBranch::Horizontal
    } else {
        RouteBranch::Vertical
    }
}

/// Route a single wire between two points.
///
/// Always returns four points (two bends), even when the endpoints share an
/// axis and the path degenerates into a straight segment.
pub fn route_wire(start: Point, end: Point) -> Vec<Point> {
    let mid_x = (start.x + end.x) / 2.0;
    let mid_y = (start.y + end.y) / 2.0;

    match branch_for(start, end) {
        RouteBranch::Horizontal => vec![
            start,
            Point::new(mid_x, start.y),
            Point::new(mid_x, end.y),
            end,
        ],
        RouteBranch::Vertical => vec![
            start,
            Point::new(start.x, mid_y),
            Point::new(end.x, mid_y),
            end,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_orthogonal(points: &[Point]) -> bool {
        points
            .windows(2)
            .all(|w| w[0].x == w[1].x || w[0].y == w[1].y)
    }

    #[test]
    fn straight_horizontal() {
        let pts = route_wire(Point::new(-70.0, 0.0), Point::new(70.0, 0.0));
        assert_eq!(pts.len(), 4);
        assert!(pts.iter().all(|p| p.y == 0.0));
        assert_eq!(pts[1], Point::new(0.0, 0.0));
    }

    #[test]
    fn straight_vertical() {
        let pts = route_wire(Point::new(0.0, -70.0), Point::new(0.0, 70.0));
        assert_eq!(branch_for(pts[0], pts[3]), RouteBranch::Vertical);
        assert!(pts.iter().all(|p| p.x == 0.0));
    }

    #[test]
    fn horizontal_dominant_jogs_at_mid_x() {
        let pts = route_wire(Point::new(0.0, 0.0), Point::new(200.0, 100.0));
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(200.0, 100.0),
            ]
        );
        assert!(is_orthogonal(&pts));
    }

    #[test]
    fn vertical_dominant_jogs_at_mid_y() {
        let pts = route_wire(Point::new(10.0, 0.0), Point::new(-30.0, 120.0));
        assert_eq!(pts[1], Point::new(10.0, 60.0));
        assert_eq!(pts[2], Point::new(-30.0, 60.0));
        assert!(is_orthogonal(&pts));
    }

    #[test]
    fn tie_goes_vertical() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(50.0, 50.0);
        assert_eq!(branch_for(start, end), RouteBranch::Vertical);
        assert_eq!(route_wire(start, end)[1], Point::new(0.0, 25.0));
    }

    #[test]
    fn coincident_endpoints() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(route_wire(p, p), vec![p; 4]);
    }
}
