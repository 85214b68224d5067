//! Snap functionality for aligning elements to the page and to each other.

use kurbo::{Point, Rect, Size, Vec2};

/// Result of a page-edge snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    /// Top-left corner after snapping. Snapped coordinates are assigned, not
    /// accumulated, so a box on the right edge starts at exactly
    /// `page.x1 - width`.
    pub position: Point,
    /// Correction from the candidate position, for feedback.
    pub offset: Vec2,
    /// Whether the X coordinate was snapped.
    pub snapped_x: bool,
    /// Whether the Y coordinate was snapped.
    pub snapped_y: bool,
}

impl SnapResult {
    /// Check if any snapping occurred.
    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Coordinate among `snapped` closest to `value`, if it is under `threshold` away.
///
/// The first candidate wins a tie.
fn nearest_edge(value: f64, snapped: [f64; 2], threshold: f64) -> Option<f64> {
    let mut best: Option<(f64, f64)> = None;
    for target in snapped {
        let distance = (target - value).abs();
        if distance < threshold && best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, target));
        }
    }
    best.map(|(_, target)| target)
}

/// Snap a box at `origin` with `size` to the page edges.
///
/// Each axis is handled on its own. When both edges of an axis are in range
/// the smaller correction wins.
pub fn snap_to_page_edges(origin: Point, size: Size, page: Rect, threshold: f64) -> SnapResult {
    let x = nearest_edge(origin.x, [page.x0, page.x1 - size.width], threshold);
    let y = nearest_edge(origin.y, [page.y0, page.y1 - size.height], threshold);
    let position = Point::new(x.unwrap_or(origin.x), y.unwrap_or(origin.y));
    SnapResult {
        position,
        offset: position - origin,
        snapped_x: x.is_some(),
        snapped_y: y.is_some(),
    }
}

/// Which stop of a box a guide was matched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapEdge {
    /// Left or top.
    Start,
    Center,
    /// Right or bottom.
    End,
}

/// Orientation of a guide line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideOrientation {
    /// Constant X, drawn top to bottom.
    Vertical,
    /// Constant Y, drawn left to right.
    Horizontal,
}

/// A guide segment to draw while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Guide {
    pub orientation: GuideOrientation,
    /// X for vertical guides, Y for horizontal ones.
    pub position: f64,
    /// Segment extent along the other axis.
    pub start: f64,
    pub end: f64,
    /// Stop of the dragged box that matched.
    pub edge: SnapEdge,
}

/// Result of alignment detection.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentResult {
    /// Correction to add to the dragged position.
    pub offset: Vec2,
    pub guides: Vec<Guide>,
}

fn stops(start: f64, end: f64) -> [(f64, SnapEdge); 3] {
    [
        (start, SnapEdge::Start),
        ((start + end) / 2.0, SnapEdge::Center),
        (end, SnapEdge::End),
    ]
}

/// Target line on one axis, with the extent a guide against it covers.
#[derive(Debug, Clone, Copy)]
struct AxisTarget {
    line: f64,
    /// Cross-axis extent of the target, `None` for the page center.
    span: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy)]
struct AxisMatch {
    delta: f64,
    line: f64,
    edge: SnapEdge,
    span: Option<(f64, f64)>,
}

fn best_axis_match(dragged: [(f64, SnapEdge); 3], targets: &[AxisTarget], threshold: f64) -> Option<AxisMatch> {
    let mut best: Option<AxisMatch> = None;
    for target in targets {
        for &(value, edge) in &dragged {
            let delta = target.line - value;
            if delta.abs() >= threshold {
                continue;
            }
            // Strict comparison keeps the first candidate on ties.
            if best.is_none_or(|b| delta.abs() < b.delta.abs()) {
                best = Some(AxisMatch {
                    delta,
                    line: target.line,
                    edge,
                    span: target.span,
                });
            }
        }
    }
    best
}

/// Find alignment guides for a dragged box against `targets` and the page center lines.
///
/// Per axis the closest stop pair within `threshold` wins. Guides are
/// computed for the corrected position.
pub fn detect_alignment(dragged: Rect, targets: &[Rect], page: Rect, threshold: f64) -> AlignmentResult {
    let page_center = page.center();

    let mut x_targets: Vec<AxisTarget> = Vec::with_capacity(targets.len() * 3 + 1);
    let mut y_targets: Vec<AxisTarget> = Vec::with_capacity(targets.len() * 3 + 1);
    for target in targets {
        for (line, _) in stops(target.x0, target.x1) {
            x_targets.push(AxisTarget {
                line,
                span: Some((target.y0, target.y1)),
            });
        }
        for (line, _) in stops(target.y0, target.y1) {
            y_targets.push(AxisTarget {
                line,
                span: Some((target.x0, target.x1)),
            });
        }
    }
    x_targets.push(AxisTarget {
        line: page_center.x,
        span: None,
    });
    y_targets.push(AxisTarget {
        line: page_center.y,
        span: None,
    });

    let x_match = best_axis_match(stops(dragged.x0, dragged.x1), &x_targets, threshold);
    let y_match = best_axis_match(stops(dragged.y0, dragged.y1), &y_targets, threshold);

    let offset = Vec2::new(
        x_match.map_or(0.0, |m| m.delta),
        y_match.map_or(0.0, |m| m.delta),
    );
    let moved = dragged + offset;

    let mut guides = Vec::new();
    if let Some(m) = x_match {
        let (start, end) = match m.span {
            Some((t0, t1)) => (moved.y0.min(t0), moved.y1.max(t1)),
            None => (page.y0, page.y1),
        };
        guides.push(Guide {
            orientation: GuideOrientation::Vertical,
            position: m.line,
            start,
            end,
            edge: m.edge,
        });
    }
    if let Some(m) = y_match {
        let (start, end) = match m.span {
            Some((t0, t1)) => (moved.x0.min(t0), moved.x1.max(t1)),
            None => (page.x0, page.x1),
        };
        guides.push(Guide {
            orientation: GuideOrientation::Horizontal,
            position: m.line,
            start,
            end,
            edge: m.edge,
        });
    }

    AlignmentResult { offset, guides }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: Rect = Rect::new(0.0, 0.0, 3840.0, 2160.0);

    #[test]
    fn test_snap_to_right_edge() {
        let result = snap_to_page_edges(Point::new(3435.0, 500.0), Size::new(400.0, 400.0), PAGE, 10.0);
        assert!(result.snapped_x);
        assert!(!result.snapped_y);
        assert_eq!(result.position, Point::new(3440.0, 500.0));
        assert!((result.offset.x - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_right_edge_fractional_width_is_exact() {
        for (x, width) in [(3314.9, 517.83), (3499.1, 333.3), (3796.3, 40.1), (2848.0, 999.99), (3712.0, 123.456)] {
            let result = snap_to_page_edges(Point::new(x, 100.0), Size::new(width, 50.0), PAGE, 10.0);
            assert!(result.snapped_x, "width {width}");
            assert_eq!(result.position.x, 3840.0 - width);
        }
    }

    #[test]
    fn test_snap_outside_threshold() {
        let result = snap_to_page_edges(Point::new(100.0, 100.0), Size::new(100.0, 100.0), PAGE, 10.0);
        assert!(!result.is_snapped());
        assert_eq!(result.offset, Vec2::ZERO);
        assert_eq!(result.position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_snap_picks_smaller_correction() {
        // Box nearly as wide as the page: both edges in range.
        let page = Rect::new(0.0, 0.0, 1000.0, 1000.0);
        let result = snap_to_page_edges(Point::new(4.0, 300.0), Size::new(997.0, 100.0), page, 10.0);
        assert!((result.position.x - 3.0).abs() < f64::EPSILON);
        assert!((result.offset.x - -1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_snap_negative_position() {
        let result = snap_to_page_edges(Point::new(-6.0, -3.0), Size::new(100.0, 100.0), PAGE, 10.0);
        assert_eq!(result.position, Point::ZERO);
        assert!((result.offset.x - 6.0).abs() < f64::EPSILON);
        assert!((result.offset.y - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_alignment_left_edges() {
        let target = Rect::new(500.0, 100.0, 700.0, 200.0);
        let dragged = Rect::new(503.0, 400.0, 603.0, 450.0);
        let result = detect_alignment(dragged, &[target], PAGE, 8.0);
        assert!((result.offset.x - -3.0).abs() < f64::EPSILON);
        assert!((result.offset.y).abs() < f64::EPSILON);
        assert_eq!(result.guides.len(), 1);
        let guide = result.guides[0];
        assert_eq!(guide.orientation, GuideOrientation::Vertical);
        assert_eq!(guide.edge, SnapEdge::Start);
        assert!((guide.position - 500.0).abs() < f64::EPSILON);
        assert!((guide.start - 100.0).abs() < f64::EPSILON);
        assert!((guide.end - 450.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_alignment_page_center() {
        let dragged = Rect::new(0.0, 1000.0, 100.0, 1155.0);
        // Center y = 1077.5, page center y = 1080.
        let result = detect_alignment(dragged, &[], PAGE, 8.0);
        assert!((result.offset.y - 2.5).abs() < 1e-9);
        let guide = result.guides[0];
        assert_eq!(guide.orientation, GuideOrientation::Horizontal);
        assert_eq!(guide.edge, SnapEdge::Center);
        assert!((guide.start - 0.0).abs() < f64::EPSILON);
        assert!((guide.end - 3840.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_alignment_nearest_wins() {
        let far = Rect::new(206.0, 0.0, 300.0, 50.0);
        let near = Rect::new(202.0, 600.0, 300.0, 650.0);
        let dragged = Rect::new(200.0, 300.0, 260.0, 360.0);
        let result = detect_alignment(dragged, &[far, near], PAGE, 8.0);
        assert!((result.offset.x - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_alignment_tie_keeps_first() {
        let first = Rect::new(197.0, 0.0, 300.0, 50.0);
        let second = Rect::new(203.0, 600.0, 300.0, 650.0);
        let dragged = Rect::new(200.0, 300.0, 260.0, 360.0);
        let result = detect_alignment(dragged, &[first, second], PAGE, 8.0);
        assert!((result.offset.x - -3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_alignment() {
        let target = Rect::new(500.0, 100.0, 700.0, 200.0);
        let dragged = Rect::new(900.0, 400.0, 1000.0, 450.0);
        let result = detect_alignment(dragged, &[target], PAGE, 8.0);
        assert_eq!(result.offset, Vec2::ZERO);
        assert!(result.guides.is_empty());
    }
}
