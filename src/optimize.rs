//! Post-pass that merges runs of nearly-collinear segments into one.

use crate::{Point, Segment};

/// A run of consecutive segments being considered for merging. The slope
/// is the anchor segment's and is never recomputed as segments are
/// absorbed.
struct Run {
    first: Segment,
    end: Point,
    slope: f64,
    absorbed: bool,
}

impl Run {
    fn new(segment: Segment) -> Self {
        Self {
            slope: segment.start.slope_to(segment.end).abs(),
            end: segment.end,
            first: segment,
            absorbed: false,
        }
    }

    fn absorb(&mut self, segment: Segment) {
        self.end = segment.end;
        self.absorbed = true;
    }

    fn finish(self) -> Segment {
        if self.absorbed {
            Segment::line(self.first.start, self.end)
        } else {
            self.first
        }
    }
}

/// Merge consecutive segments whose absolute slopes differ by strictly
/// less than `tolerance`, in a single greedy left-to-right pass.
///
/// A run that absorbed nothing is emitted unchanged, control points
/// included; a longer run collapses to one straight segment spanning the
/// run. Two vertical segments count as an exact slope match (their
/// literal difference would be NaN); a vertical/non-vertical pairing is
/// left to the subtraction against infinity and never matches.
pub(crate) fn merge_collinear(segments: Vec<Segment>, tolerance: f64) -> Vec<Segment> {
    let mut iter = segments.into_iter();
    let mut run = match iter.next() {
        Some(first) => Run::new(first),
        None => return Vec::new(),
    };

    let mut merged = Vec::new();
    for segment in iter {
        let slope = segment.start.slope_to(segment.end).abs();
        let difference = if run.slope.is_infinite() && slope.is_infinite() {
            0.0
        } else {
            (slope - run.slope).abs()
        };
        if difference < tolerance {
            run.absorb(segment);
        } else {
            merged.push(run.finish());
            run = Run::new(segment);
        }
    }
    merged.push(run.finish());

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: (f64, f64), end: (f64, f64)) -> Segment {
        Segment::line(start.into(), end.into())
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(merge_collinear(vec![], 1.0), vec![]);
        let only = line((0.0, 0.0), (1.0, 2.0));
        assert_eq!(merge_collinear(vec![only], 1.0), vec![only]);
    }

    #[test]
    fn test_merges_horizontal_run() {
        let segments = vec![
            line((0.0, 0.0), (10.0, 0.0)),
            line((10.0, 0.0), (20.0, 0.0)),
            line((20.0, 0.0), (20.0, 10.0)),
        ];
        let merged = merge_collinear(segments, 0.001);
        assert_eq!(
            merged,
            vec![
                line((0.0, 0.0), (20.0, 0.0)),
                line((20.0, 0.0), (20.0, 10.0)),
            ]
        );
        // The merged segment's controls sit on its own midpoint.
        assert_eq!(merged[0].control[0], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_zero_tolerance_merges_nothing() {
        let segments = vec![
            line((0.0, 0.0), (10.0, 0.0)),
            line((10.0, 0.0), (20.0, 0.0)),
        ];
        assert_eq!(merge_collinear(segments.clone(), 0.0), segments);
    }

    #[test]
    fn test_boundary_is_strict() {
        // Slopes 0 and 0.5: a difference equal to the tolerance must not
        // merge, a smaller one must.
        let exact = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (2.0, 0.5)),
        ];
        assert_eq!(merge_collinear(exact.clone(), 0.5).len(), 2);

        let below = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (2.0, 0.4999)),
        ];
        assert_eq!(merge_collinear(below, 0.5).len(), 1);
    }

    #[test]
    fn test_both_vertical_merge() {
        let segments = vec![
            line((0.0, 0.0), (0.0, 5.0)),
            line((0.0, 5.0), (0.0, 9.0)),
        ];
        let merged = merge_collinear(segments, 0.001);
        assert_eq!(merged, vec![line((0.0, 0.0), (0.0, 9.0))]);
    }

    #[test]
    fn test_both_vertical_zero_tolerance() {
        let segments = vec![
            line((0.0, 0.0), (0.0, 5.0)),
            line((0.0, 5.0), (0.0, 9.0)),
        ];
        assert_eq!(merge_collinear(segments, 0.0).len(), 2);
    }

    #[test]
    fn test_vertical_vs_steep_never_merges() {
        // An exactly vertical segment next to a merely steep one falls
        // through to the subtraction against infinity.
        let segments = vec![
            line((0.0, 0.0), (0.0, 5.0)),
            line((0.0, 5.0), (0.001, 10.0)),
        ];
        assert_eq!(merge_collinear(segments, 1e9).len(), 2);
    }

    #[test]
    fn test_anchor_slope_not_recomputed() {
        // Slopes 0, 0.4, 0.8 at tolerance 0.5: the third segment is
        // compared against the anchor slope 0, not the absorbed 0.4.
        let segments = vec![
            line((0.0, 0.0), (1.0, 0.0)),
            line((1.0, 0.0), (2.0, 0.4)),
            line((2.0, 0.4), (3.0, 1.2)),
        ];
        let merged = merge_collinear(segments, 0.5);
        assert_eq!(
            merged,
            vec![
                line((0.0, 0.0), (2.0, 0.4)),
                line((2.0, 0.4), (3.0, 1.2)),
            ]
        );
    }

    #[test]
    fn test_untouched_run_keeps_controls() {
        let curve = Segment {
            start: Point::new(0.0, 0.0),
            end: Point::new(10.0, 0.0),
            control: [Point::new(2.0, 5.0), Point::new(8.0, 5.0)],
        };
        let steep = line((10.0, 0.0), (10.0, 10.0));
        let merged = merge_collinear(vec![curve, steep], 0.001);
        assert_eq!(merged, vec![curve, steep]);
    }

    #[test]
    fn test_idempotent() {
        let segments = vec![
            line((0.0, 0.0), (10.0, 0.0)),
            line((10.0, 0.0), (20.0, 0.0)),
            line((20.0, 0.0), (20.0, 10.0)),
            line((20.0, 10.0), (20.0, 30.0)),
            line((20.0, 30.0), (25.0, 35.0)),
        ];
        let once = merge_collinear(segments, 0.001);
        let twice = merge_collinear(once.clone(), 0.001);
        assert_eq!(once, twice);
    }
}
