//! 2D intersection primitives used by the boundary elements.

use super::{Point2, Vector2, TOLERANCE};

/// Bounded segment-segment intersection.
///
/// Returns the intersection point if the segments cross; endpoints count
/// as crossings.
#[must_use]
pub fn segment_segment_intersect(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> Option<Point2> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = t.clamp(0.0, 1.0);
        Some(Point2::new(a0.x + da.x * t, a0.y + da.y * t))
    } else {
        None
    }
}

/// Intersection of a bounded segment with a full circle.
///
/// Returns 0, 1 (tangent) or 2 points; endpoints lying on the circle are
/// included.
#[must_use]
pub fn segment_circle_intersect(p0: &Point2, p1: &Point2, center: &Point2, radius: f64) -> Vec<Point2> {
    let mut results = Vec::new();
    if radius < TOLERANCE {
        return results;
    }

    let d: Vector2 = p1 - p0;
    let seg_len_sq = d.norm_squared();
    if seg_len_sq < TOLERANCE * TOLERANCE {
        return results;
    }

    // Substitute the parametric segment into the circle equation:
    // (p0.x + t*dx - cx)² + (p0.y + t*dy - cy)² = r²
    let f: Vector2 = p0 - center;
    let a = seg_len_sq;
    let b = 2.0 * f.dot(&d);
    let c = f.norm_squared() - radius * radius;
    let discriminant = b * b - 4.0 * a * c;

    if discriminant < -TOLERANCE {
        return results;
    }
    let disc_sqrt = discriminant.max(0.0).sqrt();

    let t_roots = if disc_sqrt < TOLERANCE * 100.0 {
        // Tangent case: single root.
        vec![-b / (2.0 * a)]
    } else {
        vec![(-b - disc_sqrt) / (2.0 * a), (-b + disc_sqrt) / (2.0 * a)]
    };

    let eps = 1e-9;
    for t in t_roots {
        if t < -eps || t > 1.0 + eps {
            continue;
        }
        let t = t.clamp(0.0, 1.0);
        results.push(Point2::new(p0.x + t * d.x, p0.y + t * d.y));
    }

    results
}

/// Intersection points of two full circles.
///
/// Concentric circles yield no points (none or infinitely many exist).
#[must_use]
pub fn circle_circle_intersect(c1: &Point2, r1: f64, c2: &Point2, r2: f64) -> Vec<Point2> {
    let mut results = Vec::new();
    if r1 < TOLERANCE || r2 < TOLERANCE {
        return results;
    }

    let d: Vector2 = c2 - c1;
    let dist_sq = d.norm_squared();
    let dist = dist_sq.sqrt();

    if dist < TOLERANCE {
        return results;
    }

    // Check that the circles actually meet.
    let sum = r1 + r2;
    let diff = (r1 - r2).abs();
    if dist > sum + TOLERANCE || dist < diff - TOLERANCE {
        return results;
    }

    // Distance from c1 along the line c1→c2 to the radical line.
    let a = (r1 * r1 - r2 * r2 + dist_sq) / (2.0 * dist);
    let h_sq = r1 * r1 - a * a;
    if h_sq < -TOLERANCE {
        return results;
    }
    let h = h_sq.max(0.0).sqrt();

    // Midpoint on the radical line.
    let mx = c1.x + a * d.x / dist;
    let my = c1.y + a * d.y / dist;

    // Perpendicular direction.
    let px = -d.y / dist;
    let py = d.x / dist;

    if h < TOLERANCE {
        results.push(Point2::new(mx, my));
    } else {
        results.push(Point2::new(mx + h * px, my + h * py));
        results.push(Point2::new(mx - h * px, my - h * py));
    }

    results
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn segment_segment_crossing() {
        let p = segment_segment_intersect(
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 2.0),
            &Point2::new(0.0, 2.0),
            &Point2::new(2.0, 0.0),
        )
        .unwrap();
        assert!((p.x - 1.0).abs() < TOLERANCE);
        assert!((p.y - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn segment_segment_parallel_returns_none() {
        let hit = segment_segment_intersect(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(0.0, 1.0),
            &Point2::new(1.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn segment_segment_endpoint_touch() {
        let p = segment_segment_intersect(
            &Point2::new(0.0, 0.0),
            &Point2::new(1.0, 0.0),
            &Point2::new(1.0, -1.0),
            &Point2::new(1.0, 1.0),
        )
        .unwrap();
        assert!((p.x - 1.0).abs() < TOLERANCE);
        assert!(p.y.abs() < TOLERANCE);
    }

    // ── segment-circle ──

    #[test]
    fn segment_through_circle_hits_twice() {
        let hits = segment_circle_intersect(
            &Point2::new(-2.0, 0.0),
            &Point2::new(2.0, 0.0),
            &Point2::new(0.0, 0.0),
            1.0,
        );
        assert_eq!(hits.len(), 2, "hits={hits:?}");
    }

    #[test]
    fn segment_ending_on_circle_hits_once() {
        // Radial segment whose start lies exactly on the circle.
        let hits = segment_circle_intersect(
            &Point2::new(1.0, 0.0),
            &Point2::new(3.0, 0.0),
            &Point2::new(0.0, 0.0),
            1.0,
        );
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!((hits[0].x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn segment_outside_circle_misses() {
        let hits = segment_circle_intersect(
            &Point2::new(3.0, 0.0),
            &Point2::new(4.0, 0.0),
            &Point2::new(0.0, 0.0),
            1.0,
        );
        assert!(hits.is_empty());
    }

    // ── circle-circle ──

    #[test]
    fn unit_circles_offset_by_one() {
        // Intersection points at (0.5, ±√3/2).
        let mut hits = circle_circle_intersect(
            &Point2::new(0.0, 0.0),
            1.0,
            &Point2::new(1.0, 0.0),
            1.0,
        );
        assert_eq!(hits.len(), 2, "hits={hits:?}");
        hits.sort_by(|a, b| a.y.total_cmp(&b.y));
        let sqrt3_2 = 3.0_f64.sqrt() / 2.0;
        assert!((hits[0].y + sqrt3_2).abs() < 1e-9);
        assert!((hits[1].y - sqrt3_2).abs() < 1e-9);
    }

    #[test]
    fn tangent_circles_touch_once() {
        let hits = circle_circle_intersect(
            &Point2::new(0.0, 0.0),
            1.0,
            &Point2::new(2.0, 0.0),
            1.0,
        );
        assert_eq!(hits.len(), 1, "hits={hits:?}");
        assert!((hits[0].x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn distant_and_concentric_circles_miss() {
        assert!(circle_circle_intersect(
            &Point2::new(0.0, 0.0),
            1.0,
            &Point2::new(5.0, 0.0),
            1.0
        )
        .is_empty());
        assert!(circle_circle_intersect(
            &Point2::new(0.0, 0.0),
            1.0,
            &Point2::new(0.0, 0.0),
            2.0
        )
        .is_empty());
    }
}
