//! Polygon and point geometry in percentage space.
//!
//! All functions are total: degenerate input yields a deterministic answer
//! or a [`GeometryError`], never a panic.

use thiserror::Error;

use crate::model::{Coordinate, MIN_POLYGON_VERTICES};

/// Distance under which a point counts as lying on a polygon edge.
const EDGE_EPSILON: f32 = 1e-4;

/// Errors from vertex editing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Removing a vertex would leave fewer than three.
    #[error("A polygon needs at least {min} vertices (has {count})", min = MIN_POLYGON_VERTICES)]
    TooFewVertices { count: usize },

    /// Vertex index outside the polygon.
    #[error("Vertex index {index} out of range for {len} vertices")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Check if a point is inside a polygon.
///
/// Uses the even-odd ray casting rule. Points on an edge or vertex are
/// inside. Fewer than three vertices never contain anything.
pub fn point_in_polygon(point: Coordinate, vertices: &[Coordinate]) -> bool {
    if vertices.len() < MIN_POLYGON_VERTICES {
        return false;
    }

    if edges(vertices).any(|(a, b)| distance_to_segment(point, a, b) <= EDGE_EPSILON) {
        return true;
    }

    let (x, y) = (point.x, point.y);
    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].x, vertices[i].y);
        let (xj, yj) = (vertices[j].x, vertices[j].y);
        // yi != yj whenever the first clause holds, so the division is safe
        if ((yi > y) != (yj > y)) && (x < (xj - xi) * (y - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Shortest distance from a point to the segment `a..b`.
pub fn distance_to_segment(point: Coordinate, a: Coordinate, b: Coordinate) -> f32 {
    let (ex, ey) = (b.x - a.x, b.y - a.y);
    let len_sq = ex * ex + ey * ey;

    if len_sq <= f32::EPSILON {
        // Segment is essentially a point
        return point.distance_to(&a);
    }

    // Project point onto line, clamped to segment
    let t = (((point.x - a.x) * ex + (point.y - a.y) * ey) / len_sq).clamp(0.0, 1.0);
    let projection = Coordinate::new(a.x + ex * t, a.y + ey * t);
    point.distance_to(&projection)
}

/// Arithmetic mean of two points.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    Coordinate::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Arithmetic mean of all vertices (not area weighted). None when empty.
pub fn centroid(vertices: &[Coordinate]) -> Option<Coordinate> {
    if vertices.is_empty() {
        return None;
    }
    let n = vertices.len() as f32;
    let (sx, sy) = vertices
        .iter()
        .fold((0.0, 0.0), |(sx, sy), v| (sx + v.x, sy + v.y));
    Some(Coordinate::new(sx / n, sy / n))
}

/// Closed-ring edges `(v[i], v[i+1])`, including the edge back to the first vertex.
pub fn edges(vertices: &[Coordinate]) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

/// Midpoint of every edge, paired with the index of the vertex it follows.
pub fn edge_midpoints(vertices: &[Coordinate]) -> Vec<(usize, Coordinate)> {
    if vertices.len() < 2 {
        return Vec::new();
    }
    edges(vertices)
        .enumerate()
        .map(|(i, (a, b))| (i, midpoint(a, b)))
        .collect()
}

/// Return a copy of `vertices` with `vertex` inserted after `after_index`.
pub fn insert_vertex(
    vertices: &[Coordinate],
    after_index: usize,
    vertex: Coordinate,
) -> Result<Vec<Coordinate>, GeometryError> {
    if after_index >= vertices.len() {
        return Err(GeometryError::IndexOutOfRange {
            index: after_index,
            len: vertices.len(),
        });
    }
    let mut result = Vec::with_capacity(vertices.len() + 1);
    result.extend_from_slice(&vertices[..=after_index]);
    result.push(vertex);
    result.extend_from_slice(&vertices[after_index + 1..]);
    Ok(result)
}

/// Return a copy of `vertices` without the vertex at `index`.
///
/// Refused when the polygon would drop below three vertices.
pub fn remove_vertex(
    vertices: &[Coordinate],
    index: usize,
) -> Result<Vec<Coordinate>, GeometryError> {
    if index >= vertices.len() {
        return Err(GeometryError::IndexOutOfRange {
            index,
            len: vertices.len(),
        });
    }
    if vertices.len() <= MIN_POLYGON_VERTICES {
        return Err(GeometryError::TooFewVertices {
            count: vertices.len(),
        });
    }
    let mut result = vertices.to_vec();
    result.remove(index);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn c(x: f32, y: f32) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn square() -> Vec<Coordinate> {
        vec![c(0.0, 0.0), c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0)]
    }

    #[test]
    fn test_point_in_square() {
        assert!(point_in_polygon(c(5.0, 5.0), &square()));
        assert!(!point_in_polygon(c(15.0, 15.0), &square()));
    }

    #[test]
    fn test_edge_and_vertex_are_inclusive() {
        assert!(point_in_polygon(c(0.0, 5.0), &square()));
        assert!(point_in_polygon(c(10.0, 5.0), &square()));
        assert!(point_in_polygon(c(5.0, 10.0), &square()));
        assert!(point_in_polygon(c(0.0, 0.0), &square()));
    }

    #[test]
    fn test_concave_polygon() {
        // U shape open at the top
        let u = vec![
            c(0.0, 0.0),
            c(30.0, 0.0),
            c(30.0, 30.0),
            c(20.0, 30.0),
            c(20.0, 10.0),
            c(10.0, 10.0),
            c(10.0, 30.0),
            c(0.0, 30.0),
        ];
        assert!(point_in_polygon(c(5.0, 20.0), &u));
        assert!(!point_in_polygon(c(15.0, 20.0), &u));
    }

    #[test]
    fn test_degenerate_polygons_do_not_panic() {
        assert!(!point_in_polygon(c(1.0, 1.0), &[]));
        assert!(!point_in_polygon(c(1.0, 1.0), &[c(0.0, 0.0), c(2.0, 2.0)]));

        // All vertices identical
        let collapsed = vec![c(3.0, 3.0); 4];
        assert!(point_in_polygon(c(3.0, 3.0), &collapsed));
        assert!(!point_in_polygon(c(4.0, 3.0), &collapsed));

        // Collinear
        let line = vec![c(0.0, 0.0), c(5.0, 5.0), c(10.0, 10.0)];
        assert!(!point_in_polygon(c(0.0, 10.0), &line));

        // Self-intersecting bow tie still gives a deterministic answer
        let bow = vec![c(0.0, 0.0), c(10.0, 10.0), c(10.0, 0.0), c(0.0, 10.0)];
        let first = point_in_polygon(c(5.0, 2.0), &bow);
        assert_eq!(first, point_in_polygon(c(5.0, 2.0), &bow));
    }

    #[test]
    fn test_midpoint_and_centroid() {
        assert_eq!(midpoint(c(0.0, 0.0), c(10.0, 4.0)), c(5.0, 2.0));
        let centre = centroid(&square()).unwrap();
        assert!(approx_eq(centre.x, 5.0) && approx_eq(centre.y, 5.0));
        assert_eq!(centroid(&[]), None);
    }

    #[test]
    fn test_edge_midpoints_close_the_ring() {
        let mids = edge_midpoints(&square());
        assert_eq!(mids.len(), 4);
        assert_eq!(mids[3], (3, c(0.0, 5.0)));
    }

    #[test]
    fn test_insert_vertex() {
        let result = insert_vertex(&square(), 1, c(12.0, 5.0)).unwrap();
        assert_eq!(result.len(), 5);
        assert_eq!(result[2], c(12.0, 5.0));
        assert_eq!(result[3], c(10.0, 10.0));

        let closing = insert_vertex(&square(), 3, c(-1.0, 5.0)).unwrap();
        assert_eq!(closing[4], c(-1.0, 5.0));

        assert_eq!(
            insert_vertex(&square(), 4, c(0.0, 0.0)),
            Err(GeometryError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_remove_vertex_keeps_minimum() {
        let triangle = remove_vertex(&square(), 0).unwrap();
        assert_eq!(triangle, vec![c(10.0, 0.0), c(10.0, 10.0), c(0.0, 10.0)]);

        assert_eq!(
            remove_vertex(&triangle, 1),
            Err(GeometryError::TooFewVertices { count: 3 })
        );
        assert!(matches!(
            remove_vertex(&square(), 9),
            Err(GeometryError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_insert_remove_sequence_never_below_three() {
        let mut polygon = vec![c(0.0, 0.0), c(10.0, 0.0), c(5.0, 10.0)];
        for step in 0..20 {
            if step % 3 == 0 {
                polygon = insert_vertex(&polygon, 0, c(step as f32, 1.0)).unwrap();
            } else if let Ok(next) = remove_vertex(&polygon, 0) {
                polygon = next;
            }
            assert!(polygon.len() >= MIN_POLYGON_VERTICES);
        }
    }

    #[test]
    fn test_distance_to_segment() {
        assert!(approx_eq(distance_to_segment(c(5.0, 3.0), c(0.0, 0.0), c(10.0, 0.0)), 3.0));
        assert!(approx_eq(distance_to_segment(c(13.0, 4.0), c(0.0, 0.0), c(10.0, 0.0)), 5.0));
        assert!(approx_eq(distance_to_segment(c(3.0, 4.0), c(0.0, 0.0), c(0.0, 0.0)), 5.0));
    }
}
