//! Polygon geometry used to rasterize a coverage area.
//!
//! Polygons are plain vertex rings. A ring may repeat its first vertex at the
//! end (explicitly closed) or not (implicitly closed); both mean the same
//! polygon. Holes are not supported: obstacles are separate polygons.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryIssue, PlannerError, PolygonRef, Result};

/// Tolerance for boundary and collinearity tests.
const EPSILON: f64 = 1e-9;

/// A 2D point in input units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A simple polygon as an ordered vertex ring.
///
/// Serialized as a bare vertex list; deserialization normalizes the ring
/// the same way [`Polygon::new`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct Polygon {
    vertices: Vec<Point>,
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<Point> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}

impl Polygon {
    /// Creates a polygon from its vertices. Consecutive repeated vertices
    /// collapse into one, and a trailing vertex equal to the first one is
    /// dropped so the ring is stored implicitly closed.
    pub fn new(vertices: Vec<Point>) -> Self {
        let mut vertices = vertices;
        vertices.dedup();
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Self { vertices }
    }

    /// Creates a polygon from `(x, y)` tuples.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().copied().map(Point::from).collect())
    }

    /// Axis-aligned rectangle spanning the two corners.
    pub fn rectangle(min: (f64, f64), max: (f64, f64)) -> Self {
        Self::from_coords(&[min, (max.0, min.1), max, (min.0, max.1)])
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Iterates the ring's edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Returns the bounding box, or `None` for an empty ring.
    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.vertices.first()?;
        let mut bounds = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for v in &self.vertices[1..] {
            bounds.min_x = bounds.min_x.min(v.x);
            bounds.min_y = bounds.min_y.min(v.y);
            bounds.max_x = bounds.max_x.max(v.x);
            bounds.max_y = bounds.max_y.max(v.y);
        }
        Some(bounds)
    }

    /// Unsigned shoelace area.
    pub fn area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.0;
        }
        let twice: f64 = self.edges().map(|(a, b)| a.x * b.y - b.x * a.y).sum();
        twice.abs() / 2.0
    }

    /// Checks that the ring is a simple polygon with positive area.
    pub fn validate(&self, polygon: PolygonRef) -> Result<()> {
        let issue = if self.vertices.iter().any(|v| !v.x.is_finite() || !v.y.is_finite()) {
            Some(GeometryIssue::NonFiniteCoordinate)
        } else if self.vertices.len() < 3 {
            Some(GeometryIssue::TooFewVertices(self.vertices.len()))
        } else if self.area() <= EPSILON {
            Some(GeometryIssue::ZeroArea)
        } else if self.is_self_intersecting() {
            Some(GeometryIssue::SelfIntersecting)
        } else {
            None
        };

        match issue {
            Some(issue) => Err(PlannerError::InvalidGeometry { polygon, issue }),
            None => Ok(()),
        }
    }

    /// True if any two non-adjacent edges touch or cross.
    fn is_self_intersecting(&self) -> bool {
        let n = self.vertices.len();
        let edges: Vec<(Point, Point)> = self.edges().collect();
        for i in 0..n {
            for j in i + 1..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                if segments_intersect(edges[i], edges[j]) {
                    return true;
                }
            }
        }
        false
    }

    /// Point containment with the boundary counted as inside.
    pub fn contains(&self, p: Point) -> bool {
        if self.vertices.len() < 3 {
            return false;
        }
        if self.edges().any(|(a, b)| on_segment(p, a, b)) {
            return true;
        }

        // Ray casting towards +x.
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.y > p.y) != (b.y > p.y) {
                let intersect_x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < intersect_x {
                    inside = !inside;
                }
            }
        }
        inside
    }
}

fn cross(o: Point, a: Point, b: Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

fn on_segment(p: Point, a: Point, b: Point) -> bool {
    let length = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
    if cross(a, b, p).abs() > EPSILON * length.max(1.0) {
        return false;
    }
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

fn segments_intersect((p1, p2): (Point, Point), (q1, q2): (Point, Point)) -> bool {
    let d1 = cross(q1, q2, p1);
    let d2 = cross(q1, q2, p2);
    let d3 = cross(p1, p2, q1);
    let d4 = cross(p1, p2, q2);

    if ((d1 > EPSILON && d2 < -EPSILON) || (d1 < -EPSILON && d2 > EPSILON))
        && ((d3 > EPSILON && d4 < -EPSILON) || (d3 < -EPSILON && d4 > EPSILON))
    {
        return true;
    }

    on_segment(p1, q1, q2) || on_segment(p2, q1, q2) || on_segment(q1, p1, p2) || on_segment(q2, p1, p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Polygon {
        Polygon::rectangle((0.0, 0.0), (4.0, 4.0))
    }

    #[test]
    fn test_closed_ring_is_normalized() {
        let closed = Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]);
        assert_eq!(closed.vertices().len(), 3);
    }

    #[test]
    fn test_area_and_bounds() {
        let poly = square();
        assert!((poly.area() - 16.0).abs() < 1e-12);
        let bounds = poly.bounds().unwrap();
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 4.0);
    }

    #[test]
    fn test_contains_interior_and_boundary() {
        let poly = square();
        assert!(poly.contains(Point::new(2.0, 2.0)));
        assert!(poly.contains(Point::new(0.0, 0.0)), "corner counts as inside");
        assert!(poly.contains(Point::new(4.0, 2.0)), "edge counts as inside");
        assert!(!poly.contains(Point::new(4.5, 2.0)));
        assert!(!poly.contains(Point::new(-0.1, -0.1)));
    }

    #[test]
    fn test_contains_concave() {
        // L-shape with the top-right quadrant missing
        let poly = Polygon::from_coords(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ]);
        assert!(poly.contains(Point::new(1.0, 3.0)));
        assert!(poly.contains(Point::new(3.0, 1.0)));
        assert!(!poly.contains(Point::new(3.0, 3.0)));
    }

    #[test]
    fn test_validate_rejects_too_few_vertices() {
        let poly = Polygon::from_coords(&[(0.0, 0.0), (1.0, 1.0)]);
        let err = poly.validate(PolygonRef::Area).unwrap_err();
        assert_eq!(
            err,
            PlannerError::InvalidGeometry {
                polygon: PolygonRef::Area,
                issue: GeometryIssue::TooFewVertices(2),
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero_area() {
        let poly = Polygon::from_coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
        let err = poly.validate(PolygonRef::Obstacle(3)).unwrap_err();
        assert_eq!(
            err,
            PlannerError::InvalidGeometry {
                polygon: PolygonRef::Obstacle(3),
                issue: GeometryIssue::ZeroArea,
            }
        );
    }

    #[test]
    fn test_validate_rejects_bowtie() {
        let poly = Polygon::from_coords(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
        let err = poly.validate(PolygonRef::Area).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::InvalidGeometry {
                issue: GeometryIssue::SelfIntersecting,
                ..
            }
        ));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let poly = Polygon::from_coords(&[(0.0, 0.0), (f64::NAN, 0.0), (1.0, 1.0)]);
        assert!(poly.validate(PolygonRef::Area).is_err());
    }

    #[test]
    fn test_validate_accepts_simple_polygons() {
        assert!(square().validate(PolygonRef::Area).is_ok());
        let triangle = Polygon::from_coords(&[(0.0, 0.0), (3.0, 0.0), (0.0, 3.0)]);
        assert!(triangle.validate(PolygonRef::Area).is_ok());
    }

    #[test]
    fn test_repeated_vertices_collapse() {
        let poly = Polygon::from_coords(&[(0.0, 0.0), (0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        assert_eq!(poly.vertices().len(), 4);
        assert!(poly.validate(PolygonRef::Area).is_ok());
    }

    #[test]
    fn test_deserialized_closed_ring_is_normalized() {
        let json = r#"[{"x":0,"y":0},{"x":4,"y":0},{"x":4,"y":4},{"x":0,"y":4},{"x":0,"y":0}]"#;
        let poly: Polygon = serde_json::from_str(json).unwrap();
        assert_eq!(poly, square());
        assert!(poly.validate(PolygonRef::Area).is_ok());
    }

    #[test]
    fn test_serde_roundtrip() {
        let poly = square();
        let json = serde_json::to_string(&poly).unwrap();
        let back: Polygon = serde_json::from_str(&json).unwrap();
        assert_eq!(poly, back);
    }
}
