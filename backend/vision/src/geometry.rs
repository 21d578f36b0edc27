//! Polygon → axis-aligned bounding box reduction.

use glimpse_core::BoundingBox;

use crate::response::{BoundingPoly, Vertex};

/// Reduce an optional provider polygon to its bounding box.
pub fn bounding_box(poly: Option<&BoundingPoly>) -> Option<BoundingBox> {
    poly.and_then(|p| reduce_vertices(&p.vertices))
}

/// Smallest axis-aligned box containing every vertex, or `None` when empty.
///
/// Missing coordinates count as 0 and negative ones are clamped to 0.
pub fn reduce_vertices(vertices: &[Vertex]) -> Option<BoundingBox> {
    let mut points = vertices.iter().map(|v| (coord(v.x), coord(v.y)));
    let (first_x, first_y) = points.next()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first_x, first_y, first_x, first_y);
    for (x, y) in points {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    Some(BoundingBox {
        x: min_x,
        y: min_y,
        width: max_x - min_x,
        height: max_y - min_y,
    })
}

fn coord(value: Option<i64>) -> u32 {
    value.unwrap_or(0).clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_reduces_to_its_extent() {
        let vertices = [Vertex::new(5, 10), Vertex::new(50, 10), Vertex::new(50, 40), Vertex::new(5, 40)];
        assert_eq!(
            reduce_vertices(&vertices),
            Some(BoundingBox { x: 5, y: 10, width: 45, height: 30 })
        );
    }

    #[test]
    fn empty_or_missing_polygon_has_no_box() {
        assert_eq!(reduce_vertices(&[]), None);
        assert_eq!(bounding_box(None), None);
        assert_eq!(bounding_box(Some(&BoundingPoly::default())), None);
    }

    #[test]
    fn missing_coordinates_default_to_zero() {
        let vertices = [Vertex { x: None, y: Some(8) }, Vertex { x: Some(12), y: None }];
        assert_eq!(
            reduce_vertices(&vertices),
            Some(BoundingBox { x: 0, y: 0, width: 12, height: 8 })
        );
    }

    #[test]
    fn skewed_polygon_uses_extremes() {
        let vertices = [Vertex::new(10, 2), Vertex::new(30, 6), Vertex::new(26, 20), Vertex::new(7, 16)];
        assert_eq!(
            reduce_vertices(&vertices),
            Some(BoundingBox { x: 7, y: 2, width: 23, height: 18 })
        );
    }

    #[test]
    fn single_vertex_is_a_zero_sized_box() {
        assert_eq!(
            reduce_vertices(&[Vertex::new(3, 4)]),
            Some(BoundingBox { x: 3, y: 4, width: 0, height: 0 })
        );
    }
}
