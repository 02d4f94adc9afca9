#[cfg(test)]
mod test_polygon {
    use nucpair_geometry::{assert_delta, intersection_area, polygon_area, Point2};

    fn square(x0: f64, y0: f64, side: f64) -> Vec<Point2> {
        vec![
            Point2::new(x0, y0),
            Point2::new(x0 + side, y0),
            Point2::new(x0 + side, y0 + side),
            Point2::new(x0, y0 + side),
        ]
    }

    #[test]
    fn area_of_simple_polygons() {
        assert_delta!(polygon_area(&square(0.0, 0.0, 2.0)), 4.0, 1e-12);
        let triangle = vec![Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(0.0, 3.0)];
        assert_delta!(polygon_area(&triangle), 6.0, 1e-12);
        // --- winding order must not matter
        let mut reversed = triangle.clone();
        reversed.reverse();
        assert_delta!(polygon_area(&reversed), 6.0, 1e-12);
    }

    #[test]
    fn overlapping_squares() {
        let a = square(0.0, 0.0, 2.0);
        let b = square(1.0, 1.0, 2.0);
        assert_delta!(intersection_area(&a, &b), 1.0, 1e-9);
        assert_delta!(intersection_area(&b, &a), 1.0, 1e-9);
    }

    #[test]
    fn contained_polygon() {
        let outer = square(0.0, 0.0, 4.0);
        let inner = square(1.0, 1.0, 1.0);
        assert_delta!(intersection_area(&outer, &inner), 1.0, 1e-9);
        assert_delta!(intersection_area(&inner, &outer), 1.0, 1e-9);
    }

    #[test]
    fn disjoint_polygons_have_zero_overlap() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(10.0, 10.0, 1.0);
        assert_delta!(intersection_area(&a, &b), 0.0, 1e-12);
    }

    #[test]
    fn hexagon_against_shifted_copy() {
        // a lens-shaped intersection of two convex polygons
        let hex: Vec<Point2> = (0..6).map(|i| {
            let a = std::f64::consts::PI / 3.0 * i as f64;
            Point2::new(a.cos(), a.sin())
        }).collect();
        let shifted: Vec<Point2> = hex.iter().map(|p| Point2::new(p.x + 1.0, p.y)).collect();
        let lens = intersection_area(&hex, &shifted);
        assert!(lens > 0.0 && lens < polygon_area(&hex));
        // symmetric under swapping the subject and the clip polygon
        assert_delta!(lens, intersection_area(&shifted, &hex), 1e-9);
    }
}
