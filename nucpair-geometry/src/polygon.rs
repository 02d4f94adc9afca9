/// 2D point used by polygon calculations
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    /// the ``x`` coordinate of this point
    pub x: f64,
    /// the ``y`` coordinate of this point
    pub y: f64,
}

impl Point2 {
    /// Creates a new point from its two coordinates
    pub fn new(x: f64, y: f64) -> Point2 { Point2 { x, y } }
}

/// Calculates the area of a planar polygon given as an ordered vertex loop.
///
/// The shoelace formula is used; vertex order may be either clockwise or counter-clockwise.
///
/// # Example
/// ```
/// use nucpair_geometry::{polygon_area, Point2};
/// let unit_square = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0),
///                        Point2::new(1.0, 1.0), Point2::new(0.0, 1.0)];
/// assert!((polygon_area(&unit_square) - 1.0).abs() < 1e-12);
/// ```
pub fn polygon_area(vertices: &[Point2]) -> f64 {
    if vertices.len() < 3 { return 0.0; }
    let mut doubled = 0.0;
    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        doubled += vertices[i].x * vertices[j].y - vertices[j].x * vertices[i].y;
    }
    return doubled.abs() * 0.5;
}

fn signed_area2(vertices: &[Point2]) -> f64 {
    let mut doubled = 0.0;
    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        doubled += vertices[i].x * vertices[j].y - vertices[j].x * vertices[i].y;
    }
    return doubled;
}

/// ensures counter-clockwise vertex order
fn oriented_ccw(vertices: &[Point2]) -> Vec<Point2> {
    let mut out: Vec<Point2> = vertices.to_vec();
    if signed_area2(&out) < 0.0 { out.reverse(); }
    return out;
}

fn is_inside(p: &Point2, a: &Point2, b: &Point2) -> bool {
    // left-of-or-on test for the directed edge a -> b of a CCW polygon
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x) >= -1e-12
}

fn edge_intersection(s: &Point2, e: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let dx = e.x - s.x;
    let dy = e.y - s.y;
    let ex = b.x - a.x;
    let ey = b.y - a.y;
    let denom = dx * ey - dy * ex;
    if denom.abs() < 1e-15 {
        return *e;
    }
    let t = ((a.x - s.x) * ey - (a.y - s.y) * ex) / denom;
    return Point2::new(s.x + t * dx, s.y + t * dy);
}

/// Calculates the intersection area of two planar polygons.
///
/// The subject polygon is clipped against every edge of the clip polygon
/// (the Sutherland-Hodgman construction) and the area of the clipped loop is returned.
/// Vertices of both polygons may be given in either winding order. The returned area
/// is never negative; it is zero when the polygons are disjoint.
///
/// # Example
/// ```
/// use nucpair_geometry::{intersection_area, Point2};
/// let sq = |x0: f64, y0: f64| vec![Point2::new(x0, y0), Point2::new(x0 + 2.0, y0),
///     Point2::new(x0 + 2.0, y0 + 2.0), Point2::new(x0, y0 + 2.0)];
/// // --- two 2x2 squares overlapping over a 1x1 corner
/// assert!((intersection_area(&sq(0.0, 0.0), &sq(1.0, 1.0)) - 1.0).abs() < 1e-12);
/// // --- disjoint squares
/// assert_eq!(intersection_area(&sq(0.0, 0.0), &sq(5.0, 5.0)), 0.0);
/// ```
pub fn intersection_area(subject: &[Point2], clip: &[Point2]) -> f64 {
    if subject.len() < 3 || clip.len() < 3 { return 0.0; }

    let clip_ccw = oriented_ccw(clip);
    let mut output = oriented_ccw(subject);

    for i in 0..clip_ccw.len() {
        if output.len() < 3 { return 0.0; }
        let a = clip_ccw[i];
        let b = clip_ccw[(i + 1) % clip_ccw.len()];

        let input = output;
        output = Vec::with_capacity(input.len() + 4);
        for j in 0..input.len() {
            let current = input[j];
            let previous = input[(j + input.len() - 1) % input.len()];
            let current_in = is_inside(&current, &a, &b);
            let previous_in = is_inside(&previous, &a, &b);
            if current_in {
                if !previous_in {
                    output.push(edge_intersection(&previous, &current, &a, &b));
                }
                output.push(current);
            } else if previous_in {
                output.push(edge_intersection(&previous, &current, &a, &b));
            }
        }
    }

    return polygon_area(&output);
}
