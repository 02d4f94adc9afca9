use crate::Vec3;

/// Clamps the argument of `acos` to the `[-1, 1]` range to tolerate numerical round-off
pub(crate) fn safe_acos(x: f64) -> f64 { x.clamp(-1.0, 1.0).acos() }

/// Calculates the angle between two vectors.
///
/// Returns the angle in radians from the `[0, pi]` range.
pub fn planar_angle2(va: &Vec3, vb: &Vec3) -> f64 {
    let denom = va.length() * vb.length();
    if denom < 1e-12 { return 0.0; }
    return safe_acos(Vec3::dot(va, vb) / denom);
}

/// Calculates the planar angle at the vertex `b` of three points `a`, `b` and `c`.
///
/// Returns the angle in radians from the `[0, pi]` range.
///
/// # Example
/// ```
/// use nucpair_geometry::{planar_angle3, Vec3};
/// // --- triangle 60 deg.
/// let d: f64 = 1.5;
/// let a = Vec3::new(-d, 0.0, 0.0);
/// let b = Vec3::new(0.0, d * (3.0 as f64).sqrt(), 0.0);
/// let c = Vec3::new(d, 0.0, 0.0);
/// assert!((planar_angle3(&a, &b, &c) - 1.0472).abs() < 1e-4);
/// ```
pub fn planar_angle3(a: &Vec3, b: &Vec3, c: &Vec3) -> f64 {
    let ba = a - b;
    let bc = c - b;
    return planar_angle2(&ba, &bc);
}

/// Calculates the dihedral angle defined by four points.
///
/// Returns the signed angle in radians from the `(-pi, pi]` range.
pub fn dihedral_angle4(a: &Vec3, b: &Vec3, c: &Vec3, d: &Vec3) -> f64 {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;

    let n1 = Vec3::cross(&b1, &b2);
    let n2 = Vec3::cross(&b2, &b3);
    let m1 = Vec3::cross(&n1, &b2.normalized());

    let x = Vec3::dot(&n1, &n2);
    let y = Vec3::dot(&m1, &n2);

    return y.atan2(x);
}

/// Calculates the angle between two vectors, measured about a reference axis.
///
/// The returned angle is signed: it is positive when the rotation from `va` to `vb`
/// is right-handed about `axis`. Both input vectors are first projected onto the plane
/// perpendicular to the axis. Returns radians from the `(-pi, pi]` range.
///
/// # Example
/// ```
/// use nucpair_geometry::{signed_angle_about, Vec3};
/// let x = Vec3::new(1.0, 0.0, 0.0);
/// let y = Vec3::new(0.0, 1.0, 0.0);
/// let z = Vec3::new(0.0, 0.0, 1.0);
/// assert!((signed_angle_about(&x, &y, &z).to_degrees() - 90.0).abs() < 1e-10);
/// assert!((signed_angle_about(&y, &x, &z).to_degrees() + 90.0).abs() < 1e-10);
/// ```
pub fn signed_angle_about(va: &Vec3, vb: &Vec3, axis: &Vec3) -> f64 {
    let n = axis.normalized();
    let pa = va - &(&n * Vec3::dot(va, &n));
    let pb = vb - &(&n * Vec3::dot(vb, &n));
    let ang = planar_angle2(&pa, &pb);
    if Vec3::dot(&Vec3::cross(&pa, &pb), &n) < 0.0 { return -ang; }
    return ang;
}
