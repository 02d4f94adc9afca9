use nalgebra as na;

use crate::{GeometryError, Matrix3, Vec3};

/// Result of the least-squares rigid alignment of two point sets.
///
/// The alignment maps the first point set onto the second one:
/// `observed ≈ rotation * reference + translation`.
#[derive(Clone, Debug)]
pub struct RigidAlignment {
    /// rotation matrix of the alignment; a proper rotation with `det = +1`
    pub rotation: Matrix3,
    /// translation vector applied after the rotation
    pub translation: Vec3,
    /// root-mean-square deviation of the aligned points
    pub rmsd: f64,
}

/// Finds the rigid transformation that best superimposes one point set onto another.
///
/// Minimizes the sum of squared distances `sum ||R * reference[i] + t - observed[i]||^2`
/// over all proper rotations `R` and translations `t`, using the SVD-based Kabsch
/// formulation. At least three point pairs are required.
///
/// # Example
/// ```
/// use nucpair_geometry::{rigid_fit, Matrix3, Vec3};
/// let reference = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0),
///                      Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 1.0)];
/// // --- rotate the reference points by 90 deg. around the Z axis
/// let rot = Matrix3::rotation_about_axis(&Vec3::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2);
/// let observed: Vec<Vec3> = reference.iter().map(|p| rot.mul_vec(p)).collect();
/// let fit = rigid_fit(&reference, &observed).unwrap();
/// assert!(fit.rmsd < 1e-10);
/// assert!((fit.rotation.det() - 1.0).abs() < 1e-10);
/// ```
pub fn rigid_fit(reference: &[Vec3], observed: &[Vec3]) -> Result<RigidAlignment, GeometryError> {
    if reference.len() != observed.len() {
        return Err(GeometryError::PointCountMismatch { n_lhs: reference.len(), n_rhs: observed.len() });
    }
    if reference.len() < 3 {
        return Err(GeometryError::TooFewPoints { n_points: reference.len() });
    }

    let n = reference.len() as f64;
    let mut ref_center = Vec3::from_float(0.0);
    let mut obs_center = Vec3::from_float(0.0);
    for i in 0..reference.len() {
        ref_center += &reference[i];
        obs_center += &observed[i];
    }
    ref_center /= n;
    obs_center /= n;

    // covariance of the centered point sets
    let mut cov = na::Matrix3::<f64>::zeros();
    for i in 0..reference.len() {
        let r = &reference[i] - &ref_center;
        let o = &observed[i] - &obs_center;
        for row in 0..3 {
            for col in 0..3 {
                cov[(row, col)] += r[row] * o[col];
            }
        }
    }

    let svd = na::SVD::new(cov, true, true);
    let u = svd.u.ok_or(GeometryError::SvdFailed)?;
    let v_t = svd.v_t.ok_or(GeometryError::SvdFailed)?;

    // R = V * D * U^T, where D fixes an improper rotation
    let d_sign = (v_t.transpose() * u.transpose()).determinant();
    let d = na::Matrix3::from_diagonal(&na::Vector3::new(1.0, 1.0, if d_sign < 0.0 { -1.0 } else { 1.0 }));
    let r = v_t.transpose() * d * u.transpose();

    let mut rotation = Matrix3::new();
    for row in 0..3 {
        for col in 0..3 {
            rotation.set_elem(row, col, r[(row, col)]);
        }
    }

    let rotated_center = rotation.mul_vec(&ref_center);
    let translation = &obs_center - &rotated_center;

    let mut dev2 = 0.0;
    for i in 0..reference.len() {
        let mut p = rotation.mul_vec(&reference[i]);
        p += &translation;
        p -= &observed[i];
        dev2 += p.length_squared();
    }

    return Ok(RigidAlignment { rotation, translation, rmsd: (dev2 / n).sqrt() });
}
