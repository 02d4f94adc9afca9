use std::fmt;
use std::ops::{Index, IndexMut, AddAssign, SubAssign, MulAssign, DivAssign};
use crate::Vec3;

/// Represents a 3x3 matrix, e.g. for linear 3D transformations.
///
/// Internally the matrix elements are stored as an `[f64; 9]` array in the order as follows:
/// ```text
///     | 0 1 2 |
/// m = | 3 4 5 |
///     | 6 7 8 |
/// ```
///
/// # Example
/// ```rust
/// use nucpair_geometry::{Matrix3, Vec3};
///
/// let vx = Vec3::new(0.0, 3.0, 6.0);
/// let vy = Vec3::new(1.0, 4.0, 7.0);
/// let vz = Vec3::new(2.0, 5.0, 8.0);
/// let mtx = Matrix3::from_column_vectors(&vx, &vy, &vz);
/// assert_eq!(mtx[0], 0.0); assert_eq!(mtx[3], 3.0); assert_eq!(mtx[7], 7.0);
/// ```
#[derive(Clone, Copy, Default, PartialEq)]
pub struct Matrix3 {
    array: [f64; 9],
}

impl Index<usize> for Matrix3 {
    type Output = f64;
    fn index(&self, i: usize) -> &f64 { &self.array[i] }
}

impl IndexMut<usize> for Matrix3 {
    fn index_mut(&mut self, i: usize) -> &mut f64 { &mut self.array[i] }
}

impl fmt::Debug for Matrix3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "[ [{:.3}, {:.3}, {:.3}], [{:.3}, {:.3}, {:.3}], [{:.3}, {:.3}, {:.3}] ]",
            self.array[0], self.array[1], self.array[2], self.array[3], self.array[4],
            self.array[5], self.array[6], self.array[7], self.array[8]
        )
    }
}

impl AddAssign<&Matrix3> for Matrix3 {
    /// Provides `+=` operator that adds another matrix to this matrix.
    fn add_assign(&mut self, rhs: &Matrix3) {
        for i in 0..9 { self[i] += rhs[i]; }
    }
}

impl SubAssign<&Matrix3> for Matrix3 {
    /// Provides `-=` operator that subtracts another matrix from this matrix.
    fn sub_assign(&mut self, rhs: &Matrix3) {
        for i in 0..9 { self[i] -= rhs[i]; }
    }
}

impl MulAssign<f64> for Matrix3 {
    /// Provides `*=` operator that multiplies this matrix by a scalar value
    fn mul_assign(&mut self, scalar: f64) {
        for i in 0..9 { self[i] *= scalar; }
    }
}

impl DivAssign<f64> for Matrix3 {
    /// Provides `/=` operator that divides this matrix by a scalar value
    fn div_assign(&mut self, scalar: f64) {
        for i in 0..9 { self[i] /= scalar; }
    }
}

impl Matrix3 {
    /// Creates a new matrix with all elements initialized to 0.
    pub fn new() -> Self { Self::default() }

    /// Constructs a new matrix from an array of 9 elements given in row-major order.
    pub fn from_array(m: [f64; 9]) -> Self { Matrix3 { array: m } }

    /// Constructs a new matrix from its three column vectors.
    pub fn from_column_vectors(cx: &Vec3, cy: &Vec3, cz: &Vec3) -> Self {
        Matrix3 { array: [cx.x, cy.x, cz.x, cx.y, cy.y, cz.y, cx.z, cy.z, cz.z] }
    }

    /// Returns the identity matrix.
    ///
    /// # Example
    /// ```rust
    /// use nucpair_geometry::Matrix3;
    /// let i = Matrix3::identity();
    /// assert_eq!(i.det(), 1.0);
    /// ```
    pub fn identity() -> Self {
        Matrix3 { array: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0] }
    }

    /// Creates the matrix of a right-handed rotation around a given axis.
    ///
    /// The rotation matrix is computed using the
    /// [Rodrigues' rotation formula](https://en.wikipedia.org/wiki/Rodrigues%27_rotation_formula).
    /// The `axis` vector doesn't have to be normalized.
    ///
    /// # Example
    /// ```rust
    /// use nucpair_geometry::{Matrix3, Vec3};
    /// let rot = Matrix3::rotation_about_axis(&Vec3::new(0.0, 0.0, 1.0), std::f64::consts::FRAC_PI_2);
    /// let v = rot.mul_vec(&Vec3::new(1.0, 0.0, 0.0));
    /// assert!((v.y - 1.0).abs() < 1e-12);
    /// ```
    pub fn rotation_about_axis(axis: &Vec3, angle_rad: f64) -> Matrix3 {
        let u = axis.normalized();
        let cos_theta = angle_rad.cos();
        let sin_theta = angle_rad.sin();

        let mut u_dot = Matrix3::from_array([
            u.x * u.x, u.x * u.y, u.x * u.z,
            u.y * u.x, u.y * u.y, u.y * u.z,
            u.z * u.x, u.z * u.y, u.z * u.z,
        ]);
        let mut u_cross = Matrix3::from_array([
            0.0, -u.z, u.y,
            u.z, 0.0, -u.x,
            -u.y, u.x, 0.0,
        ]);

        let mut u_rot = Matrix3::identity();
        u_rot *= cos_theta;
        u_cross *= sin_theta;
        u_dot *= 1.0 - cos_theta;
        u_rot += &u_cross;
        u_rot += &u_dot;
        return u_rot;
    }

    /// Returns an element of this matrix addressed by its row and column index
    pub fn elem(&self, row: usize, col: usize) -> f64 { self.array[row * 3 + col] }

    /// Sets an element of this matrix addressed by its row and column index
    pub fn set_elem(&mut self, row: usize, col: usize, value: f64) { self.array[row * 3 + col] = value; }

    /// Returns the i-th column of this matrix as a vector
    pub fn column(&self, i: usize) -> Vec3 {
        Vec3::new(self.array[i], self.array[3 + i], self.array[6 + i])
    }

    /// Returns the determinant of this matrix
    pub fn det(&self) -> f64 {
        let m = &self.array;
        m[0] * (m[4] * m[8] - m[5] * m[7])
            - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6])
    }

    /// Returns the transposed copy of this matrix
    pub fn transposed(&self) -> Matrix3 {
        let m = &self.array;
        Matrix3 { array: [m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]] }
    }

    /// Multiplies this matrix by a vector
    pub fn mul_vec(&self, v: &Vec3) -> Vec3 {
        let m = &self.array;
        Vec3::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z,
            m[3] * v.x + m[4] * v.y + m[5] * v.z,
            m[6] * v.x + m[7] * v.y + m[8] * v.z,
        )
    }

    /// Multiplies this matrix by another matrix
    ///
    /// # Example
    /// ```rust
    /// use nucpair_geometry::Matrix3;
    /// let a = Matrix3::identity();
    /// let b = Matrix3::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
    /// assert_eq!(a.mul_mtx(&b), b);
    /// ```
    pub fn mul_mtx(&self, other: &Matrix3) -> Matrix3 {
        let mut out = Matrix3::new();
        for row in 0..3 {
            for col in 0..3 {
                let mut s = 0.0;
                for k in 0..3 { s += self.elem(row, k) * other.elem(k, col); }
                out.set_elem(row, col, s);
            }
        }
        return out;
    }
}
