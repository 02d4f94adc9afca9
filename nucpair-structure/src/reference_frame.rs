use nucpair_geometry::{Matrix3, Vec3};

/// Right-handed orthonormal reference frame attached to a base.
///
/// The frame holds a proper rotation matrix whose columns are the x, y and z axes
/// of the base, and the frame origin. Once fitted, a frame is treated as read-only;
/// downstream consumers take value snapshots.
///
/// # Example
/// ```
/// use nucpair_structure::ReferenceFrame;
/// use nucpair_geometry::{Matrix3, Vec3};
/// let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::new(1.0, 2.0, 3.0));
/// assert!(frame.is_orthonormal(1e-6));
/// assert_eq!(frame.z_axis(), Vec3::new(0.0, 0.0, 1.0));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ReferenceFrame {
    rotation: Matrix3,
    origin: Vec3,
}

impl ReferenceFrame {
    /// Creates a frame from a rotation matrix and an origin
    pub fn new(rotation: Matrix3, origin: Vec3) -> ReferenceFrame {
        ReferenceFrame { rotation, origin }
    }

    /// Provides read-only access to the rotation matrix of this frame
    pub fn rotation(&self) -> &Matrix3 { &self.rotation }

    /// Provides read-only access to the origin of this frame
    pub fn origin(&self) -> &Vec3 { &self.origin }

    /// Returns the x axis (first column of the rotation matrix)
    pub fn x_axis(&self) -> Vec3 { self.rotation.column(0) }

    /// Returns the y axis (second column of the rotation matrix)
    pub fn y_axis(&self) -> Vec3 { self.rotation.column(1) }

    /// Returns the base normal, i.e. the z axis (third column of the rotation matrix)
    pub fn z_axis(&self) -> Vec3 { self.rotation.column(2) }

    /// Returns a copy of this frame with its y and z axes negated.
    ///
    /// This is the strand-2 correction applied before combining the frames of
    /// an anti-parallel base pair.
    pub fn with_flipped_yz(&self) -> ReferenceFrame {
        let x = self.x_axis();
        let mut y = self.y_axis();
        let mut z = self.z_axis();
        y *= -1.0;
        z *= -1.0;
        ReferenceFrame { rotation: Matrix3::from_column_vectors(&x, &y, &z), origin: self.origin }
    }

    /// Checks that the rotation columns are unit length, mutually orthogonal and
    /// right-handed, all within the given tolerance
    pub fn is_orthonormal(&self, tolerance: f64) -> bool {
        let x = self.x_axis();
        let y = self.y_axis();
        let z = self.z_axis();
        if (x.length() - 1.0).abs() > tolerance { return false; }
        if (y.length() - 1.0).abs() > tolerance { return false; }
        if (z.length() - 1.0).abs() > tolerance { return false; }
        if Vec3::dot(&x, &y).abs() > tolerance { return false; }
        if Vec3::dot(&x, &z).abs() > tolerance { return false; }
        if Vec3::dot(&y, &z).abs() > tolerance { return false; }
        return (self.rotation.det() - 1.0).abs() <= tolerance;
    }
}
