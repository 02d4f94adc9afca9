//! Step and helical parameter calculation for consecutive base-pair frames.
//!
//! Implements the mid-frame construction of El Hassan & Calladine: the two frames are
//! rotated by half the bend angle onto a shared z-axis, the twist is measured between
//! the rotated x-axes and the translational parameters are the components of the
//! inter-origin vector in the mid-frame basis. Helical parameters come from the screw
//! decomposition of the same rigid-body motion.

use nucpair_geometry::{planar_angle2, signed_angle_about, Matrix3, Vec3};
use nucpair_structure::ReferenceFrame;

const XEPS: f64 = 1.0e-10;

/// The six step parameters of one base-pair step
#[derive(Clone, Copy, Debug, Default)]
pub struct StepParameters {
    /// translation along the mid-frame x-axis, in Angstroms
    pub shift: f64,
    /// translation along the mid-frame y-axis, in Angstroms
    pub slide: f64,
    /// translation along the mid-frame z-axis, in Angstroms
    pub rise: f64,
    /// bend component about the mid-frame x-axis, in degrees
    pub tilt: f64,
    /// bend component about the mid-frame y-axis, in degrees
    pub roll: f64,
    /// rotation about the mid-frame z-axis, in degrees
    pub twist: f64,
}

/// The six helical parameters of one base-pair step
#[derive(Clone, Copy, Debug, Default)]
pub struct HelicalParameters {
    /// base-pair origin offset from the helical axis along the short axis, in Angstroms
    pub x_displacement: f64,
    /// base-pair origin offset from the helical axis along the long axis, in Angstroms
    pub y_displacement: f64,
    /// pitch component of the screw motion, in Angstroms
    pub h_rise: f64,
    /// projection of the helical axis onto the base-pair long axis, in degrees
    pub inclination: f64,
    /// projection of the helical axis onto the base-pair short axis, in degrees
    pub tip: f64,
    /// net rotation of the screw motion, in degrees
    pub h_twist: f64,
}

/// Everything one step calculation produces
#[derive(Clone, Debug)]
pub struct StepResult {
    /// the six step parameters
    pub parameters: StepParameters,
    /// the frame halfway between the two input frames
    pub mid_frame: ReferenceFrame,
    /// true when the second frame arrived anti-parallel and its y/z axes were flipped
    pub flipped_second: bool,
}

/// Calculates the six step parameters and the mid-step frame for two base frames.
///
/// When the two z-axes point to opposite sides (`z1 · z2 < 0`) the y and z columns of
/// the second frame are flipped first and the flip is reported on the result, so the
/// caller can record the strand swap.
///
/// # Example
/// ```
/// use nucpair_analysis::stepwise::step_parameters;
/// use nucpair_structure::ReferenceFrame;
/// use nucpair_geometry::{Matrix3, Vec3};
///
/// // --- an ideal B-DNA step: 36 deg. twist, 3.38 A rise
/// let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::new(0.0, 0.0, 0.0));
/// let rot = Matrix3::rotation_about_axis(&Vec3::new(0.0, 0.0, 1.0), 36f64.to_radians());
/// let f2 = ReferenceFrame::new(rot, Vec3::new(0.0, 0.0, 3.38));
/// let step = step_parameters(&f1, &f2);
/// assert!((step.parameters.twist - 36.0).abs() < 1e-9);
/// assert!((step.parameters.rise - 3.38).abs() < 1e-9);
/// assert!((step.parameters.roll).abs() < 1e-9);
/// ```
pub fn step_parameters(frame1: &ReferenceFrame, frame2: &ReferenceFrame) -> StepResult {
    let f1 = *frame1;
    let mut f2 = *frame2;
    let mut flipped_second = false;
    if Vec3::dot(&f1.z_axis(), &f2.z_axis()) < 0.0 {
        f2 = f2.with_flipped_yz();
        flipped_second = true;
    }

    let z1 = f1.z_axis();
    let z2 = f2.z_axis();
    let hinge = Vec3::cross(&z1, &z2);
    let bend = planar_angle2(&z1, &z2);

    // rotate both frames onto the shared mid z-axis
    let (r1_aligned, r2_aligned) = if hinge.length() > XEPS {
        let half_pos = Matrix3::rotation_about_axis(&hinge, 0.5 * bend);
        let half_neg = Matrix3::rotation_about_axis(&hinge, -0.5 * bend);
        (half_pos.mul_mtx(f1.rotation()), half_neg.mul_mtx(f2.rotation()))
    } else {
        (*f1.rotation(), *f2.rotation())
    };

    let x1 = r1_aligned.column(0);
    let x2 = r2_aligned.column(0);
    let zm = {
        let mut z = r1_aligned.column(2);
        z += &r2_aligned.column(2);
        z.normalized()
    };

    let twist = signed_angle_about(&x1, &x2, &zm).to_degrees();

    let mut xm = &x1 + &x2;
    xm.normalize();
    let ym = Vec3::cross(&zm, &xm);
    let mid_origin = Vec3::midpoint(f1.origin(), f2.origin());
    let mid_frame = ReferenceFrame::new(Matrix3::from_column_vectors(&xm, &ym, &zm), mid_origin);

    // tilt/roll split the bend by the hinge orientation relative to the mid y-axis
    let (tilt, roll) = if bend.to_degrees().abs() < 1e-9 {
        (0.0, 0.0)
    } else {
        let phase = signed_angle_about(&hinge, &ym, &zm);
        let gamma = bend.to_degrees();
        (gamma * phase.sin(), gamma * phase.cos())
    };

    let d = f2.origin() - f1.origin();
    let parameters = StepParameters {
        shift: Vec3::dot(&d, &xm),
        slide: Vec3::dot(&d, &ym),
        rise: Vec3::dot(&d, &zm),
        tilt,
        roll,
        twist,
    };

    return StepResult { parameters, mid_frame, flipped_second };
}

/// Calculates the six helical parameters for two base frames.
///
/// The rigid-body motion taking the first frame to the second is expressed as a screw
/// about a helical axis: its rotation angle is the helical twist, the pitch component
/// the helical rise, the axis orientation relative to the mid-frame gives inclination
/// and tip, and the fixed line of the screw gives the two displacements.
pub fn helical_parameters(frame1: &ReferenceFrame, frame2: &ReferenceFrame) -> HelicalParameters {
    let f1 = *frame1;
    let mut f2 = *frame2;
    if Vec3::dot(&f1.z_axis(), &f2.z_axis()) < 0.0 {
        f2 = f2.with_flipped_yz();
    }

    // helical axis from the frame-difference construction
    let dx = &f2.x_axis() - &f1.x_axis();
    let dy = &f2.y_axis() - &f1.y_axis();
    let mut axis = Vec3::cross(&dx, &dy);
    let mid = step_parameters(&f1, &f2);
    if axis.length() < XEPS {
        // parallel frames: the motion is a pure translation along the shared normal
        axis = mid.mid_frame.z_axis();
    }
    axis.normalize();
    let mut z_sum = f1.z_axis();
    z_sum += &f2.z_axis();
    if Vec3::dot(&axis, &z_sum) < 0.0 { axis *= -1.0; }

    // rotate each frame so its z-axis matches the helical axis
    let align = |frame: &ReferenceFrame| -> Matrix3 {
        let z = frame.z_axis();
        let hinge = Vec3::cross(&axis, &z);
        if hinge.length() < XEPS { return *frame.rotation(); }
        let tip_inc = planar_angle2(&axis, &z);
        Matrix3::rotation_about_axis(&hinge, -tip_inc).mul_mtx(frame.rotation())
    };
    let r1_h = align(&f1);
    let r2_h = align(&f2);

    let h_twist_rad = signed_angle_about(&r1_h.column(0), &r2_h.column(0), &axis);
    let d = f2.origin() - f1.origin();
    let h_rise = Vec3::dot(&d, &axis);

    // inclination and tip: projections of the axis onto the mid-frame long / short axes
    let inclination = Vec3::dot(&axis, &mid.mid_frame.y_axis()).clamp(-1.0, 1.0).asin().to_degrees();
    let tip = Vec3::dot(&axis, &mid.mid_frame.x_axis()).clamp(-1.0, 1.0).asin().to_degrees();

    // displacements from the fixed line of the screw motion
    let (x_displacement, y_displacement) = if h_twist_rad.sin().abs() < 1e-6 {
        (0.0, 0.0)
    } else {
        // solve (I - R) c = t in the plane perpendicular to the axis
        let rot = Matrix3::rotation_about_axis(&axis, h_twist_rad);
        let o1 = *f1.origin();
        let o2 = *f2.origin();
        let t = &o2 - &rot.mul_vec(&o1);
        let t_perp = &t - &(&axis * Vec3::dot(&t, &axis));
        let cos_w = h_twist_rad.cos();
        let sin_w = h_twist_rad.sin();
        // in-plane inverse of (I - R); u, v = axis x u span the plane
        let u = {
            let seed = if axis.x.abs() < 0.9 { Vec3::new(1.0, 0.0, 0.0) } else { Vec3::new(0.0, 1.0, 0.0) };
            let mut u = &seed - &(&axis * Vec3::dot(&seed, &axis));
            u.normalize();
            u
        };
        let v = Vec3::cross(&axis, &u);
        let tu = Vec3::dot(&t_perp, &u);
        let tv = Vec3::dot(&t_perp, &v);
        let det = 2.0 * (1.0 - cos_w);
        let cu = ((1.0 - cos_w) * tu - sin_w * tv) / det;
        let cv = (sin_w * tu + (1.0 - cos_w) * tv) / det;
        let center = {
            let mut c = &u * cu;
            c += &(&v * cv);
            c
        };
        let offset = |origin: &Vec3, rotation: &Matrix3| -> (f64, f64) {
            let w = origin - &center;
            let w_perp = &w - &(&axis * Vec3::dot(&w, &axis));
            (Vec3::dot(&w_perp, &rotation.column(0)), Vec3::dot(&w_perp, &rotation.column(1)))
        };
        let (x1_off, y1_off) = offset(&o1, &r1_h);
        let (x2_off, y2_off) = offset(&o2, &r2_h);
        (0.5 * (x1_off + x2_off), 0.5 * (y1_off + y2_off))
    };

    return HelicalParameters {
        x_displacement,
        y_displacement,
        h_rise,
        inclination,
        tip,
        h_twist: h_twist_rad.to_degrees(),
    };
}

/// Combines the two base frames of one pair into the base-pair reference frame.
///
/// The strand-2 frame is y/z-flipped when anti-parallel, then the mid-frame of the
/// two base frames is taken; this is the frame step parameters are calculated between.
pub fn base_pair_frame(strand1: &ReferenceFrame, strand2: &ReferenceFrame) -> ReferenceFrame {
    step_parameters(strand1, strand2).mid_frame
}

/// One record of the batch step calculation
#[derive(Clone, Debug)]
pub struct StepRecord {
    /// index of the first pair of this step within the input list
    pub step_index: usize,
    /// the six step parameters
    pub parameters: StepParameters,
    /// the six helical parameters
    pub helical: HelicalParameters,
    /// the mid-step frame
    pub mid_frame: ReferenceFrame,
}

/// Calculates step and helical parameters for every adjacent pair of frames,
/// restricted to the subset `{start, start + stride, ...}` of steps.
///
/// `start` is a 0-based step index; `stride` of 1 selects every step. For `n` input
/// frames there are `n - 1` steps.
pub fn step_series(frames: &[ReferenceFrame], start: usize, stride: usize) -> Vec<StepRecord> {
    let mut records = vec![];
    if frames.len() < 2 || stride == 0 { return records; }
    let mut i = start;
    while i + 1 < frames.len() {
        let step = step_parameters(&frames[i], &frames[i + 1]);
        let helical = helical_parameters(&frames[i], &frames[i + 1]);
        records.push(StepRecord {
            step_index: i,
            parameters: step.parameters,
            helical,
            mid_frame: step.mid_frame,
        });
        i += stride;
    }
    return records;
}
