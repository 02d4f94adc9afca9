#![allow(dead_code)]

//! Fixture builders shared by the integration tests.
//!
//! Duplexes are generated from the shipped base templates: strand-1 bases are placed
//! by a running reference frame, strand-2 bases by the same frame with its y and z
//! axes flipped, and the frame advances between pairs by an exact twist-bend-twist
//! step so the expected step parameters are known by construction.

use nucpair_geometry::{Matrix3, Vec3};
use nucpair_structure::{Atom, BaseIdentity, ReferenceFrame, Structure, TemplateLibrary};

pub fn template_dir() -> String {
    format!("{}/../resources/templates", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_templates() -> TemplateLibrary {
    TemplateLibrary::open(template_dir()).expect("test templates must load")
}

/// One generated base-pair step
#[derive(Clone, Copy, Debug)]
pub struct StepSpec {
    pub twist_deg: f64,
    pub roll_deg: f64,
    pub shift: f64,
    pub slide: f64,
    pub rise: f64,
}

impl StepSpec {
    /// The ideal B-DNA step: 36 degree twist, 3.38 Angstrom rise
    pub fn b_dna() -> StepSpec {
        StepSpec { twist_deg: 36.0, roll_deg: 0.0, shift: 0.0, slide: 0.0, rise: 3.38 }
    }

    /// An A-form RNA step: 32.7 degree twist with roll and negative slide
    pub fn a_rna() -> StepSpec {
        StepSpec { twist_deg: 32.7, roll_deg: 8.4, shift: 0.0, slide: -1.6, rise: 2.81 }
    }
}

/// Advances a frame by one step: the rotation is the twist-bend-twist composition
/// `Rz(omega/2) * Ry(roll) * Rz(omega/2)`, the translation is expressed in the
/// mid-step frame `Rz(omega/2) * Ry(roll/2)`
pub fn advance_frame(frame: &ReferenceFrame, step: &StepSpec) -> ReferenceFrame {
    let omega = step.twist_deg.to_radians();
    let gamma = step.roll_deg.to_radians();
    let z = Vec3::new(0.0, 0.0, 1.0);
    let y = Vec3::new(0.0, 1.0, 0.0);

    let half_twist = Matrix3::rotation_about_axis(&z, 0.5 * omega);
    let local_rot = half_twist.mul_mtx(&Matrix3::rotation_about_axis(&y, gamma)).mul_mtx(&half_twist);
    let mid_rot = half_twist.mul_mtx(&Matrix3::rotation_about_axis(&y, 0.5 * gamma));

    let rotation = frame.rotation().mul_mtx(&local_rot);
    let translation_local = mid_rot.mul_vec(&Vec3::new(step.shift, step.slide, step.rise));
    let mut origin = *frame.origin();
    origin += &frame.rotation().mul_vec(&translation_local);
    return ReferenceFrame::new(rotation, origin);
}

fn residue_name(base: BaseIdentity, dna: bool) -> String {
    let code = base.one_letter_code().to_string();
    match base {
        BaseIdentity::Pseudouridine => String::from("PSU"),
        _ if dna => format!("D{}", code),
        _ => code,
    }
}

/// Places the atoms of one base by a frame, returning them in template order
pub fn place_base(templates: &TemplateLibrary, base: BaseIdentity, is_modified: bool,
                  frame: &ReferenceFrame, res_name: &str, chain: &str, res_seq: i32) -> Vec<Atom> {
    let template = templates.template(base, is_modified);
    template.atoms().iter().map(|a| {
        let mut pos = frame.rotation().mul_vec(&a.pos);
        pos += frame.origin();
        Atom::new(&a.name, res_name, chain, res_seq, pos)
    }).collect()
}

/// The y/z-flipped copy of a frame, where the strand-2 base of a pair sits
pub fn strand2_frame(frame: &ReferenceFrame) -> ReferenceFrame {
    frame.with_flipped_yz()
}

/// Builds an ideal duplex: `pairs[i]` names the (strand-1, strand-2) bases of pair i
/// and `steps[i]` the step taken after pair i. Strand 1 becomes chain A in pairing
/// order; strand 2 becomes chain B, deposited 5'→3', i.e. in reverse pairing order.
pub fn build_duplex(templates: &TemplateLibrary, pairs: &[(BaseIdentity, BaseIdentity)],
                    steps: &[StepSpec], dna: bool) -> Structure {
    build_duplex_with_frames(templates, pairs, &duplex_frames(pairs.len(), steps), dna)
}

/// The frames of `n` consecutive pairs under the given steps
pub fn duplex_frames(n: usize, steps: &[StepSpec]) -> Vec<ReferenceFrame> {
    let mut frames = vec![ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0))];
    for i in 1..n {
        let step = steps.get(i - 1).copied().unwrap_or(StepSpec::b_dna());
        let next = advance_frame(&frames[i - 1], &step);
        frames.push(next);
    }
    return frames;
}

/// Builds a duplex with explicitly given pair frames
pub fn build_duplex_with_frames(templates: &TemplateLibrary,
                                pairs: &[(BaseIdentity, BaseIdentity)],
                                frames: &[ReferenceFrame], dna: bool) -> Structure {
    let mut atoms = vec![];
    for (i, ((base1, _), frame)) in pairs.iter().zip(frames).enumerate() {
        atoms.extend(place_base(templates, *base1, false, frame,
                                &residue_name(*base1, dna), "A", i as i32 + 1));
    }
    for (i, ((_, base2), frame)) in pairs.iter().zip(frames).enumerate().rev() {
        let flipped = strand2_frame(frame);
        atoms.extend(place_base(templates, *base2, false, &flipped,
                                &residue_name(*base2, dna), "B", (pairs.len() - i) as i32));
    }
    return Structure::from_atoms("fixture", atoms);
}

/// The classic B-DNA decamer: ten G-C pairs under the ideal 36/3.38 step
pub fn b_dna_decamer(templates: &TemplateLibrary) -> Structure {
    let pairs: Vec<(BaseIdentity, BaseIdentity)> = (0..10).map(|i| {
        if i % 2 == 0 {
            (BaseIdentity::Guanine, BaseIdentity::Cytosine)
        } else {
            (BaseIdentity::Adenine, BaseIdentity::Thymine)
        }
    }).collect();
    let steps = vec![StepSpec::b_dna(); 9];
    return build_duplex(templates, &pairs, &steps, true);
}

/// A six-pair A-form RNA duplex
pub fn a_rna_hexamer(templates: &TemplateLibrary) -> Structure {
    let pairs = vec![
        (BaseIdentity::Guanine, BaseIdentity::Cytosine),
        (BaseIdentity::Adenine, BaseIdentity::Uracil),
        (BaseIdentity::Cytosine, BaseIdentity::Guanine),
        (BaseIdentity::Uracil, BaseIdentity::Adenine),
        (BaseIdentity::Guanine, BaseIdentity::Cytosine),
        (BaseIdentity::Adenine, BaseIdentity::Uracil),
    ];
    let steps = vec![StepSpec::a_rna(); 5];
    return build_duplex(templates, &pairs, &steps, false);
}
