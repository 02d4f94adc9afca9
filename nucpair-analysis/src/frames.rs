//! Reference-frame fitting for nucleotide residues.
//!
//! Every nucleotide gets a right-handed orthonormal frame by least-squares alignment
//! of its ring atoms onto the canonical base template. Residues the registry does not
//! know fall back to a purine-versus-pyrimidine classification by ring-geometry RMSD.

use log::{debug, warn};
use nucpair_geometry::{rigid_fit, Vec3};
use nucpair_structure::{BaseIdentity, ReferenceFrame, Residue, TemplateLibrary};

use crate::AnalysisConfig;

/// The canonical mixed purine-ring geometry the fallback classifier aligns against,
/// in base perimeter order
const FALLBACK_RING_GEOMETRY: [(&str, [f64; 3]); 9] = [
    ("C4", [-1.265, 3.177, 0.000]),
    ("N3", [-2.342, 2.364, 0.001]),
    ("C2", [-1.999, 1.087, 0.000]),
    ("N1", [-0.700, 0.641, 0.000]),
    ("C6", [0.424, 1.460, 0.000]),
    ("C5", [0.071, 2.833, 0.000]),
    ("N7", [0.870, 3.969, 0.000]),
    ("C8", [0.023, 4.962, 0.000]),
    ("N9", [-1.289, 4.551, 0.000]),
];

/// Everything one frame fit produces
#[derive(Clone, Debug)]
pub struct FrameFitResult {
    /// the fitted frame; `None` when the fit was degenerate
    pub frame: Option<ReferenceFrame>,
    /// root-mean-square deviation of the fit, retained as a quality metric
    pub rmsd: f64,
    /// names of the atoms matched between residue and template
    pub matched_atoms: Vec<String>,
    /// template coordinates of the matched atoms
    pub matched_reference: Vec<Vec3>,
    /// experimental coordinates of the matched atoms
    pub matched_experimental: Vec<Vec3>,
    /// base identity of the template used, with its variant
    pub template: Option<(BaseIdentity, bool)>,
    /// one-letter code of the base the residue was treated as, `'?'` when unknown
    pub base_code: char,
    /// false when fewer than three atoms matched or the alignment failed
    pub is_valid: bool,
}

impl FrameFitResult {
    fn degenerate(base_code: char) -> FrameFitResult {
        FrameFitResult {
            frame: None,
            rmsd: 0.0,
            matched_atoms: vec![],
            matched_reference: vec![],
            matched_experimental: vec![],
            template: None,
            base_code,
            is_valid: false,
        }
    }
}

/// Outcome of the purine-versus-pyrimidine fallback classification
#[derive(Clone, Debug)]
pub struct RingClassification {
    /// RMSD against the canonical mixed ring, when at least three atoms matched
    pub rmsd: Option<f64>,
    /// true when any of the purine-only atoms N7, C8, N9 is present
    pub is_purine: bool,
    /// names of the ring atoms that matched
    pub matched_atoms: Vec<String>,
}

/// Classifies an unidentified residue as purine or pyrimidine by aligning whatever
/// ring atoms it has against the canonical mixed purine-ring geometry
pub fn classify_ring_by_rmsd(residue: &Residue) -> RingClassification {
    let mut experimental = vec![];
    let mut reference = vec![];
    let mut matched = vec![];
    let mut purine_atoms = 0;

    for (name, xyz) in FALLBACK_RING_GEOMETRY {
        if let Some(atom) = residue.atom(name) {
            experimental.push(atom.pos);
            reference.push(Vec3::new(xyz[0], xyz[1], xyz[2]));
            matched.push(name.to_string());
            if matches!(name, "N7" | "C8" | "N9") { purine_atoms += 1; }
        }
    }

    let rmsd = if experimental.len() >= 3 {
        rigid_fit(&reference, &experimental).ok().map(|fit| fit.rmsd)
    } else {
        None
    };

    return RingClassification { rmsd, is_purine: purine_atoms > 0, matched_atoms: matched };
}

/// Fits reference frames of single residues against the template library.
///
/// The fitter is configured once per structure: the RNA flag widens the match set
/// by C1', and `legacy_mode` drops C4 from it for compatibility with historic output.
pub struct FrameFitter<'a> {
    templates: &'a TemplateLibrary,
    is_rna: bool,
    legacy_mode: bool,
}

impl<'a> FrameFitter<'a> {
    /// Creates a fitter over a template library
    pub fn new(templates: &'a TemplateLibrary, is_rna: bool, config: &AnalysisConfig) -> FrameFitter<'a> {
        FrameFitter { templates, is_rna, legacy_mode: config.legacy_mode }
    }

    /// Whether C1' takes part in the template match
    pub fn is_rna(&self) -> bool { self.is_rna }

    /// Fits the reference frame of one residue.
    ///
    /// The residue is not modified; callers store the returned frame themselves, which
    /// keeps the write-back a single, explicit step.
    pub fn fit_residue(&self, residue: &Residue) -> FrameFitResult {
        // resolve the base through the registry, falling back to ring-geometry RMSD
        let (base, is_modified) = match residue.nucleotide_info() {
            Some(info) => (info.base, info.is_modified),
            None => {
                let ring = classify_ring_by_rmsd(residue);
                if ring.matched_atoms.is_empty() {
                    return FrameFitResult::degenerate('?');
                }
                debug!("{}: unknown residue classified as {} by ring fit",
                       residue.res_id(), if ring.is_purine { "purine" } else { "pyrimidine" });
                if ring.is_purine {
                    (BaseIdentity::Adenine, true)
                } else {
                    (BaseIdentity::Cytosine, true)
                }
            }
        };

        let template = self.templates.template(base, is_modified);

        let mut match_names: Vec<&str> = if base.is_purine() {
            nucpair_structure::typing::PURINE_RING_ATOMS.to_vec()
        } else {
            nucpair_structure::typing::PYRIMIDINE_RING_ATOMS.to_vec()
        };
        if self.is_rna { match_names.push("C1'"); }
        if self.legacy_mode { match_names.retain(|n| *n != "C4"); }

        let mut matched_atoms = vec![];
        let mut reference = vec![];
        let mut experimental = vec![];
        for name in match_names {
            let (Some(exp), Some(std)) = (residue.atom(name), template.atom(name)) else { continue };
            matched_atoms.push(name.to_string());
            experimental.push(exp.pos);
            reference.push(std.pos);
        }

        let base_code = base.one_letter_code();
        if matched_atoms.len() < 3 {
            warn!("{}: only {} ring atoms matched, no frame fitted",
                  residue.res_id(), matched_atoms.len());
            let mut result = FrameFitResult::degenerate(base_code);
            result.matched_atoms = matched_atoms;
            result.template = Some((base, is_modified));
            return result;
        }

        let fit = match rigid_fit(&reference, &experimental) {
            Ok(fit) => fit,
            Err(e) => {
                warn!("{}: frame fit failed: {}", residue.res_id(), e);
                let mut result = FrameFitResult::degenerate(base_code);
                result.matched_atoms = matched_atoms;
                result.template = Some((base, is_modified));
                return result;
            }
        };

        return FrameFitResult {
            frame: Some(ReferenceFrame::new(fit.rotation, fit.translation)),
            rmsd: fit.rmsd,
            matched_atoms,
            matched_reference: reference,
            matched_experimental: experimental,
            template: Some((base, is_modified)),
            base_code,
            is_valid: true,
        };
    }
}
