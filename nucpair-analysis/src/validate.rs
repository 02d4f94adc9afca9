//! Geometric validation of candidate base pairs.
//!
//! Every ordered nucleotide pair is measured against six gating predicates: frame
//! origin distance, vertical displacement, base plane angle, glycosidic nitrogen
//! distance, projected ring overlap and a minimum hydrogen-bond count. All gates must
//! pass for a pair to participate in selection; a failed gate is an expected outcome,
//! not an error.

use nucpair_geometry::{intersection_area, planar_angle2, Point2, Vec3};
use nucpair_structure::{LegacyIndex, Residue};

use crate::hbond::{HBondFinder, HydrogenBond};
use crate::AnalysisConfig;

/// Geometric observables and gate outcomes of one candidate pair
#[derive(Clone, Debug, Default)]
pub struct ValidationResult {
    /// distance between the two frame origins, in Angstroms
    pub dorg: f64,
    /// magnitude of the inter-origin vector projected onto the average base normal
    pub d_v: f64,
    /// angle between the two base normals, folded into [0, 90] degrees
    pub plane_angle: f64,
    /// distance between the glycosidic nitrogens, in Angstroms
    pub dnn: f64,
    /// projected intersection area of the two base polygons, in square Angstroms
    pub overlap_area: f64,
    /// dot product of the two frame x-axes
    pub dir_x: f64,
    /// dot product of the two frame y-axes
    pub dir_y: f64,
    /// dot product of the two frame z-axes
    pub dir_z: f64,
    /// per-criterion outcomes
    pub dorg_ok: bool,
    pub dv_ok: bool,
    pub plane_angle_ok: bool,
    pub dnn_ok: bool,
    pub overlap_ok: bool,
    pub hbond_ok: bool,
    /// conjunction of all six gates
    pub is_valid: bool,
    /// classified hydrogen bonds between the two bases
    pub hbonds: Vec<HydrogenBond>,
    /// base-base hydrogen-bond count from the counting-only pass
    pub n_base_hbonds: usize,
    /// 2'-hydroxyl contact count from the counting-only pass
    pub n_sugar_hbonds: usize,
    /// raw quality score; lower is better, zero for an ideal pair
    pub quality: f64,
}

/// Validates residue pairs against the six geometric and hydrogen-count gates.
pub struct PairValidator<'a> {
    config: &'a AnalysisConfig,
    finder: HBondFinder<'a>,
}

impl<'a> PairValidator<'a> {
    /// Creates a validator bound to an analysis configuration
    pub fn new(config: &'a AnalysisConfig) -> PairValidator<'a> {
        PairValidator { config, finder: HBondFinder::new(config) }
    }

    /// Validates one ordered residue pair.
    ///
    /// Both residues must carry fitted frames; a pair with a missing frame comes back
    /// with every gate failed. All scalar observables are symmetric under swapping the
    /// two residues.
    pub fn validate(&self, idx1: LegacyIndex, res1: &Residue,
                    idx2: LegacyIndex, res2: &Residue) -> ValidationResult {
        let mut result = ValidationResult::default();
        let (Some(f1), Some(f2)) = (res1.frame(), res2.frame()) else { return result };

        let cfg = self.config;
        let o1 = *f1.origin();
        let o2 = *f2.origin();
        result.dorg = o1.distance_to(&o2);

        let z1 = f1.z_axis();
        let z2 = f2.z_axis();
        let zave = {
            let mut z = if Vec3::dot(&z1, &z2) < 0.0 { &z1 - &z2 } else { &z1 + &z2 };
            z.normalize();
            z
        };
        let d = &o2 - &o1;
        result.d_v = Vec3::dot(&d, &zave).abs();

        let theta = planar_angle2(&z1, &z2).to_degrees();
        result.plane_angle = theta.min(180.0 - theta);

        result.dnn = match (res1.glycosidic_nitrogen(), res2.glycosidic_nitrogen()) {
            (Some(n1), Some(n2)) => n1.pos.distance_to(&n2.pos),
            _ => 0.0,
        };

        let oave = Vec3::midpoint(&o1, &o2);
        result.overlap_area = projected_overlap(res1, res2, &oave, &zave, &f1.x_axis());

        result.dir_x = Vec3::dot(&f1.x_axis(), &f2.x_axis());
        result.dir_y = Vec3::dot(&f1.y_axis(), &f2.y_axis());
        result.dir_z = Vec3::dot(&z1, &z2);

        let (n_base, n_sugar) = self.finder.count_simple(res1, res2);
        result.n_base_hbonds = n_base;
        result.n_sugar_hbonds = n_sugar;

        result.dorg_ok = result.dorg >= cfg.min_dorg && result.dorg <= cfg.max_dorg;
        result.dv_ok = result.d_v >= cfg.min_dv && result.d_v <= cfg.max_dv;
        result.plane_angle_ok = result.plane_angle >= cfg.min_plane_angle
            && result.plane_angle <= cfg.max_plane_angle;
        result.dnn_ok = result.dnn >= cfg.min_dnn;
        // overlapping bases are stacked, not paired
        result.overlap_ok = result.overlap_area <= cfg.overlap_threshold;
        result.hbond_ok = result.n_base_hbonds >= cfg.min_base_hbonds;
        result.is_valid = result.dorg_ok && result.dv_ok && result.plane_angle_ok
            && result.dnn_ok && result.overlap_ok && result.hbond_ok;

        result.quality = result.dorg + 2.0 * result.d_v + result.plane_angle / 20.0;

        if result.is_valid {
            result.hbonds = self.finder.find_detailed(idx1, res1, idx2, res2).final_bonds;
        }

        return result;
    }
}

/// The perimeter polygon of a base: every ring atom is replaced by its exocyclic
/// substituent where one is bonded, which widens the outline to the full base extent
fn base_polygon(residue: &Residue) -> Vec<Vec3> {
    let mut vertices = vec![];
    for ring_name in residue.ring_atom_names() {
        let Some(ring_atom) = residue.atom(ring_name) else { continue };
        let mut vertex = ring_atom.pos;
        let mut best = 2.0; // covalent bond distance cap
        for atom in residue.atoms() {
            if atom.element == "H" { continue; }
            if residue.ring_atom_names().contains(&atom.name.as_str()) { continue; }
            let dist = atom.pos.distance_to(&ring_atom.pos);
            if dist > 0.1 && dist < best {
                best = dist;
                vertex = atom.pos;
            }
        }
        vertices.push(vertex);
    }
    return vertices;
}

/// Intersection area of the two base outlines projected onto the plane through `oave`
/// perpendicular to `zave`
fn projected_overlap(res1: &Residue, res2: &Residue, oave: &Vec3, zave: &Vec3,
                     x_hint: &Vec3) -> f64 {
    let poly1 = base_polygon(res1);
    let poly2 = base_polygon(res2);
    if poly1.len() < 3 || poly2.len() < 3 { return 0.0; }

    // in-plane basis; the hint only fixes an arbitrary rotation of the projection
    let mut u = x_hint - &(zave * Vec3::dot(x_hint, zave));
    if u.length() < 1e-9 {
        let seed = Vec3::new(0.0, 1.0, 0.0);
        u = &seed - &(zave * Vec3::dot(&seed, zave));
    }
    u.normalize();
    let v = Vec3::cross(zave, &u);

    let project = |poly: &[Vec3]| -> Vec<Point2> {
        poly.iter().map(|p| {
            let rel = p - oave;
            Point2::new(Vec3::dot(&rel, &u), Vec3::dot(&rel, &v))
        }).collect()
    };

    return intersection_area(&project(&poly1), &project(&poly2));
}
