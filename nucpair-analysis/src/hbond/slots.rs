//! Slot-based hydrogen-bond optimization.
//!
//! An alternative selection path to the distance-greedy conflict resolution: every
//! donor predicts where its hydrogens point from planar sp2 geometry, every acceptor
//! predicts its lone-pair directions, and candidates are picked greedily by angular
//! alignment to a free slot, respecting per-atom capacities. A second bond may share
//! an atom (bifurcation) when its direction stays at least 60 degrees away from the
//! bonds already accepted there.

use nucpair_geometry::{planar_angle2, Matrix3, Vec3};
use nucpair_structure::{LegacyIndex, Residue};

use super::quality::neighbor_of;
use super::HydrogenBond;

/// Smallest angular separation between two bonds sharing an atom, in degrees
const BIFURCATION_ANGLE: f64 = 60.0;

/// Number of hydrogens a donor group carries, i.e. how many bonds it can donate
pub fn donor_capacity(atom_name: &str) -> usize {
    match atom_name.trim() {
        // exocyclic amino groups carry two hydrogens
        "N2" | "N4" | "N6" => 2,
        // imino ring nitrogens and hydroxyls carry one
        "N1" | "N3" | "O2'" => 1,
        _ => 0,
    }
}

/// Number of lone pairs an acceptor atom offers
pub fn acceptor_capacity(atom_name: &str) -> usize {
    match atom_name.trim() {
        // carbonyl and phosphate oxygens offer two lone pairs
        "O2" | "O4" | "O6" | "OP1" | "OP2" | "O1P" | "O2P" => 2,
        // sp3 ether and hydroxyl oxygens
        "O2'" | "O4'" | "O3'" | "O5'" => 2,
        // aromatic ring nitrogens offer one in-plane lone pair
        "N1" | "N3" | "N7" => 1,
        _ => 0,
    }
}

/// Best angular alignment of a bond direction with any predicted slot direction
fn slot_alignment(slots: &[Vec3], direction: &Vec3) -> f64 {
    slots.iter().map(|d| Vec3::dot(d, direction)).fold(-1.0, f64::max)
}

/// Normal of the base plane, from the fitted frame when available and from
/// three ring atoms otherwise
fn base_normal(residue: &Residue) -> Option<Vec3> {
    if let Some(frame) = residue.frame() {
        return Some(frame.z_axis());
    }
    let names = residue.ring_atom_names();
    if names.len() < 3 { return None; }
    let a = residue.atom_position(names[0])?;
    let b = residue.atom_position(names[1])?;
    let c = residue.atom_position(names[2])?;
    let n = Vec3::cross(&(&b - &a), &(&c - &a));
    if n.length() < 1e-9 { return None; }
    return Some(n.normalized());
}

/// Ring neighbors of an atom within its residue, for imino and ring-nitrogen slots
fn ring_neighbors(residue: &Residue, atom_name: &str) -> Vec<Vec3> {
    let Some(center) = residue.atom_position(atom_name) else { return vec![] };
    residue.ring_atom_names().iter()
        .filter(|n| **n != atom_name)
        .filter_map(|n| residue.atom_position(n))
        .filter(|p| p.distance_to(&center) < 1.8)
        .collect()
}

/// Predicts the in-plane directions a donor's hydrogens point along
fn predict_donor_slots(residue: &Residue, atom_name: &str) -> Vec<Vec3> {
    let Some(pos) = residue.atom_position(atom_name) else { return vec![] };
    match atom_name.trim() {
        "N2" | "N4" | "N6" => {
            // sp2 amino: two hydrogens at +-60 deg. from the extended C-N axis
            let (Some(neighbor), Some(normal)) = (
                neighbor_of(atom_name).and_then(|n| residue.atom_position(n)),
                base_normal(residue),
            ) else { return vec![] };
            let axis = (&pos - &neighbor).normalized();
            let sixty = 60f64.to_radians();
            vec![
                Matrix3::rotation_about_axis(&normal, sixty).mul_vec(&axis),
                Matrix3::rotation_about_axis(&normal, -sixty).mul_vec(&axis),
            ]
        }
        "N1" | "N3" => {
            // sp2 imino: one hydrogen along the outward bisector of the ring neighbors
            let neighbors = ring_neighbors(residue, atom_name);
            if neighbors.len() < 2 { return vec![]; }
            let mut bisector = Vec3::from_float(0.0);
            for n in &neighbors {
                bisector += &(n - &pos).normalized();
            }
            bisector *= -1.0;
            if bisector.length() < 1e-9 { return vec![]; }
            vec![bisector.normalized()]
        }
        "O2'" => {
            // sp3 hydroxyl: one rotatable hydrogen, approximated along the extended C-O axis
            let Some(carbon) = residue.atom_position("C2'") else { return vec![] };
            vec![(&pos - &carbon).normalized()]
        }
        _ => vec![],
    }
}

/// Predicts the in-plane lone-pair directions of an acceptor
fn predict_acceptor_slots(residue: &Residue, atom_name: &str) -> Vec<Vec3> {
    let Some(pos) = residue.atom_position(atom_name) else { return vec![] };
    match atom_name.trim() {
        "O2" | "O4" | "O6" => {
            // sp2 carbonyl: two lone pairs at +-60 deg. from the extended C=O axis
            let (Some(neighbor), Some(normal)) = (
                neighbor_of(atom_name).and_then(|n| residue.atom_position(n)),
                base_normal(residue),
            ) else { return vec![] };
            let axis = (&pos - &neighbor).normalized();
            let sixty = 60f64.to_radians();
            vec![
                Matrix3::rotation_about_axis(&normal, sixty).mul_vec(&axis),
                Matrix3::rotation_about_axis(&normal, -sixty).mul_vec(&axis),
            ]
        }
        "N1" | "N3" | "N7" => {
            // aromatic nitrogen: one lone pair along the outward bisector
            let neighbors = ring_neighbors(residue, atom_name);
            if neighbors.len() < 2 { return vec![]; }
            let mut bisector = Vec3::from_float(0.0);
            for n in &neighbors {
                bisector += &(n - &pos).normalized();
            }
            bisector *= -1.0;
            if bisector.length() < 1e-9 { return vec![]; }
            vec![bisector.normalized()]
        }
        "O2'" | "O4'" | "O3'" | "O5'" => {
            let Some(carbon) = neighbor_of(atom_name).and_then(|n| residue.atom_position(n)) else {
                return vec![];
            };
            vec![(&pos - &carbon).normalized()]
        }
        _ => vec![],
    }
}

/// Greedy slot-based selection over a candidate bond list.
///
/// Candidates are ranked by how well the donor-to-acceptor direction lines up with a
/// predicted hydrogen slot on the donor and a lone-pair slot on the acceptor, then
/// accepted in rank order while slot capacities last.
pub struct SlotOptimizer;

impl SlotOptimizer {
    /// Selects bonds from `candidates` between the two residues.
    ///
    /// The residues are given together with their legacy indices so each bond side can
    /// be resolved. Bonds whose atoms predict no slots at all are skipped; the remaining
    /// ones are accepted greedily with ties resolved by candidate order.
    pub fn optimize(candidates: &[HydrogenBond],
                    res1: (LegacyIndex, &Residue),
                    res2: (LegacyIndex, &Residue)) -> Vec<HydrogenBond> {
        let residue_of = |bond: &HydrogenBond, donor: bool| -> &Residue {
            let idx = if donor { bond.donor_residue } else { bond.acceptor_residue };
            if idx == res1.0 { res1.1 } else { res2.1 }
        };

        struct Ranked {
            order: usize,
            score: f64,
            direction: Vec3,
        }

        let mut ranked: Vec<Ranked> = vec![];
        for (i, bond) in candidates.iter().enumerate() {
            let donor_res = residue_of(bond, true);
            let acceptor_res = residue_of(bond, false);
            let (Some(d), Some(a)) = (donor_res.atom_position(&bond.donor_atom),
                                      acceptor_res.atom_position(&bond.acceptor_atom)) else { continue };
            let direction = (&a - &d).normalized();

            let donor_dirs = predict_donor_slots(donor_res, &bond.donor_atom);
            let acceptor_dirs = predict_acceptor_slots(acceptor_res, &bond.acceptor_atom);
            if donor_dirs.is_empty() || acceptor_dirs.is_empty() { continue; }

            let reverse = &direction * -1.0;
            let score = slot_alignment(&donor_dirs, &direction) + slot_alignment(&acceptor_dirs, &reverse);
            ranked.push(Ranked { order: i, score, direction });
        }

        // shared per-atom bookkeeping: bonds at the same atom share one slot set
        let mut rank_order: Vec<usize> = (0..ranked.len()).collect();
        rank_order.sort_by(|&a, &b| ranked[b].score.partial_cmp(&ranked[a].score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(ranked[a].order.cmp(&ranked[b].order)));

        let mut accepted: Vec<HydrogenBond> = vec![];
        let mut donor_used: Vec<(String, Vec<Vec3>)> = vec![];
        let mut acceptor_used: Vec<(String, Vec<Vec3>)> = vec![];

        for &r in &rank_order {
            let bond = &candidates[ranked[r].order];
            let direction = ranked[r].direction;
            let reverse = &direction * -1.0;

            let fits = |used: &Vec<(String, Vec<Vec3>)>, atom: &str, dir: &Vec3, capacity: usize| -> bool {
                match used.iter().find(|(name, _)| name == atom) {
                    None => capacity > 0,
                    Some((_, dirs)) => {
                        dirs.len() < capacity && dirs.iter()
                            .all(|taken| planar_angle2(taken, dir).to_degrees() >= BIFURCATION_ANGLE)
                    }
                }
            };

            if !fits(&donor_used, &bond.donor_atom, &direction, donor_capacity(&bond.donor_atom)) {
                continue;
            }
            if !fits(&acceptor_used, &bond.acceptor_atom, &reverse, acceptor_capacity(&bond.acceptor_atom)) {
                continue;
            }

            let record = |used: &mut Vec<(String, Vec<Vec3>)>, atom: &str, dir: Vec3| {
                match used.iter_mut().find(|(name, _)| name == atom) {
                    Some((_, dirs)) => dirs.push(dir),
                    None => used.push((atom.to_string(), vec![dir])),
                }
            };
            record(&mut donor_used, &bond.donor_atom, direction);
            record(&mut acceptor_used, &bond.acceptor_atom, reverse);
            accepted.push(bond.clone());
        }

        // restore detection order for determinism of downstream consumers
        accepted.sort_by_key(|b| candidates.iter()
            .position(|c| c.donor_atom == b.donor_atom && c.acceptor_atom == b.acceptor_atom)
            .unwrap_or(usize::MAX));
        return accepted;
    }
}
