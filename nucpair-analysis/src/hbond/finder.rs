use std::collections::HashSet;

use log::trace;
use nucpair_geometry::planar_angle3;
use nucpair_structure::{LegacyIndex, Residue};
use nucpair_structure::typing::{is_base_atom, HBondRole};

use crate::AnalysisConfig;
use super::{context_of, ConflictState, DetailedHBondResult, HBondClassification, HydrogenBond};
use super::edges::base_edge_of;
use super::quality::{neighbor_of, HBondQualityScorer};
use super::roles::{capable_elements, classify_by_roles, nucleotide_atom_role};

/// Finds hydrogen bonds between two residues.
///
/// The full pipeline runs enumeration, conflict resolution, role validation and
/// quality scoring; [`count_simple`](HBondFinder::count_simple) is the counting-only
/// shortcut the pair validator uses for its pre-validation threshold.
pub struct HBondFinder<'a> {
    config: &'a AnalysisConfig,
    scorer: HBondQualityScorer,
}

impl<'a> HBondFinder<'a> {
    /// Creates a finder bound to an analysis configuration
    pub fn new(config: &'a AnalysisConfig) -> HBondFinder<'a> {
        HBondFinder { config, scorer: HBondQualityScorer::default() }
    }

    /// Counts hydrogen-bond-eligible atom contacts without running classification.
    ///
    /// Returns `(base_base, sugar_o2prime)` counts: contacts between base atoms of
    /// allowed elements within the distance bounds, and contacts involving the ribose
    /// 2'-hydroxyl. The count is symmetric in the two residues.
    pub fn count_simple(&self, res1: &Residue, res2: &Residue) -> (usize, usize) {
        let mut num_base = 0;
        let mut num_o2 = 0;
        for a1 in res1.atoms() {
            for a2 in res2.atoms() {
                let dist = a1.pos.distance_to(&a2.pos);
                if dist < self.config.hb_lower || dist > self.config.hb_upper { continue; }

                let both_base = is_base_atom(&a1.name) && is_base_atom(&a2.name);
                let not_o2prime = !a1.is_o2_prime() && !a2.is_o2_prime();
                if both_base && not_o2prime
                    && self.config.allows_element(&a1.element)
                    && self.config.allows_element(&a2.element) {
                    num_base += 1;
                }
                if a1.is_o2_prime() || a2.is_o2_prime() {
                    num_o2 += 1;
                }
            }
        }
        return (num_base, num_o2);
    }

    /// Runs the full detection pipeline between two residues.
    ///
    /// The donor side of every candidate provisionally belongs to `res1`; validation
    /// re-orients bonds whose role tables prove the opposite. Enumeration order, and
    /// therefore every tie-break downstream, follows the atom order of the residues.
    pub fn find_detailed(&self, idx1: LegacyIndex, res1: &Residue,
                         idx2: LegacyIndex, res2: &Residue) -> DetailedHBondResult {
        let mut result = DetailedHBondResult::default_with_capacity(8);

        // stage 1: enumeration by element and distance
        for a1 in res1.atoms() {
            if !self.config.allows_element(&a1.element) { continue; }
            for a2 in res2.atoms() {
                if !self.config.allows_element(&a2.element) { continue; }
                let dist = a1.pos.distance_to(&a2.pos);
                if dist < self.config.hb_lower || dist > self.config.hb_upper { continue; }
                result.initial.push(HydrogenBond {
                    donor_atom: a1.name.clone(),
                    acceptor_atom: a2.name.clone(),
                    donor_residue: idx1,
                    acceptor_residue: idx2,
                    distance: dist,
                    donor_angle: None,
                    acceptor_angle: None,
                    dihedral: None,
                    classification: HBondClassification::Unknown,
                    context: context_of(res1, &a1.name, res2, &a2.name),
                    donor_edge: super::BaseEdge::Unknown,
                    acceptor_edge: super::BaseEdge::Unknown,
                    conflict: ConflictState::NoConflict,
                    quality: None,
                });
            }
        }
        trace!("{} x {}: {} h-bond candidates", res1.res_id(), res2.res_id(), result.initial.len());

        // stage 2: conflict resolution, shortest bond wins a shared atom
        result.after_conflict = resolve_conflicts(&result.initial);

        // stage 3: donor/acceptor role validation per base
        let base1 = res1.one_letter_code().unwrap_or('?');
        let base2 = res2.one_letter_code().unwrap_or('?');
        result.after_validation = result.after_conflict.clone();
        for bond in result.after_validation.iter_mut() {
            if !bond.conflict.survives() {
                bond.classification = HBondClassification::Invalid;
                continue;
            }
            let role1 = nucleotide_atom_role(base1, &bond.donor_atom);
            let role2 = nucleotide_atom_role(base2, &bond.acceptor_atom);
            bond.classification = classify_by_roles(role1, role2,
                capable_elements(&bond.donor_atom, &bond.acceptor_atom));
            // re-orient when the roles prove the second residue donates
            if role1 == HBondRole::Acceptor && role2 == HBondRole::Donor {
                std::mem::swap(&mut bond.donor_atom, &mut bond.acceptor_atom);
                std::mem::swap(&mut bond.donor_residue, &mut bond.acceptor_residue);
            }
            let donor_base = if bond.donor_residue == idx1 { base1 } else { base2 };
            let acceptor_base = if bond.acceptor_residue == idx1 { base1 } else { base2 };
            bond.donor_edge = base_edge_of(donor_base, &bond.donor_atom);
            bond.acceptor_edge = base_edge_of(acceptor_base, &bond.acceptor_atom);
        }

        // stage 4: geometry and quality of the survivors
        for bond in result.after_validation.iter_mut() {
            if bond.classification == HBondClassification::Invalid { continue; }
            let (donor_res, acceptor_res) = if bond.donor_residue == idx1 { (res1, res2) } else { (res2, res1) };
            self.attach_geometry(bond, donor_res, acceptor_res);
        }

        // stage 5: final bond list and the good-bond count
        result.final_bonds = result.after_validation.iter()
            .filter(|b| b.conflict.survives() && b.classification != HBondClassification::Invalid)
            .cloned()
            .collect();
        result.num_good = result.final_bonds.iter().filter(|b| b.is_good()).count();
        return result;
    }

    fn attach_geometry(&self, bond: &mut HydrogenBond, donor_res: &Residue, acceptor_res: &Residue) {
        let donor_pos = donor_res.atom_position(&bond.donor_atom);
        let acceptor_pos = acceptor_res.atom_position(&bond.acceptor_atom);
        let (Some(d), Some(a)) = (donor_pos, acceptor_pos) else { return };

        let donor_neighbor = neighbor_of(&bond.donor_atom).and_then(|n| donor_res.atom_position(n));
        let acceptor_neighbor = neighbor_of(&bond.acceptor_atom).and_then(|n| acceptor_res.atom_position(n));

        bond.donor_angle = donor_neighbor.map(|x| planar_angle3(&x, &d, &a).to_degrees());
        bond.acceptor_angle = acceptor_neighbor.map(|y| planar_angle3(&d, &a, &y).to_degrees());
        if let (Some(x), Some(y)) = (donor_neighbor, acceptor_neighbor) {
            bond.dihedral = Some(nucpair_geometry::dihedral_angle4(&x, &d, &a, &y).to_degrees());
        }
        bond.quality = Some(self.scorer.score(bond.distance, bond.donor_angle,
                                              bond.acceptor_angle, &bond.acceptor_atom));
    }
}

/// Resolves competition for shared atoms: bonds are visited shortest first and claim
/// their two atoms; a bond finding either atom taken is marked as the loser. Ties
/// fall back to detection order, keeping the policy deterministic.
fn resolve_conflicts(candidates: &[HydrogenBond]) -> Vec<HydrogenBond> {
    let mut bonds: Vec<HydrogenBond> = candidates.to_vec();

    let mut order: Vec<usize> = (0..bonds.len()).collect();
    order.sort_by(|&a, &b| bonds[a].distance.partial_cmp(&bonds[b].distance)
        .unwrap_or(std::cmp::Ordering::Equal));

    let mut donors_taken: HashSet<String> = HashSet::new();
    let mut acceptors_taken: HashSet<String> = HashSet::new();
    let mut kept: Vec<usize> = vec![];
    let mut donor_lost: Vec<bool> = vec![false; bonds.len()];
    let mut acceptor_lost: Vec<bool> = vec![false; bonds.len()];

    for &i in &order {
        let donor_free = !donors_taken.contains(&bonds[i].donor_atom);
        let acceptor_free = !acceptors_taken.contains(&bonds[i].acceptor_atom);
        if donor_free && acceptor_free {
            donors_taken.insert(bonds[i].donor_atom.clone());
            acceptors_taken.insert(bonds[i].acceptor_atom.clone());
            kept.push(i);
        } else {
            donor_lost[i] = !donor_free;
            acceptor_lost[i] = !acceptor_free;
        }
    }

    // a kept bond is a winner only when some other candidate wanted one of its atoms
    let contested: Vec<bool> = (0..bonds.len()).map(|i| {
        bonds.iter().enumerate().any(|(j, other)| {
            j != i && (other.donor_atom == bonds[i].donor_atom
                || other.acceptor_atom == bonds[i].acceptor_atom)
        })
    }).collect();

    for i in 0..bonds.len() {
        bonds[i].conflict = if kept.contains(&i) {
            if contested[i] { ConflictState::Winner } else { ConflictState::NoConflict }
        } else if donor_lost[i] && acceptor_lost[i] {
            ConflictState::LoserBoth
        } else {
            ConflictState::Loser
        };
    }
    return bonds;
}
