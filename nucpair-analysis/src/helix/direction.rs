//! Strand-direction checks of the five-to-three ordering.
//!
//! For each step from an already-oriented pair to the next one, four independent
//! checks vote on whether the next pair's strand assignment must be swapped:
//! base-pair z-orientation of stacked Watson-Crick pairs, O3'-O3' distance patterns,
//! chain-identifier continuity and plain frame-normal alignment. The votes are
//! combined by majority; a tie falls to the earliest expressed vote in the order
//! listed above, which is also the order of decreasing reliability.

use nucpair_geometry::{planar_angle2, Vec3};
use nucpair_structure::LegacyIndex;

use crate::pairs::BasePair;
use super::backbone::{BackboneLinkageChecker, LinkDirection};

/// Forward/reverse linkage tallies of one helix, per strand
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionCounts {
    /// 5'→3' linkages along strand 1
    pub forward1: usize,
    /// 3'→5' linkages along strand 1
    pub reverse1: usize,
    /// 5'→3' linkages along strand 2
    pub forward2: usize,
    /// 3'→5' linkages along strand 2
    pub reverse2: usize,
}

/// Runs the per-step strand-direction checks
pub struct StrandDirectionChecker<'a> {
    linkage: &'a BackboneLinkageChecker<'a>,
    end_stack_xangle: f64,
}

impl<'a> StrandDirectionChecker<'a> {
    /// Creates a checker over the backbone linkage data
    pub fn new(linkage: &'a BackboneLinkageChecker<'a>, end_stack_xangle: f64) -> StrandDirectionChecker<'a> {
        StrandDirectionChecker { linkage, end_stack_xangle }
    }

    /// Decides the strand assignment of the first pair of a helix from its backbone
    /// linkage to the second pair.
    ///
    /// The pair whose first-stored residue is 5'-linked into the next pair keeps its
    /// order; a linkage from the second-stored residue swaps the assignment. Without
    /// any linkage the stored order stands.
    pub fn first_step(&self, first: &BasePair, second: &BasePair) -> bool {
        let (a1, a2) = first.strand_residues(false);
        let (b1, b2) = second.strand_residues(false);

        let links_forward = |from: LegacyIndex| {
            self.linkage.check_linkage(from, b1) == LinkDirection::Forward
                || self.linkage.check_linkage(from, b2) == LinkDirection::Forward
        };
        if links_forward(a1) { return false; }
        if links_forward(a2) { return true; }

        let links_reverse = |into: LegacyIndex| {
            self.linkage.check_linkage(into, b1) == LinkDirection::Reverse
                || self.linkage.check_linkage(into, b2) == LinkDirection::Reverse
        };
        // a reverse linkage out of the first-stored residue still keeps it on strand 1;
        // whole-helix direction counts flip the helix later when needed
        if links_reverse(a1) { return false; }
        if links_reverse(a2) { return true; }
        return false;
    }

    /// Combines the four sub-checks into the swap verdict for `pair_n`, given the
    /// already-oriented `pair_m`
    pub fn should_swap(&self, pair_m: &BasePair, swap_m: bool, pair_n: &BasePair) -> bool {
        let votes = [
            self.wc_bporien(pair_m, swap_m, pair_n),
            self.check_o3dist(pair_m, swap_m, pair_n),
            self.check_schain(pair_m, swap_m, pair_n),
            Some(self.check_others(pair_m, swap_m, pair_n)),
        ];

        let swap_votes = votes.iter().flatten().filter(|v| **v).count();
        let keep_votes = votes.iter().flatten().filter(|v| !**v).count();
        if swap_votes != keep_votes {
            return swap_votes > keep_votes;
        }
        // tie: the earliest expressed vote decides
        return votes.iter().flatten().next().copied().unwrap_or(false);
    }

    /// Watson-Crick z-orientation check.
    ///
    /// Only applies when both pairs are Watson-Crick-like and actually stacked, i.e.
    /// their combined x-axes stay within the stacking angle cutoff. For stacked WC
    /// pairs consecutive strand-1 bases share their normal direction, so an opposing
    /// normal on the next pair's first-stored base demands a swap.
    pub fn wc_bporien(&self, pair_m: &BasePair, swap_m: bool, pair_n: &BasePair) -> Option<bool> {
        if pair_m.pair_type() <= 0 || pair_n.pair_type() <= 0 { return None; }
        if self.wcbp_xang(pair_m, pair_n) > self.end_stack_xangle { return None; }
        let z_m = pair_m.strand1_frame(swap_m).z_axis();
        let z_n = pair_n.strand1_frame(false).z_axis();
        return Some(Vec3::dot(&z_m, &z_n) < 0.0);
    }

    /// O3'-O3' distance check: the same-strand hypothesis should give shorter
    /// backbone distances than the cross-strand one
    pub fn check_o3dist(&self, pair_m: &BasePair, swap_m: bool, pair_n: &BasePair) -> Option<bool> {
        let (m1, m2) = pair_m.strand_residues(swap_m);
        let (n1, n2) = pair_n.strand_residues(false);

        let same = self.linkage.o3_distance(m1, n1)? + self.linkage.o3_distance(m2, n2)?;
        let cross = self.linkage.o3_distance(m1, n2)? + self.linkage.o3_distance(m2, n1)?;
        if (same - cross).abs() < 1e-9 { return None; }
        return Some(cross < same);
    }

    /// Chain-identifier continuity check: strand partners on one chain should stay
    /// on one chain across the step
    pub fn check_schain(&self, pair_m: &BasePair, swap_m: bool, pair_n: &BasePair) -> Option<bool> {
        let (m1, m2) = pair_m.strand_residues(swap_m);
        let (n1, n2) = pair_n.strand_residues(false);
        let chain = |idx: LegacyIndex| self.linkage.chain_of(idx);
        let (c_m1, c_m2, c_n1, c_n2) = (chain(m1)?, chain(m2)?, chain(n1)?, chain(n2)?);

        let same_continuous = c_m1 == c_n1 && c_m2 == c_n2;
        let cross_continuous = c_m1 == c_n2 && c_m2 == c_n1;
        if same_continuous == cross_continuous { return None; }
        return Some(cross_continuous);
    }

    /// Plain frame-orientation check: the strand hypothesis whose base normals align
    /// better wins. Always expresses a vote.
    pub fn check_others(&self, pair_m: &BasePair, swap_m: bool, pair_n: &BasePair) -> bool {
        let zm1 = pair_m.strand1_frame(swap_m).z_axis();
        let zm2 = pair_m.strand2_frame(swap_m).z_axis();
        let zn1 = pair_n.strand1_frame(false).z_axis();
        let zn2 = pair_n.strand2_frame(false).z_axis();

        let same = Vec3::dot(&zm1, &zn1) + Vec3::dot(&zm2, &zn2);
        let cross = Vec3::dot(&zm1, &zn2) + Vec3::dot(&zm2, &zn1);
        return cross > same;
    }

    /// Angle between the combined x-axes of two pairs, in degrees
    fn wcbp_xang(&self, pair_m: &BasePair, pair_n: &BasePair) -> f64 {
        let combined_x = |pair: &BasePair| -> Vec3 {
            let x1 = pair.frame1().x_axis();
            let x2 = pair.frame2().x_axis();
            let mut x = if Vec3::dot(&x1, &x2) < 0.0 { &x1 - &x2 } else { &x1 + &x2 };
            x.normalize();
            x
        };
        planar_angle2(&combined_x(pair_m), &combined_x(pair_n)).to_degrees()
    }

    /// Tallies the backbone linkage directions along both strands of a helix,
    /// given the pair order and per-pair swap flags
    pub fn count_directions(&self, pairs: &[BasePair], order: &[usize],
                            swapped: &[bool]) -> DirectionCounts {
        let mut counts = DirectionCounts::default();
        for w in order.windows(2) {
            let (m1, m2) = pairs[w[0]].strand_residues(swapped[w[0]]);
            let (n1, n2) = pairs[w[1]].strand_residues(swapped[w[1]]);
            match self.linkage.check_linkage(m1, n1) {
                LinkDirection::Forward => counts.forward1 += 1,
                LinkDirection::Reverse => counts.reverse1 += 1,
                LinkDirection::None => {}
            }
            // strand 2 runs anti-parallel: its 5'→3' linkage goes n→m
            match self.linkage.check_linkage(n2, m2) {
                LinkDirection::Forward => counts.forward2 += 1,
                LinkDirection::Reverse => counts.reverse2 += 1,
                LinkDirection::None => {}
            }
        }
        return counts;
    }

    /// Localized second-strand corrections: where flipping one pair's swap flag turns
    /// both of its adjacent linkages forward, flip it
    pub fn fix_strand2(&self, pairs: &[BasePair], order: &[usize], swapped: &mut [bool]) {
        for pos in 0..order.len() {
            let idx = order[pos];
            let score = |flag: bool| -> i32 {
                let mut s = 0;
                if pos > 0 {
                    s += self.step_score(&pairs[order[pos - 1]], swapped[order[pos - 1]],
                                         &pairs[idx], flag);
                }
                if pos + 1 < order.len() {
                    s += self.step_score(&pairs[idx], flag,
                                         &pairs[order[pos + 1]], swapped[order[pos + 1]]);
                }
                s
            };
            let current = score(swapped[idx]);
            let flipped = score(!swapped[idx]);
            if flipped > current {
                swapped[idx] = !swapped[idx];
            }
        }
    }

    /// Forward-linkage score of one step under a strand hypothesis
    fn step_score(&self, pair_m: &BasePair, swap_m: bool, pair_n: &BasePair, swap_n: bool) -> i32 {
        let (m1, m2) = pair_m.strand_residues(swap_m);
        let (n1, n2) = pair_n.strand_residues(swap_n);
        let mut score = 0;
        if self.linkage.check_linkage(m1, n1) == LinkDirection::Forward { score += 1; }
        if self.linkage.check_linkage(n2, m2) == LinkDirection::Forward { score += 1; }
        if self.linkage.check_linkage(m1, n1) == LinkDirection::Reverse { score -= 1; }
        if self.linkage.check_linkage(n2, m2) == LinkDirection::Reverse { score -= 1; }
        return score;
    }
}
