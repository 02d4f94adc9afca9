//! Grouping of selected base pairs into helices and 5'→3' canonicalization.
//!
//! The organizer builds a neighbor graph over pair origins, walks it into contiguous
//! segments, orients every segment so strand 1 runs 5'→3' and flags circular and
//! broken segments.

mod backbone;
mod direction;

pub use backbone::{backbone_map, BackboneAtoms, BackboneLinkageChecker, BackboneMap, LinkDirection};
pub use direction::{DirectionCounts, StrandDirectionChecker};

use log::debug;
use nucpair_geometry::Vec3;

use crate::pairs::{BasePair, HelixSegment};
use crate::stepwise::step_parameters;
use crate::AnalysisConfig;

/// Result of helix organization
#[derive(Clone, Debug, Default)]
pub struct HelixOrdering {
    /// positions into the input pair list, in helix order
    pub pair_order: Vec<usize>,
    /// helix segments, indexing into `pair_order`
    pub helices: Vec<HelixSegment>,
    /// per-pair strand-swap flags, parallel to the input pair list
    pub strand_swapped: Vec<bool>,
}

/// Neighbor information of one pair within the origin-distance graph
#[derive(Clone, Copy, Debug, Default)]
struct PairContext {
    neighbor1: Option<usize>,
    neighbor2: Option<usize>,
}

impl PairContext {
    fn is_endpoint(&self) -> bool { self.neighbor1.is_none() || self.neighbor2.is_none() }

    fn other_neighbor(&self, not_this: usize) -> Option<usize> {
        if self.neighbor1 == Some(not_this) { return self.neighbor2; }
        if self.neighbor2 == Some(not_this) { return self.neighbor1; }
        return self.neighbor1.or(self.neighbor2);
    }
}

/// Organizes selected pairs into helices and canonical strand order
pub struct HelixOrganizer<'a> {
    config: &'a AnalysisConfig,
    backbone: &'a BackboneMap,
}

impl<'a> HelixOrganizer<'a> {
    /// Creates an organizer over a backbone map
    pub fn new(config: &'a AnalysisConfig, backbone: &'a BackboneMap) -> HelixOrganizer<'a> {
        HelixOrganizer { config, backbone }
    }

    /// Groups the pairs into helices and orients every helix 5'→3'
    pub fn organize(&self, pairs: &[BasePair]) -> HelixOrdering {
        let mut ordering = HelixOrdering {
            pair_order: vec![],
            helices: vec![],
            strand_swapped: vec![false; pairs.len()],
        };
        if pairs.is_empty() { return ordering; }

        let context = self.pair_context(pairs);
        self.locate_helices(pairs, &context, &mut ordering);

        let linkage = BackboneLinkageChecker::new(self.backbone, self.config.o3p_cutoff);
        let checker = StrandDirectionChecker::new(&linkage, self.config.end_stack_xangle);
        let helices = ordering.helices.clone();
        for helix in &helices {
            self.orient_five_to_three(pairs, &checker, helix, &mut ordering);
        }

        self.flag_breaks(pairs, &linkage, &mut ordering);
        self.flag_z_form(pairs, &mut ordering);

        debug!("organized {} pairs into {} helices", pairs.len(), ordering.helices.len());
        return ordering;
    }

    /// Finds up to two neighbors per pair: the nearest pair within the helix-break
    /// cutoff, and the nearest one on the opposite z-side of it
    fn pair_context(&self, pairs: &[BasePair]) -> Vec<PairContext> {
        let mut context = vec![PairContext::default(); pairs.len()];
        for i in 0..pairs.len() {
            let origin = pairs[i].origin();
            let z = pairs[i].mean_z_axis();

            let mut in_range: Vec<(usize, f64, f64)> = vec![];
            for (j, other) in pairs.iter().enumerate() {
                if j == i { continue; }
                let offset = &other.origin() - &origin;
                let dist = offset.length();
                if dist > self.config.helix_break { continue; }
                in_range.push((j, dist, Vec3::dot(&offset, &z)));
            }

            let nearest = in_range.iter()
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                .copied();
            context[i].neighbor1 = nearest.map(|(j, _, _)| j);
            if let Some((_, _, side1)) = nearest {
                context[i].neighbor2 = in_range.iter()
                    .filter(|(_, _, side)| side * side1 < 0.0)
                    .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
                    .map(|(j, _, _)| *j);
            }
        }
        return context;
    }

    /// Walks neighbor chains from endpoints, then closes the remaining cycles
    fn locate_helices(&self, pairs: &[BasePair], context: &[PairContext],
                      ordering: &mut HelixOrdering) {
        let mut visited = vec![false; pairs.len()];

        // open helices start at endpoints
        for start in 0..pairs.len() {
            if visited[start] || !context[start].is_endpoint() { continue; }
            let helix_start = ordering.pair_order.len();
            let mut current = start;
            let mut previous: Option<usize> = None;
            loop {
                visited[current] = true;
                ordering.pair_order.push(current);
                let next = match previous {
                    Some(prev) => context[current].other_neighbor(prev),
                    None => context[current].neighbor1,
                };
                match next {
                    Some(n) if !visited[n] => {
                        previous = Some(current);
                        current = n;
                    }
                    _ => break,
                }
            }
            ordering.helices.push(HelixSegment {
                start: helix_start,
                end: ordering.pair_order.len(),
                is_circular: false,
                has_break: false,
                is_z_form: false,
            });
        }

        // anything left has two neighbors everywhere: circular helices
        for start in 0..pairs.len() {
            if visited[start] { continue; }
            let helix_start = ordering.pair_order.len();
            let mut current = start;
            let mut previous: Option<usize> = None;
            loop {
                visited[current] = true;
                ordering.pair_order.push(current);
                let next = match previous {
                    Some(prev) => context[current].other_neighbor(prev),
                    None => context[current].neighbor1,
                };
                match next {
                    Some(n) if !visited[n] => {
                        previous = Some(current);
                        current = n;
                    }
                    _ => break,
                }
            }
            ordering.helices.push(HelixSegment {
                start: helix_start,
                end: ordering.pair_order.len(),
                is_circular: true,
                has_break: false,
                is_z_form: false,
            });
        }
    }

    /// Orients one helix 5'→3': first-step assignment, per-step propagation,
    /// whole-helix direction counts and second-strand corrections
    fn orient_five_to_three(&self, pairs: &[BasePair], checker: &StrandDirectionChecker,
                            helix: &HelixSegment, ordering: &mut HelixOrdering) {
        let order = &ordering.pair_order[helix.start..helix.end];
        if order.is_empty() { return; }

        // first pair: backbone linkage into the second pair decides strand 1
        if order.len() >= 2 {
            let swap = checker.first_step(&pairs[order[0]], &pairs[order[1]]);
            ordering.strand_swapped[order[0]] = swap;
        }

        // propagate along the helix
        for w in 0..order.len().saturating_sub(1) {
            let m = order[w];
            let n = order[w + 1];
            let swap = checker.should_swap(&pairs[m], ordering.strand_swapped[m], &pairs[n]);
            ordering.strand_swapped[n] = swap;
        }

        // whole-helix direction: flip the helix when reverse linkages dominate
        let counts = checker.count_directions(pairs, order, &ordering.strand_swapped);
        if counts.reverse1 + counts.reverse2 > counts.forward1 + counts.forward2 {
            ordering.pair_order[helix.start..helix.end].reverse();
        }

        // localized corrections where the two strands disagree
        let order_after = ordering.pair_order[helix.start..helix.end].to_vec();
        let counts = checker.count_directions(pairs, &order_after, &ordering.strand_swapped);
        if counts.forward1 != counts.forward2 || counts.reverse1 != counts.reverse2 {
            checker.fix_strand2(pairs, &order_after, &mut ordering.strand_swapped);
        }
    }

    /// Flags a segment as broken when two adjacent pairs lack any backbone linkage
    fn flag_breaks(&self, pairs: &[BasePair], linkage: &BackboneLinkageChecker,
                   ordering: &mut HelixOrdering) {
        for helix in ordering.helices.iter_mut() {
            let order = &ordering.pair_order[helix.start..helix.end];
            helix.has_break = order.windows(2).any(|w| {
                let p1 = pairs[w[0]].strand_residues(ordering.strand_swapped[w[0]]);
                let p2 = pairs[w[1]].strand_residues(ordering.strand_swapped[w[1]]);
                !linkage.residues_connected(p1, p2)
            });
        }
    }

    /// Flags a segment as Z-form when the mean twist along it is negative
    fn flag_z_form(&self, pairs: &[BasePair], ordering: &mut HelixOrdering) {
        for helix in ordering.helices.iter_mut() {
            let order = &ordering.pair_order[helix.start..helix.end];
            if order.len() < 2 { continue; }
            let mut twist_sum = 0.0;
            for w in order.windows(2) {
                let f1 = pairs[w[0]].pair_frame(ordering.strand_swapped[w[0]]);
                let f2 = pairs[w[1]].pair_frame(ordering.strand_swapped[w[1]]);
                twist_sum += step_parameters(&f1, &f2).parameters.twist;
            }
            helix.is_z_form = twist_sum < 0.0;
        }
    }
}
