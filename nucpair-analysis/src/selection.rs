//! Base-pair selection over the candidate cache.
//!
//! The default policy is the mutual-best-match fixed point: in every pass each
//! unmatched residue proposes its best-scoring valid partner, and a pair is committed
//! only when both residues propose each other. Passes repeat until a pass adds
//! nothing. The strategy seam admits alternate policies; the greedy best-available
//! variant is provided as the second one.

use log::debug;
use nucpair_structure::LegacyIndex;

use crate::cache::PairCandidateCache;
use crate::events::{AnalysisEvent, EventSink, PartnerCandidate};

/// A pair-selection policy over the candidate cache
pub trait SelectionStrategy {
    /// Selects a disjoint set of pairs; each returned pair has its smaller index first
    fn select(&self, cache: &PairCandidateCache,
              sink: &mut dyn EventSink) -> Vec<(LegacyIndex, LegacyIndex)>;

    /// Name of this strategy for logs
    fn name(&self) -> &'static str;
}

/// The default policy: iterative mutual-best matching
pub struct MutualBestStrategy;

/// Greedy alternative: every unmatched residue takes its best partner immediately
pub struct BestAvailableStrategy;

fn find_best_partner(idx: LegacyIndex, cache: &PairCandidateCache, matched: &[bool],
                     sink: &mut dyn EventSink) -> Option<(LegacyIndex, f64)> {
    let mut best: Option<(LegacyIndex, f64)> = None;
    let mut candidates = vec![];

    for &partner in cache.valid_partners_for(idx) {
        if matched[partner.one_based()] { continue; }
        let Some(info) = cache.get(idx, partner) else { continue };
        if !info.is_valid() { continue; }

        candidates.push(PartnerCandidate {
            partner,
            score: info.adjusted_quality,
            pair_type: info.pair_type,
            is_valid: true,
        });
        // strict comparison keeps the lowest index on ties, partners come ascending
        if best.is_none() || info.adjusted_quality < best.as_ref().map(|b| b.1).unwrap_or(f64::MAX) {
            best = Some((partner, info.adjusted_quality));
        }
    }

    if !candidates.is_empty() {
        sink.on_event(&AnalysisEvent::BestPartnerCandidates {
            residue: idx,
            candidates,
            chosen: best.map(|b| b.0),
            chosen_score: best.map(|b| b.1).unwrap_or(f64::MAX),
        });
    }
    return best;
}

impl SelectionStrategy for MutualBestStrategy {
    fn select(&self, cache: &PairCandidateCache,
              sink: &mut dyn EventSink) -> Vec<(LegacyIndex, LegacyIndex)> {
        let n = cache.residue_count();
        let mut matched = vec![false; n + 1];
        let mut selected = vec![];
        let mut iteration = 0;

        loop {
            iteration += 1;
            let mut pairs_this_pass = vec![];

            for idx1 in LegacyIndex::up_to(n) {
                if matched[idx1.one_based()] { continue; }
                if cache.valid_partners_for(idx1).is_empty() { continue; }

                let Some((idx2, _)) = find_best_partner(idx1, cache, &matched, sink) else { continue };
                let best_of_2 = find_best_partner(idx2, cache, &matched, sink);
                let is_mutual = best_of_2.map(|(back, _)| back == idx1).unwrap_or(false);

                sink.on_event(&AnalysisEvent::MutualBestCheck {
                    idx1,
                    idx2,
                    best_of_1: idx2,
                    best_of_2: best_of_2.map(|(b, _)| b),
                    is_mutual,
                    was_selected: is_mutual,
                });

                if is_mutual {
                    matched[idx1.one_based()] = true;
                    matched[idx2.one_based()] = true;
                    let pair = if idx1 <= idx2 { (idx1, idx2) } else { (idx2, idx1) };
                    pairs_this_pass.push(pair);
                    selected.push(pair);
                }
            }

            let total_matched = matched.iter().filter(|m| **m).count();
            sink.on_event(&AnalysisEvent::IterationComplete {
                iteration,
                pairs_this_pass: pairs_this_pass.clone(),
                matched: matched.clone(),
                total_matched,
            });

            if pairs_this_pass.is_empty() { break; }
        }

        debug!("mutual-best selection: {} pairs after {} iterations", selected.len(), iteration);
        sink.on_event(&AnalysisEvent::SelectionComplete { selected: selected.clone() });
        return selected;
    }

    fn name(&self) -> &'static str { "mutual-best" }
}

impl SelectionStrategy for BestAvailableStrategy {
    fn select(&self, cache: &PairCandidateCache,
              sink: &mut dyn EventSink) -> Vec<(LegacyIndex, LegacyIndex)> {
        let n = cache.residue_count();
        let mut matched = vec![false; n + 1];
        let mut selected = vec![];

        for idx1 in LegacyIndex::up_to(n) {
            if matched[idx1.one_based()] { continue; }
            let Some((idx2, _)) = find_best_partner(idx1, cache, &matched, sink) else { continue };
            matched[idx1.one_based()] = true;
            matched[idx2.one_based()] = true;
            selected.push(if idx1 <= idx2 { (idx1, idx2) } else { (idx2, idx1) });
        }

        sink.on_event(&AnalysisEvent::SelectionComplete { selected: selected.clone() });
        return selected;
    }

    fn name(&self) -> &'static str { "best-available" }
}
