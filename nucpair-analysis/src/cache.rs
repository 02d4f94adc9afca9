//! Pre-computed validation results for every eligible residue pair.

use std::collections::BTreeMap;

use log::debug;
use nucpair_structure::{LegacyIndex, Structure};

use crate::events::{AnalysisEvent, EventSink};
use crate::pair_type::{adjusted_quality, pair_type_id};
use crate::validate::{PairValidator, ValidationResult};
use crate::AnalysisConfig;

/// Everything known about one candidate pair
#[derive(Clone, Debug)]
pub struct CandidateInfo {
    /// the full validation record
    pub validation: ValidationResult,
    /// categorical pair type
    pub pair_type: i32,
    /// selection score; lower is better
    pub adjusted_quality: f64,
}

impl CandidateInfo {
    /// Whether this candidate passed all six gates
    pub fn is_valid(&self) -> bool { self.validation.is_valid }
}

/// Validation cache over all ordered pairs `(i, j)` with `i < j` of nucleotides
/// that carry fitted frames.
///
/// Construction walks residues in ascending legacy order, so cache contents and the
/// diagnostic event stream line up with the legacy 1-based indexing. Lookups are
/// order-independent; the two inverted indices answer per-residue partner queries.
pub struct PairCandidateCache {
    cache: BTreeMap<(LegacyIndex, LegacyIndex), CandidateInfo>,
    valid_partners: BTreeMap<LegacyIndex, Vec<LegacyIndex>>,
    all_partners: BTreeMap<LegacyIndex, Vec<LegacyIndex>>,
    residue_count: usize,
}

impl PairCandidateCache {
    /// Validates every eligible pair of a structure and caches the outcomes.
    ///
    /// A `PairValidated` event is emitted per pair, in construction order.
    pub fn build(structure: &Structure, config: &AnalysisConfig,
                 sink: &mut dyn EventSink) -> PairCandidateCache {
        let validator = PairValidator::new(config);
        let mut cache = PairCandidateCache {
            cache: BTreeMap::new(),
            valid_partners: BTreeMap::new(),
            all_partners: BTreeMap::new(),
            residue_count: structure.count_residues(),
        };

        let eligible: Vec<LegacyIndex> = structure.residues_in_legacy_order()
            .filter(|(_, res)| res.is_nucleotide() && res.frame().is_some())
            .map(|(idx, _)| idx)
            .collect();

        for (pos, &idx1) in eligible.iter().enumerate() {
            let Some(res1) = structure.residue(idx1) else { continue };
            let Some(f1) = res1.frame() else { continue };
            for &idx2 in &eligible[pos + 1..] {
                let Some(res2) = structure.residue(idx2) else { continue };
                let Some(f2) = res2.frame() else { continue };

                let validation = validator.validate(idx1, res1, idx2, res2);
                let pair_type = pair_type_id(res1, res2, f1, f2);
                let score = adjusted_quality(&validation, pair_type);

                sink.on_event(&AnalysisEvent::PairValidated {
                    idx1, idx2, result: validation.clone(), pair_type,
                });

                if validation.is_valid {
                    cache.valid_partners.entry(idx1).or_default().push(idx2);
                    cache.valid_partners.entry(idx2).or_default().push(idx1);
                }
                cache.all_partners.entry(idx1).or_default().push(idx2);
                cache.all_partners.entry(idx2).or_default().push(idx1);
                cache.cache.insert((idx1, idx2),
                    CandidateInfo { validation, pair_type, adjusted_quality: score });
            }
        }

        for partners in cache.valid_partners.values_mut() {
            partners.sort();
        }
        for partners in cache.all_partners.values_mut() {
            partners.sort();
        }
        debug!("candidate cache: {} pairs, {} valid", cache.len(), cache.valid_count());
        return cache;
    }

    /// Number of cached pairs
    pub fn len(&self) -> usize { self.cache.len() }

    /// True when nothing was cached
    pub fn is_empty(&self) -> bool { self.cache.is_empty() }

    /// Number of pairs that passed validation
    pub fn valid_count(&self) -> usize {
        self.cache.values().filter(|info| info.is_valid()).count()
    }

    /// Number of residues of the underlying structure; selection iterates up to here
    pub fn residue_count(&self) -> usize { self.residue_count }

    /// Looks a pair up regardless of argument order
    pub fn get(&self, idx1: LegacyIndex, idx2: LegacyIndex) -> Option<&CandidateInfo> {
        let key = if idx1 <= idx2 { (idx1, idx2) } else { (idx2, idx1) };
        return self.cache.get(&key);
    }

    /// Valid partners of a residue, ascending
    pub fn valid_partners_for(&self, idx: LegacyIndex) -> &[LegacyIndex] {
        self.valid_partners.get(&idx).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// All cached partners of a residue, valid or not, ascending
    pub fn all_partners_for(&self, idx: LegacyIndex) -> &[LegacyIndex] {
        self.all_partners.get(&idx).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Iterates over all cached pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&(LegacyIndex, LegacyIndex), &CandidateInfo)> {
        self.cache.iter()
    }
}
