//! The two analysis protocols.
//!
//! `find_pair` takes a structure from frames through validation, selection and helix
//! organization to an ordered base-pair list. `analyze` takes a structure plus an
//! explicit pair list and produces step and helical parameters along every helix.
//! Both are pure functions of (structure, configuration, template library); events
//! flow into the sink passed in.

use log::info;

use nucpair_structure::{LegacyIndex, ResidueKind, Structure, TemplateLibrary};

use crate::cache::PairCandidateCache;
use crate::events::{AnalysisEvent, EventSink};
use crate::frames::{FrameFitResult, FrameFitter};
use crate::helix::{backbone_map, HelixOrdering, HelixOrganizer};
use crate::pairs::{BasePair, HelixSegment};
use crate::selection::{MutualBestStrategy, SelectionStrategy};
use crate::stepwise::{step_series, StepRecord};
use crate::{AnalysisConfig, AnalysisError};

/// Output of the `find_pair` protocol
#[derive(Clone, Debug)]
pub struct FindPairOutcome {
    /// selected base pairs, reordered along the helices
    pub pairs: Vec<BasePair>,
    /// helix segments, indexing into `pairs`
    pub helices: Vec<HelixSegment>,
    /// per-pair strand-swap flags, parallel to `pairs`
    pub strand_swapped: Vec<bool>,
}

/// One entry of the pair list consumed by the `analyze` protocol
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairListEntry {
    /// legacy index of the strand-1 residue
    pub idx1: LegacyIndex,
    /// legacy index of the strand-2 residue
    pub idx2: LegacyIndex,
    /// true when the strand assignment must be swapped
    pub swap_strands: bool,
}

/// Output of the `analyze` protocol
#[derive(Clone, Debug)]
pub struct AnalyzeOutcome {
    /// base pairs rebuilt from the input list, in input order
    pub pairs: Vec<BasePair>,
    /// step and helical parameters of every analyzed step
    pub steps: Vec<StepRecord>,
}

/// Fits frames for the residues of a structure and stores them.
///
/// Amino acids, waters and ions can never carry a base frame and are skipped;
/// everything else gets a fit attempt and a `FrameCalc` event, degenerate fits
/// included. Returns the per-residue results in legacy order.
pub fn fit_all_frames(structure: &mut Structure, templates: &TemplateLibrary,
                      config: &AnalysisConfig, sink: &mut dyn EventSink) -> Vec<FrameFitResult> {
    let is_rna = structure.is_rna();
    let fitter = FrameFitter::new(templates, is_rna, config);

    let indices: Vec<LegacyIndex> = structure.residues_in_legacy_order()
        .filter(|(_, res)| !matches!(res.kind(),
            ResidueKind::AminoAcid | ResidueKind::Water | ResidueKind::Ion))
        .map(|(idx, _)| idx)
        .collect();

    let mut results = vec![];
    for idx in indices {
        let Some(residue) = structure.residue(idx) else { continue };
        let result = fitter.fit_residue(residue);
        sink.on_event(&AnalysisEvent::FrameCalc {
            residue: idx,
            base_code: result.base_code,
            matched_atoms: result.matched_atoms.clone(),
            rmsd: result.rmsd,
            is_valid: result.is_valid,
            rotation: result.frame.as_ref().map(|f| *f.rotation()),
            origin: result.frame.as_ref().map(|f| *f.origin()),
        });
        if let Some(frame) = result.frame {
            if let Some(residue) = structure.residue_mut(idx) {
                residue.set_frame(frame);
            }
        }
        results.push(result);
    }
    return results;
}

/// Runs the full pair-finding pipeline on a structure.
///
/// Frames are fitted and written back, every eligible pair validated and cached, the
/// mutual-best selection run to its fixed point, and the selected pairs organized
/// into 5'→3' helices. Finding no pairs is a valid outcome, not an error.
pub fn find_pair(structure: &mut Structure, templates: &TemplateLibrary,
                 config: &AnalysisConfig, sink: &mut dyn EventSink)
                 -> Result<FindPairOutcome, AnalysisError> {
    if structure.count_residues() == 0 {
        return Err(AnalysisError::EmptyStructure { structure_id: structure.id.clone() });
    }
    info!("find_pair: {} residues in {} chains", structure.count_residues(), structure.count_chains());

    fit_all_frames(structure, templates, config, sink);

    let cache = PairCandidateCache::build(structure, config, sink);
    if cache.valid_count() == 0 {
        info!("find_pair: no valid pair candidates");
        return Ok(FindPairOutcome { pairs: vec![], helices: vec![], strand_swapped: vec![] });
    }
    let selected = MutualBestStrategy.select(&cache, sink);

    let mut pairs = vec![];
    for (idx1, idx2) in selected {
        let Some(info) = cache.get(idx1, idx2) else { continue };
        let (Some(res1), Some(res2)) = (structure.residue(idx1), structure.residue(idx2)) else { continue };
        let (Some(f1), Some(f2)) = (res1.frame(), res2.frame()) else { continue };
        pairs.push(BasePair::new(idx1, idx2, *f1, *f2, info.pair_type, info.adjusted_quality));
    }
    sink.on_event(&AnalysisEvent::PairsFinalized { pairs: pairs.clone() });

    let backbone = backbone_map(structure);
    let ordering: HelixOrdering = HelixOrganizer::new(config, &backbone).organize(&pairs);

    // materialize the helix order: pairs come out reordered, flags follow them
    let ordered_pairs: Vec<BasePair> = ordering.pair_order.iter().map(|&i| pairs[i].clone()).collect();
    let ordered_flags: Vec<bool> = ordering.pair_order.iter().map(|&i| ordering.strand_swapped[i]).collect();

    info!("find_pair: {} pairs in {} helices", ordered_pairs.len(), ordering.helices.len());
    return Ok(FindPairOutcome {
        pairs: ordered_pairs,
        helices: ordering.helices,
        strand_swapped: ordered_flags,
    });
}

/// Runs the analyze pipeline: refit frames of the listed residues, rebuild the pairs
/// and calculate step and helical parameters for adjacent pairs.
///
/// The pair list is taken as one helix in the given order; `step_start` (0-based) and
/// `step_stride` restrict the calculation to the step subset `{s, s+k, ...}`.
pub fn analyze(structure: &mut Structure, pair_list: &[PairListEntry],
               templates: &TemplateLibrary, config: &AnalysisConfig,
               step_start: usize, step_stride: usize,
               sink: &mut dyn EventSink) -> Result<AnalyzeOutcome, AnalysisError> {
    if structure.count_residues() == 0 {
        return Err(AnalysisError::EmptyStructure { structure_id: structure.id.clone() });
    }
    let n_residues = structure.count_residues();
    for entry in pair_list {
        for idx in [entry.idx1, entry.idx2] {
            if idx.one_based() > n_residues {
                return Err(AnalysisError::UnknownLegacyIndex {
                    index: idx.one_based(), n_residues,
                });
            }
        }
    }

    // frames are fitted only for the residues the pair list names
    let is_rna = structure.is_rna();
    let fitter = FrameFitter::new(templates, is_rna, config);
    let mut listed: Vec<LegacyIndex> = pair_list.iter()
        .flat_map(|e| [e.idx1, e.idx2])
        .collect();
    listed.sort();
    listed.dedup();
    for idx in listed {
        let Some(residue) = structure.residue(idx) else { continue };
        let result = fitter.fit_residue(residue);
        sink.on_event(&AnalysisEvent::FrameCalc {
            residue: idx,
            base_code: result.base_code,
            matched_atoms: result.matched_atoms.clone(),
            rmsd: result.rmsd,
            is_valid: result.is_valid,
            rotation: result.frame.as_ref().map(|f| *f.rotation()),
            origin: result.frame.as_ref().map(|f| *f.origin()),
        });
        if let Some(frame) = result.frame {
            if let Some(residue) = structure.residue_mut(idx) {
                residue.set_frame(frame);
            }
        }
    }

    let mut pairs = vec![];
    let mut pair_frames = vec![];
    for entry in pair_list {
        let (Some(res1), Some(res2)) = (structure.residue(entry.idx1), structure.residue(entry.idx2)) else {
            continue;
        };
        let (Some(f1), Some(f2)) = (res1.frame(), res2.frame()) else { continue };
        let pair = BasePair::new(entry.idx1, entry.idx2, *f1, *f2, 0, 0.0);
        pair_frames.push(pair.pair_frame(entry.swap_strands));
        pairs.push(pair);
    }

    let steps = step_series(&pair_frames, step_start, step_stride);
    info!("analyze: {} pairs, {} steps", pairs.len(), steps.len());
    return Ok(AnalyzeOutcome { pairs, steps });
}

/// Parses the two-column pair list the `find_pair` front-end emits.
///
/// Each non-empty, non-comment line carries two 1-based residue indices and an
/// optional swap flag (`1` swaps the strand assignment):
/// ```text
/// # residue_1  residue_2  swap
/// 1   20   0
/// 2   19   0
/// ```
pub fn parse_pair_list(text: &str) -> Result<Vec<PairListEntry>, AnalysisError> {
    let mut entries = vec![];
    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') { continue; }
        let mut fields = trimmed.split_whitespace();
        let parse_index = |field: Option<&str>| -> Option<usize> {
            field.and_then(|f| f.parse::<usize>().ok()).filter(|v| *v > 0)
        };
        let (Some(i1), Some(i2)) = (parse_index(fields.next()), parse_index(fields.next())) else {
            return Err(AnalysisError::PairListParse { line_no: line_no + 1, line: line.to_string() });
        };
        let swap = fields.next().map(|f| f == "1").unwrap_or(false);
        entries.push(PairListEntry {
            idx1: LegacyIndex::new(i1),
            idx2: LegacyIndex::new(i2),
            swap_strands: swap,
        });
    }
    return Ok(entries);
}

/// Renders a pair list back into its text form, including the swap flags
pub fn format_pair_list(pairs: &[BasePair], strand_swapped: &[bool]) -> String {
    let mut out = String::from("# residue_1  residue_2  swap\n");
    for (i, pair) in pairs.iter().enumerate() {
        let swap = strand_swapped.get(i).copied().unwrap_or(false);
        out.push_str(&format!("{:>6} {:>6} {:>3}\n",
            pair.idx1().one_based(), pair.idx2().one_based(), if swap { 1 } else { 0 }));
    }
    return out;
}
