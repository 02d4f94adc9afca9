//! Typed event stream of the analysis.
//!
//! Every decision point emits an immutable [`AnalysisEvent`](AnalysisEvent) record into
//! an [`EventSink`](EventSink). The sink is a plain trait object threaded through the
//! protocols; [`NullSink`](NullSink) is the default, and
//! [`JsonEventRecorder`](JsonEventRecorder) collects the stream as JSON values for
//! diagnostic output.

use serde_json::{json, Value};

use nucpair_geometry::{Matrix3, Vec3};
use nucpair_structure::LegacyIndex;

use crate::pairs::BasePair;
use crate::validate::ValidationResult;

/// One partner considered during best-partner search
#[derive(Clone, Debug)]
pub struct PartnerCandidate {
    /// legacy index of the candidate partner
    pub partner: LegacyIndex,
    /// adjusted quality score of the pairing; lower is better
    pub score: f64,
    /// categorical pair type of the pairing
    pub pair_type: i32,
    /// whether the pairing passed validation
    pub is_valid: bool,
}

/// A structured record of one analysis decision point
#[derive(Clone, Debug)]
pub enum AnalysisEvent {
    /// a reference frame was fitted (or failed to fit) for a residue
    FrameCalc {
        residue: LegacyIndex,
        base_code: char,
        matched_atoms: Vec<String>,
        rmsd: f64,
        is_valid: bool,
        rotation: Option<Matrix3>,
        origin: Option<Vec3>,
    },
    /// a candidate pair went through the six-gate validation
    PairValidated {
        idx1: LegacyIndex,
        idx2: LegacyIndex,
        result: ValidationResult,
        pair_type: i32,
    },
    /// the best partner of a residue was searched among its valid candidates
    BestPartnerCandidates {
        residue: LegacyIndex,
        candidates: Vec<PartnerCandidate>,
        chosen: Option<LegacyIndex>,
        chosen_score: f64,
    },
    /// a mutual-best check was performed for a tentative pair
    MutualBestCheck {
        idx1: LegacyIndex,
        idx2: LegacyIndex,
        best_of_1: LegacyIndex,
        best_of_2: Option<LegacyIndex>,
        is_mutual: bool,
        was_selected: bool,
    },
    /// one fixed-point pass of the selection finished
    IterationComplete {
        iteration: usize,
        pairs_this_pass: Vec<(LegacyIndex, LegacyIndex)>,
        matched: Vec<bool>,
        total_matched: usize,
    },
    /// the selection reached its fixed point
    SelectionComplete {
        selected: Vec<(LegacyIndex, LegacyIndex)>,
    },
    /// the final base-pair records were built
    PairsFinalized {
        pairs: Vec<BasePair>,
    },
}

/// Receives analysis events; implementations record, log or ignore them
pub trait EventSink {
    /// Called once per emitted event
    fn on_event(&mut self, event: &AnalysisEvent);
}

/// The default sink: drops every event
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&mut self, _event: &AnalysisEvent) {}
}

/// Collects events as JSON values for downstream diagnostic writers.
///
/// # Example
/// ```
/// use nucpair_analysis::events::{AnalysisEvent, EventSink, JsonEventRecorder};
/// use nucpair_structure::LegacyIndex;
/// let mut recorder = JsonEventRecorder::new();
/// recorder.on_event(&AnalysisEvent::SelectionComplete {
///     selected: vec![(LegacyIndex::new(1), LegacyIndex::new(6))],
/// });
/// assert_eq!(recorder.records().len(), 1);
/// assert_eq!(recorder.records()[0]["event"], "selection_complete");
/// ```
#[derive(Default)]
pub struct JsonEventRecorder {
    records: Vec<Value>,
}

impl JsonEventRecorder {
    /// Creates an empty recorder
    pub fn new() -> JsonEventRecorder { JsonEventRecorder::default() }

    /// The recorded JSON values, in emission order
    pub fn records(&self) -> &[Value] { &self.records }

    /// Renders the whole stream as one JSON array
    pub fn to_json(&self) -> Value { Value::Array(self.records.clone()) }
}

fn index_pairs(pairs: &[(LegacyIndex, LegacyIndex)]) -> Value {
    Value::Array(pairs.iter()
        .map(|(a, b)| json!([a.one_based(), b.one_based()]))
        .collect())
}

impl EventSink for JsonEventRecorder {
    fn on_event(&mut self, event: &AnalysisEvent) {
        let record = match event {
            AnalysisEvent::FrameCalc { residue, base_code, matched_atoms, rmsd, is_valid, rotation, origin } => {
                json!({
                    "event": "frame_calc",
                    "residue": residue.one_based(),
                    "base": base_code.to_string(),
                    "matched_atoms": matched_atoms,
                    "rmsd": rmsd,
                    "is_valid": is_valid,
                    "rotation": rotation.map(|r| (0..3).map(|row| (0..3).map(|col| r.elem(row, col)).collect::<Vec<_>>()).collect::<Vec<_>>()),
                    "origin": origin.map(|o| [o.x, o.y, o.z]),
                })
            }
            AnalysisEvent::PairValidated { idx1, idx2, result, pair_type } => {
                json!({
                    "event": "pair_validated",
                    "idx1": idx1.one_based(),
                    "idx2": idx2.one_based(),
                    "is_valid": result.is_valid,
                    "dorg": result.dorg,
                    "d_v": result.d_v,
                    "plane_angle": result.plane_angle,
                    "dnn": result.dnn,
                    "overlap_area": result.overlap_area,
                    "n_base_hbonds": result.n_base_hbonds,
                    "quality": result.quality,
                    "pair_type": pair_type,
                })
            }
            AnalysisEvent::BestPartnerCandidates { residue, candidates, chosen, chosen_score } => {
                json!({
                    "event": "best_partner_candidates",
                    "residue": residue.one_based(),
                    "candidates": candidates.iter().map(|c| json!({
                        "partner": c.partner.one_based(),
                        "score": c.score,
                        "pair_type": c.pair_type,
                        "is_valid": c.is_valid,
                    })).collect::<Vec<_>>(),
                    "chosen": chosen.map(|c| c.one_based()),
                    "chosen_score": chosen_score,
                })
            }
            AnalysisEvent::MutualBestCheck { idx1, idx2, best_of_1, best_of_2, is_mutual, was_selected } => {
                json!({
                    "event": "mutual_best_check",
                    "idx1": idx1.one_based(),
                    "idx2": idx2.one_based(),
                    "best_of_1": best_of_1.one_based(),
                    "best_of_2": best_of_2.map(|b| b.one_based()),
                    "is_mutual": is_mutual,
                    "was_selected": was_selected,
                })
            }
            AnalysisEvent::IterationComplete { iteration, pairs_this_pass, matched, total_matched } => {
                json!({
                    "event": "iteration_complete",
                    "iteration": iteration,
                    "pairs_this_pass": index_pairs(pairs_this_pass),
                    "matched": matched,
                    "total_matched": total_matched,
                })
            }
            AnalysisEvent::SelectionComplete { selected } => {
                json!({
                    "event": "selection_complete",
                    "selected": index_pairs(selected),
                })
            }
            AnalysisEvent::PairsFinalized { pairs } => {
                json!({
                    "event": "pairs_finalized",
                    "pairs": pairs.iter().map(|p| json!({
                        "idx1": p.idx1().one_based(),
                        "idx2": p.idx2().one_based(),
                        "pair_type": p.pair_type(),
                        "quality": p.quality(),
                    })).collect::<Vec<_>>(),
                })
            }
        };
        self.records.push(record);
    }
}
