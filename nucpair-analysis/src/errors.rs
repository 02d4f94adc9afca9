use thiserror::Error;
use nucpair_structure::StructureError;

/// Errors raised at the protocol boundary.
///
/// Everything per-residue or per-pair is handled locally and never surfaces here:
/// a degenerate frame fit or a failed pair gate is an expected outcome, not an error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input structure carries no residues at all
    #[error("the structure '{structure_id}' contains no residues")]
    EmptyStructure { structure_id: String },
    /// A pair list entry references a legacy index the structure does not have
    #[error("pair list references unknown residue index {index} (structure has {n_residues} residues)")]
    UnknownLegacyIndex { index: usize, n_residues: usize },
    /// A pair list line could not be parsed
    #[error("can't parse pair list line {line_no}: {line}")]
    PairListParse { line_no: usize, line: String },
    /// Template library failure; raised during initialization only
    #[error(transparent)]
    Template(#[from] StructureError),
}
