//! Base-pair and base-pair-step geometry analysis for nucleic-acid structures.
//!
//! The crate implements the full analysis pipeline on top of the
//! [`nucpair_structure`](nucpair_structure) data model:
//! reference-frame fitting per nucleotide, hydrogen-bond detection, six-gate pair
//! validation, mutual-best pair selection, helix organization with 5'→3'
//! canonicalization and the El Hassan-Calladine step and helical parameters.
//!
//! # Protocols
//! Two protocols cover the common workflows; both are pure functions of the structure,
//! the [`AnalysisConfig`](AnalysisConfig) and the template library, and both feed a
//! typed event stream into an [`EventSink`](events::EventSink):
//!
//! ```no_run
//! use nucpair_analysis::{find_pair, AnalysisConfig};
//! use nucpair_analysis::events::NullSink;
//! use nucpair_structure::{Structure, TemplateLibrary};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let templates = TemplateLibrary::open("resources/templates")?;
//! let mut structure: Structure = unimplemented!("load a structure");
//! let outcome = find_pair(&mut structure, &templates, &AnalysisConfig::default(), &mut NullSink)?;
//! for (helix_no, helix) in outcome.helices.iter().enumerate() {
//!     println!("helix {}: {} pairs", helix_no + 1, helix.len());
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod errors;
mod pairs;
mod frames;
mod cache;
mod selection;
mod protocols;

pub mod events;
pub mod hbond;
pub mod helix;
pub mod stepwise;
pub mod pair_type;
pub mod validate;

pub use config::AnalysisConfig;
pub use errors::AnalysisError;
pub use pairs::{BasePair, HelixSegment};
pub use frames::{classify_ring_by_rmsd, FrameFitResult, FrameFitter, RingClassification};
pub use cache::{CandidateInfo, PairCandidateCache};
pub use selection::{BestAvailableStrategy, MutualBestStrategy, SelectionStrategy};
pub use protocols::{analyze, find_pair, fit_all_frames, format_pair_list, parse_pair_list,
                    AnalyzeOutcome, FindPairOutcome, PairListEntry};
