//! Hydrogen-bond detection between residue pairs.
//!
//! The engine runs a four-stage pipeline: candidate enumeration by distance and
//! element, conflict resolution over shared atoms, donor/acceptor role validation
//! against per-base tables and an informational geometric quality score. A
//! counting-only variant serves the pair validator, and a slot-based optimizer is
//! available as an alternative selection path.

mod finder;
mod roles;
mod quality;
mod edges;
mod slots;

pub use finder::HBondFinder;
pub use roles::{nucleotide_atom_role, classify_by_roles};
pub use quality::{HBondQualityScore, HBondQualityScorer, HBondScoringParams, QualityTier, is_sp2_acceptor};
pub use edges::base_edge_of;
pub use slots::{SlotOptimizer, donor_capacity, acceptor_capacity};

use nucpair_structure::{LegacyIndex, Residue, ResidueKind};
use nucpair_structure::typing::{atom_location, AtomLocation};

/// Outcome of donor/acceptor validation for one bond
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HBondClassification {
    /// not yet classified
    Unknown,
    /// a confirmed donor-acceptor bond; legacy character `'-'`
    Standard,
    /// the atoms can bond but the roles stay ambiguous; legacy character `'*'`
    NonStandard,
    /// failed validation; legacy character `' '`
    Invalid,
}

impl HBondClassification {
    /// The single-character code used in legacy-style listings
    pub fn legacy_char(&self) -> char {
        match self {
            HBondClassification::Standard => '-',
            HBondClassification::NonStandard => '*',
            _ => ' ',
        }
    }
}

/// How a bond fared in the shared-atom conflict resolution
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictState {
    /// never competed for an atom
    NoConflict,
    /// competed and won on distance
    Winner,
    /// lost its donor or acceptor atom to a shorter bond
    Loser,
    /// lost both of its atoms to shorter bonds
    LoserBoth,
}

impl ConflictState {
    /// True for the bonds that survive conflict resolution
    pub fn survives(&self) -> bool {
        matches!(self, ConflictState::NoConflict | ConflictState::Winner)
    }
}

/// What structural elements a bond connects
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HBondContext {
    BaseBase,
    BaseBackbone,
    BackboneBackbone,
    BaseSugar,
    SugarSugar,
    BaseProtein,
    SugarProtein,
    BackboneProtein,
    ProteinMainchain,
    ProteinSidechain,
    BaseLigand,
    ProteinLigand,
    LigandLigand,
    Unknown,
}

/// The face of a base that carries an interaction (Leontis-Westhof)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BaseEdge {
    Watson,
    Hoogsteen,
    Sugar,
    Unknown,
}

/// One detected hydrogen bond.
///
/// The donor/acceptor assignment is provisional until role validation; the engine
/// re-orients the bond when the role tables prove the acceptor side donates.
#[derive(Clone, Debug)]
pub struct HydrogenBond {
    /// name of the donor atom
    pub donor_atom: String,
    /// name of the acceptor atom
    pub acceptor_atom: String,
    /// legacy index of the donor residue
    pub donor_residue: LegacyIndex,
    /// legacy index of the acceptor residue
    pub acceptor_residue: LegacyIndex,
    /// donor-acceptor distance, in Angstroms
    pub distance: f64,
    /// X-D...A angle at the donor, in degrees, when the reference neighbor exists
    pub donor_angle: Option<f64>,
    /// D...A-Y angle at the acceptor, in degrees, when the reference neighbor exists
    pub acceptor_angle: Option<f64>,
    /// X-D...A-Y dihedral, in degrees, when both reference neighbors exist
    pub dihedral: Option<f64>,
    /// validation outcome
    pub classification: HBondClassification,
    /// what the bond connects
    pub context: HBondContext,
    /// base edge the donor atom sits on
    pub donor_edge: BaseEdge,
    /// base edge the acceptor atom sits on
    pub acceptor_edge: BaseEdge,
    /// conflict-resolution state
    pub conflict: ConflictState,
    /// informational quality score; never gates detection
    pub quality: Option<HBondQualityScore>,
}

impl HydrogenBond {
    /// A bond counts as good when it validated as standard with a distance
    /// in the [2.5, 3.5] Angstrom window
    pub fn is_good(&self) -> bool {
        self.classification == HBondClassification::Standard
            && self.distance >= 2.5 && self.distance <= 3.5
    }
}

/// The full trace of the detection pipeline for one residue pair
#[derive(Clone, Debug, Default)]
pub struct DetailedHBondResult {
    /// candidates straight out of enumeration
    pub initial: Vec<HydrogenBond>,
    /// candidates after conflict resolution, with conflict states set
    pub after_conflict: Vec<HydrogenBond>,
    /// all candidates after role validation, including the invalidated ones
    pub after_validation: Vec<HydrogenBond>,
    /// surviving bonds only: validated and conflict-free
    pub final_bonds: Vec<HydrogenBond>,
    /// number of good bonds among the final ones
    pub num_good: usize,
}

impl DetailedHBondResult {
    fn default_with_capacity(n: usize) -> DetailedHBondResult {
        DetailedHBondResult { initial: Vec::with_capacity(n), ..Default::default() }
    }
}

/// Classifies what two bonded atoms connect, from their residues and locations
pub fn context_of(res1: &Residue, atom1: &str, res2: &Residue, atom2: &str) -> HBondContext {
    let kind1 = res1.kind();
    let kind2 = res2.kind();
    let loc = |res: &Residue, name: &str| {
        atom_location(name, res.is_nucleotide(), res.is_amino_acid())
    };
    match (kind1, kind2) {
        (ResidueKind::Nucleotide(_), ResidueKind::Nucleotide(_)) => {
            let l1 = loc(res1, atom1);
            let l2 = loc(res2, atom2);
            match (l1, l2) {
                (AtomLocation::Base, AtomLocation::Base) => HBondContext::BaseBase,
                (AtomLocation::Base, AtomLocation::Sugar)
                | (AtomLocation::Sugar, AtomLocation::Base) => HBondContext::BaseSugar,
                (AtomLocation::Base, AtomLocation::PhosphateBackbone)
                | (AtomLocation::PhosphateBackbone, AtomLocation::Base) => HBondContext::BaseBackbone,
                (AtomLocation::Sugar, AtomLocation::Sugar) => HBondContext::SugarSugar,
                _ => HBondContext::BackboneBackbone,
            }
        }
        (ResidueKind::Nucleotide(_), ResidueKind::AminoAcid) => {
            match loc(res1, atom1) {
                AtomLocation::Base => HBondContext::BaseProtein,
                AtomLocation::Sugar => HBondContext::SugarProtein,
                _ => HBondContext::BackboneProtein,
            }
        }
        (ResidueKind::AminoAcid, ResidueKind::Nucleotide(_)) => {
            match loc(res2, atom2) {
                AtomLocation::Base => HBondContext::BaseProtein,
                AtomLocation::Sugar => HBondContext::SugarProtein,
                _ => HBondContext::BackboneProtein,
            }
        }
        (ResidueKind::AminoAcid, ResidueKind::AminoAcid) => {
            if loc(res1, atom1) == AtomLocation::ProteinMainchain
                && loc(res2, atom2) == AtomLocation::ProteinMainchain {
                HBondContext::ProteinMainchain
            } else {
                HBondContext::ProteinSidechain
            }
        }
        (ResidueKind::Nucleotide(_), _) | (_, ResidueKind::Nucleotide(_)) => HBondContext::BaseLigand,
        (ResidueKind::AminoAcid, _) | (_, ResidueKind::AminoAcid) => HBondContext::ProteinLigand,
        (ResidueKind::Ligand, ResidueKind::Ligand) => HBondContext::LigandLigand,
        _ => HBondContext::Unknown,
    }
}
