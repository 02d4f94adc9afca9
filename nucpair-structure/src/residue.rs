use nucpair_geometry::Vec3;

use crate::{Atom, BaseIdentity, ReferenceFrame, KNOWN_NUCLEOTIDES};
use crate::nucleotides::{AMINO_ACID_NAMES, ION_NAMES, WATER_NAMES};
use crate::typing::{PURINE_RING_ATOMS, PYRIMIDINE_RING_ATOMS};

/// Classification of a nucleotide residue: its parent base and how the residue relates to it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NucleotideInfo {
    /// parent base identity
    pub base: BaseIdentity,
    /// true when the residue is a modified variant of the parent base
    pub is_modified: bool,
}

/// What kind of molecule a residue belongs to.
///
/// The nucleotide variant is the hot path of the analysis; the remaining variants
/// only answer capability queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ResidueKind {
    Nucleotide(NucleotideInfo),
    AminoAcid,
    Water,
    Ion,
    Ligand,
}

/// A single residue: an ordered list of atoms sharing one residue identity.
///
/// Residues are owned by a [`Chain`](crate::Chain). The optional reference frame is
/// written once by the frame fitter and read-only afterwards.
///
/// # Example
/// ```
/// use nucpair_structure::{Atom, Residue};
/// use nucpair_geometry::Vec3;
/// let atoms = vec![Atom::new("N9", "G", "A", 1, Vec3::new(-1.289, 4.551, 0.0)),
///                  Atom::new("C8", "G", "A", 1, Vec3::new(0.023, 4.962, 0.0))];
/// let res = Residue::new(atoms);
/// assert!(res.is_nucleotide());
/// assert_eq!(res.one_letter_code(), Some('G'));
/// assert!(res.atom("N9").is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Residue {
    /// residue name as deposited, e.g. `"G"` or `"PSU"`
    pub name: String,
    /// residue sequence number
    pub res_seq: i32,
    /// chain identifier
    pub chain_id: String,
    /// insertion code
    pub i_code: char,
    kind: ResidueKind,
    atoms: Vec<Atom>,
    frame: Option<ReferenceFrame>,
}

fn classify_residue(name: &str) -> ResidueKind {
    let trimmed = name.trim().to_ascii_uppercase();
    if let Some(entry) = KNOWN_NUCLEOTIDES.entry(&trimmed) {
        return ResidueKind::Nucleotide(NucleotideInfo { base: entry.base, is_modified: entry.is_modified });
    }
    if WATER_NAMES.contains(trimmed.as_str()) { return ResidueKind::Water; }
    if ION_NAMES.contains(trimmed.as_str()) { return ResidueKind::Ion; }
    if AMINO_ACID_NAMES.contains(trimmed.as_str()) { return ResidueKind::AminoAcid; }
    return ResidueKind::Ligand;
}

impl Residue {
    /// Creates a residue from its atoms; the identity fields are taken from the first atom.
    ///
    /// # Panics
    /// Panics when the atom list is empty; a residue without atoms cannot exist.
    pub fn new(atoms: Vec<Atom>) -> Residue {
        assert!(!atoms.is_empty(), "a residue must own at least one atom");
        let first = &atoms[0];
        Residue {
            name: first.res_name.clone(),
            res_seq: first.res_seq,
            chain_id: first.chain_id.clone(),
            i_code: first.i_code,
            kind: classify_residue(&first.res_name),
            atoms,
            frame: None,
        }
    }

    /// What kind of molecule this residue belongs to
    pub fn kind(&self) -> &ResidueKind { &self.kind }

    /// Returns true when this residue is a nucleotide
    pub fn is_nucleotide(&self) -> bool { matches!(self.kind, ResidueKind::Nucleotide(_)) }

    /// Returns true when this residue is an amino acid
    pub fn is_amino_acid(&self) -> bool { matches!(self.kind, ResidueKind::AminoAcid) }

    /// Parent base identity of a nucleotide residue, `None` otherwise
    pub fn base_identity(&self) -> Option<BaseIdentity> {
        match &self.kind {
            ResidueKind::Nucleotide(info) => Some(info.base),
            _ => None,
        }
    }

    /// Nucleotide classification of this residue, `None` for non-nucleotides
    pub fn nucleotide_info(&self) -> Option<NucleotideInfo> {
        match &self.kind {
            ResidueKind::Nucleotide(info) => Some(*info),
            _ => None,
        }
    }

    /// One-letter code of the parent base, `None` for non-nucleotides
    pub fn one_letter_code(&self) -> Option<char> {
        self.base_identity().map(|b| b.one_letter_code())
    }

    /// Provides immutable access to the atoms of this residue
    pub fn atoms(&self) -> &[Atom] { &self.atoms }

    /// Finds the first atom with the given (trimmed) name
    pub fn atom(&self, name: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.name == name.trim())
    }

    /// Returns the names of the base ring atoms expected for this residue.
    ///
    /// The list follows the base perimeter: nine atoms for purines, six for pyrimidines.
    /// Non-nucleotides get an empty list.
    pub fn ring_atom_names(&self) -> &'static [&'static str] {
        match self.base_identity() {
            Some(base) if base.is_purine() => &PURINE_RING_ATOMS,
            Some(_) => &PYRIMIDINE_RING_ATOMS,
            None => &[],
        }
    }

    /// Position of the glycosidic nitrogen (N9 for purines, N1 for pyrimidines)
    pub fn glycosidic_nitrogen(&self) -> Option<&Atom> {
        let name = self.base_identity()?.glycosidic_nitrogen();
        return self.atom(name);
    }

    /// Reference frame of this residue, when one has been fitted
    pub fn frame(&self) -> Option<&ReferenceFrame> { self.frame.as_ref() }

    /// Stores the fitted reference frame on this residue
    pub fn set_frame(&mut self, frame: ReferenceFrame) { self.frame = Some(frame); }

    /// Position of the named atom, when present
    pub fn atom_position(&self, name: &str) -> Option<Vec3> {
        self.atom(name).map(|a| a.pos)
    }

    /// A short identifier of this residue for log and diagnostic messages
    pub fn res_id(&self) -> String {
        format!("{}:{}{}{}", self.chain_id, self.name, self.res_seq,
                if self.i_code == ' ' { String::new() } else { self.i_code.to_string() })
    }
}
