//! Atom-level classification derived from atom and residue names.
//!
//! The classification rules mirror the fixed-column PDB naming conventions: the element
//! is resolved from a 4-character name pattern, the location from well-known name sets
//! and the hydrogen-bond role from the chemistry the name implies. All functions accept
//! trimmed atom names.

use std::collections::BTreeMap;
use once_cell::sync::Lazy;

/// Where an atom sits within its residue
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomLocation {
    /// phosphate backbone of a nucleotide: P, OP1/O1P, OP2/O2P, O5', O3'
    PhosphateBackbone,
    /// ribose / deoxyribose atom: C1'-C5', O4', O2'
    Sugar,
    /// nucleobase atom
    Base,
    /// protein mainchain: N, CA, C, O, OXT
    ProteinMainchain,
    /// protein sidechain atom
    ProteinSidechain,
    /// anything carried by a heteroatom record
    Hetero,
}

/// Default hydrogen-bond role implied by an atom name.
///
/// The role is a name-level default: ring nitrogens that donate in one base and accept
/// in another (N1 of guanine vs N1 of adenine) are reported as [`Either`](HBondRole::Either)
/// here and resolved per base by the hydrogen-bond engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HBondRole {
    Donor,
    Acceptor,
    Either,
    None,
}

/// Ring atoms of a purine base, in perimeter order
pub const PURINE_RING_ATOMS: [&str; 9] = ["C4", "N3", "C2", "N1", "C6", "C5", "N7", "C8", "N9"];

/// Ring atoms of a pyrimidine base, in perimeter order
pub const PYRIMIDINE_RING_ATOMS: [&str; 6] = ["C4", "N3", "C2", "N1", "C6", "C5"];

/// Atom-name pattern → element symbol table.
///
/// A pattern is the 4-character, space-padded atom name with every non-alphabetic
/// position replaced by `'.'`. The map is ordered so resolution is deterministic.
static ELEMENT_PATTERNS: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        // --- single-letter elements in the canonical " Xnn" position
        (".C..", "C"), (".N..", "N"), (".O..", "O"), (".P..", "P"), (".S..", "S"), (".H..", "H"),
        // --- named carbons, nitrogens, oxygens and sulphurs of amino acids
        (".CA.", "C"), (".CB.", "C"), (".CD.", "C"), (".CE.", "C"), (".CG.", "C"),
        (".CH.", "C"), (".CZ.", "C"),
        (".ND.", "N"), (".NE.", "N"), (".NH.", "N"), (".NZ.", "N"),
        (".OD.", "O"), (".OE.", "O"), (".OG.", "O"), (".OH.", "O"), (".OXT", "O"),
        (".SD.", "S"), (".SG.", "S"),
        // --- nucleotide specials
        (".OP.", "O"), (".C.M", "C"),
        // --- hydrogens named with a leading H
        ("H...", "H"), ("HO..", "H"), ("HN..", "H"), ("HB..", "H"), ("HG..", "H"), ("HD..", "H"),
        // --- common ions; right-justified two-letter names
        ("MG..", "MG"), ("NA..", "NA"), ("ZN..", "ZN"), ("CL..", "CL"), ("MN..", "MN"),
        ("FE..", "FE"), ("CA..", "CA"), (".K..", "K"), ("BR..", "BR"), (".I..", "I"),
        ("CO..", "CO"), ("NI..", "NI"), ("CU..", "CU"), ("CD..", "CD"), ("SR..", "SR"),
    ])
});

/// Pads a trimmed atom name back into the 4-character PDB convention.
///
/// Single-letter-element names are right-shifted by one column, the way PDB files
/// place them: `"N1"` becomes `" N1 "`, while a four-character name is kept as is.
pub fn pad_atom_name(atom_name: &str) -> String {
    let mut name = atom_name.trim().to_string();
    if name.len() < 4 {
        name.insert(0, ' ');
        while name.len() < 4 { name.push(' '); }
    }
    name.truncate(4);
    return name;
}

/// Converts an atom name to its element-lookup pattern.
///
/// # Example
/// ```
/// use nucpair_structure::typing::atom_name_to_pattern;
/// assert_eq!(atom_name_to_pattern("N1"), ".N..");
/// assert_eq!(atom_name_to_pattern("OP1"), ".OP.");
/// assert_eq!(atom_name_to_pattern("C1'"), ".C..");
/// ```
pub fn atom_name_to_pattern(atom_name: &str) -> String {
    pad_atom_name(atom_name).chars()
        .map(|c| if c.is_ascii_alphabetic() { c.to_ascii_uppercase() } else { '.' })
        .collect()
}

/// Resolves the element symbol of an atom from its name.
///
/// The padded name pattern is looked up in an ordered pattern table; unresolved names
/// fall back to the first alphabetic character when that character is one of
/// C, N, O, P, S or H, and to `"X"` otherwise.
///
/// # Example
/// ```
/// use nucpair_structure::typing::element_symbol;
/// assert_eq!(element_symbol("N7"), "N");
/// assert_eq!(element_symbol("O2'"), "O");
/// assert_eq!(element_symbol("MG"), "MG");
/// assert_eq!(element_symbol("XQ"), "X");
/// ```
pub fn element_symbol(atom_name: &str) -> &'static str {
    let pattern = atom_name_to_pattern(atom_name);
    if let Some(symbol) = ELEMENT_PATTERNS.get(pattern.as_str()) {
        return symbol;
    }
    match atom_name.trim().chars().find(|c| c.is_ascii_alphabetic()) {
        Some(c) => match c.to_ascii_uppercase() {
            'C' => "C", 'N' => "N", 'O' => "O", 'P' => "P", 'S' => "S", 'H' => "H",
            _ => "X",
        },
        None => "X",
    }
}

/// Returns true for phosphate-backbone atoms of a nucleotide
pub fn is_backbone_atom(atom_name: &str) -> bool {
    matches!(atom_name.trim(), "P" | "OP1" | "OP2" | "OP3" | "O1P" | "O2P" | "O3P" | "O5'" | "O3'")
}

/// Returns true for sugar atoms of a nucleotide
pub fn is_sugar_atom(atom_name: &str) -> bool {
    matches!(atom_name.trim(), "C1'" | "C2'" | "C3'" | "C4'" | "C5'" | "O4'" | "O2'")
}

/// Returns true for protein mainchain atoms
pub fn is_mainchain_atom(atom_name: &str) -> bool {
    matches!(atom_name.trim(), "N" | "CA" | "C" | "O" | "OXT")
}

/// Returns true when an atom belongs to a nucleobase ring.
///
/// # Example
/// ```
/// use nucpair_structure::typing::is_ring_atom;
/// assert!(is_ring_atom("N9"));
/// assert!(!is_ring_atom("C1'"));
/// assert!(!is_ring_atom("N6"));
/// ```
pub fn is_ring_atom(atom_name: &str) -> bool {
    PURINE_RING_ATOMS.contains(&atom_name.trim())
}

/// Returns true for atoms counted as base atoms by the hydrogen-bond counting pass.
///
/// Base atoms carry names of the element-plus-digit form (N1, O6, C5 ...) with the
/// element not being hydrogen or phosphorus; the thymine methyl C5M is included.
/// Primed (sugar) and backbone names never match.
pub fn is_base_atom(atom_name: &str) -> bool {
    let name = atom_name.trim();
    if name == "C5M" || name == "C7" { return true; }
    let mut chars = name.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(e), Some(d), None) => {
            d.is_ascii_digit() && matches!(e, 'C' | 'N' | 'O' | 'S')
        }
        _ => false,
    }
}

/// Returns the name-level default hydrogen-bond role of a nucleotide atom
pub fn default_hbond_role(atom_name: &str) -> HBondRole {
    match atom_name.trim() {
        // exocyclic amino groups always donate
        "N2" | "N4" | "N6" => HBondRole::Donor,
        // carbonyl oxygens always accept
        "O2" | "O4" | "O6" => HBondRole::Acceptor,
        // ring nitrogens resolve per base
        "N1" | "N3" | "N7" => HBondRole::Either,
        // 2'-hydroxyl donates and accepts
        "O2'" => HBondRole::Either,
        // remaining backbone / sugar oxygens accept
        "OP1" | "OP2" | "O1P" | "O2P" | "O3'" | "O5'" | "O4'" => HBondRole::Acceptor,
        name => {
            match element_symbol(name) {
                "N" | "O" | "S" => HBondRole::Either,
                _ => HBondRole::None,
            }
        }
    }
}

/// Returns the location of an atom given whether its residue is a nucleotide,
/// an amino acid or something else
pub fn atom_location(atom_name: &str, is_nucleotide: bool, is_amino_acid: bool) -> AtomLocation {
    if is_nucleotide {
        if is_backbone_atom(atom_name) { return AtomLocation::PhosphateBackbone; }
        if is_sugar_atom(atom_name) { return AtomLocation::Sugar; }
        return AtomLocation::Base;
    }
    if is_amino_acid {
        if is_mainchain_atom(atom_name) { return AtomLocation::ProteinMainchain; }
        return AtomLocation::ProteinSidechain;
    }
    return AtomLocation::Hetero;
}
