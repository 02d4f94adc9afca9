use nucpair_structure::typing::{element_symbol, HBondRole};

use super::HBondClassification;

/// The donor/acceptor role an atom plays within a given base.
///
/// Resolves the per-base tables: ring nitrogens donate in some bases and accept in
/// others, so the base identity decides where the generic name-level role is
/// ambiguous. Sugar and backbone oxygens are base independent. Modified nucleotides
/// are queried with the one-letter code of their parent base.
///
/// # Example
/// ```
/// use nucpair_analysis::hbond::nucleotide_atom_role;
/// use nucpair_structure::typing::HBondRole;
/// // N1 donates in guanine and accepts in adenine
/// assert_eq!(nucleotide_atom_role('G', "N1"), HBondRole::Donor);
/// assert_eq!(nucleotide_atom_role('A', "N1"), HBondRole::Acceptor);
/// assert_eq!(nucleotide_atom_role('A', "O2'"), HBondRole::Either);
/// ```
pub fn nucleotide_atom_role(base: char, atom_name: &str) -> HBondRole {
    let name = atom_name.trim();
    match name {
        "O2'" => return HBondRole::Either,
        "O3'" | "O5'" | "O4'" | "OP1" | "OP2" | "OP3" | "O1P" | "O2P" | "O3P" => {
            return HBondRole::Acceptor;
        }
        _ => {}
    }
    match (base.to_ascii_uppercase(), name) {
        ('A', "N6") => HBondRole::Donor,
        ('A', "N1" | "N3" | "N7") => HBondRole::Acceptor,
        ('G', "N1" | "N2") => HBondRole::Donor,
        ('G', "O6" | "N3" | "N7") => HBondRole::Acceptor,
        ('C', "N4") => HBondRole::Donor,
        ('C', "O2" | "N3") => HBondRole::Acceptor,
        ('T' | 'U', "N3") => HBondRole::Donor,
        ('T' | 'U', "O2" | "O4") => HBondRole::Acceptor,
        ('I', "N1") => HBondRole::Donor,
        ('I', "O6" | "N3" | "N7") => HBondRole::Acceptor,
        // pseudouridine: C-glycosidic, so both ring N-H groups donate
        ('P', "N1" | "N3") => HBondRole::Donor,
        ('P', "O2" | "O4") => HBondRole::Acceptor,
        _ => HBondRole::None,
    }
}

/// Maps a pair of roles to the bond classification.
///
/// Compatible unambiguous roles make a standard bond; an ambiguous side on atoms that
/// can bond at all makes a non-standard one; two donors or two acceptors are invalid.
/// `capable` says whether both atoms are of hydrogen-bonding elements, which decides
/// the unknown-role cases.
pub fn classify_by_roles(role1: HBondRole, role2: HBondRole, capable: bool) -> HBondClassification {
    match (role1, role2) {
        (HBondRole::Donor, HBondRole::Acceptor) | (HBondRole::Acceptor, HBondRole::Donor) => {
            HBondClassification::Standard
        }
        (HBondRole::Donor, HBondRole::Donor) | (HBondRole::Acceptor, HBondRole::Acceptor) => {
            HBondClassification::Invalid
        }
        (HBondRole::Either, HBondRole::Donor | HBondRole::Acceptor | HBondRole::Either)
        | (HBondRole::Donor | HBondRole::Acceptor, HBondRole::Either) => {
            HBondClassification::NonStandard
        }
        _ => {
            if capable { HBondClassification::NonStandard } else { HBondClassification::Invalid }
        }
    }
}

/// True when both atoms are of elements that can take part in a hydrogen bond
pub(crate) fn capable_elements(atom1: &str, atom2: &str) -> bool {
    let capable = |name: &str| matches!(element_symbol(name), "N" | "O" | "S");
    capable(atom1) && capable(atom2)
}
