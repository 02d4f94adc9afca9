use super::BaseEdge;

/// Returns the Leontis-Westhof edge an atom sits on, given its base.
///
/// # Example
/// ```
/// use nucpair_analysis::hbond::{base_edge_of, BaseEdge};
/// assert_eq!(base_edge_of('G', "O6"), BaseEdge::Watson);
/// assert_eq!(base_edge_of('A', "N7"), BaseEdge::Hoogsteen);
/// assert_eq!(base_edge_of('C', "O2"), BaseEdge::Sugar);
/// assert_eq!(base_edge_of('G', "C1'"), BaseEdge::Unknown);
/// ```
pub fn base_edge_of(base: char, atom_name: &str) -> BaseEdge {
    let name = atom_name.trim();
    if name == "O2'" { return BaseEdge::Sugar; }
    match (base.to_ascii_uppercase(), name) {
        // adenine
        ('A', "N1" | "C2" | "N6") => BaseEdge::Watson,
        ('A', "N7" | "C8") => BaseEdge::Hoogsteen,
        ('A', "N3" | "C4") => BaseEdge::Sugar,
        // guanine and inosine (hypoxanthine shares the guanine faces)
        ('G' | 'I', "N1" | "O6") => BaseEdge::Watson,
        ('G' | 'I', "N7" | "C8") => BaseEdge::Hoogsteen,
        ('G' | 'I', "N2" | "N3" | "C4") => BaseEdge::Sugar,
        ('G' | 'I', "C2") => BaseEdge::Watson,
        // cytosine
        ('C', "N3" | "C4" | "N4") => BaseEdge::Watson,
        ('C', "C5" | "C6") => BaseEdge::Hoogsteen,
        ('C', "O2" | "N1") => BaseEdge::Sugar,
        // uracil, thymine and pseudouridine
        ('U' | 'T' | 'P', "N3" | "C4" | "O4") => BaseEdge::Watson,
        ('U' | 'T' | 'P', "C5" | "C6" | "C5M" | "C7") => BaseEdge::Hoogsteen,
        ('U' | 'T' | 'P', "O2" | "N1") => BaseEdge::Sugar,
        _ => BaseEdge::Unknown,
    }
}
