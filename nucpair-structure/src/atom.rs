use std::fmt;
use std::fmt::{Display, Formatter};
use nucpair_geometry::Vec3;

use crate::StructureError;
use crate::typing::{element_symbol, pad_atom_name};

/// Atom record as found in a single line of a coordinate file.
///
/// The struct holds all data parsed from an
/// [`ATOM`](https://www.wwpdb.org/documentation/file-format-content/format33/sect9.html#ATOM)
/// or [`HETATM`](https://www.wwpdb.org/documentation/file-format-content/format33/sect9.html#HETATM)
/// line. Atom and residue names are stored trimmed; an atom is immutable once parsed.
///
/// # Examples
///```rust
/// use nucpair_structure::Atom;
/// let pdb_line = "ATOM      2  N9    G A   1      -1.289   4.551   0.000  1.00  0.00           N";
/// let a = Atom::from_atom_line(pdb_line).unwrap();
/// assert_eq!(a.name, "N9");
/// assert_eq!(a.res_name, "G");
/// assert_eq!(a.element, "N");
/// assert_eq!(a.is_hetero_atom, false);
///```
#[derive(Clone, Debug)]
pub struct Atom {
    /// atom name, trimmed of the fixed-column padding
    pub name: String,
    /// name of the residue this atom belongs to
    pub res_name: String,
    /// chain identifier; up to four characters when coming from an mmCIF source
    pub chain_id: String,
    /// residue sequence number
    pub res_seq: i32,
    /// insertion code; a space when absent
    pub i_code: char,
    /// element symbol, either taken from the file or derived from the atom name
    pub element: String,
    /// Cartesian position of this atom
    pub pos: Vec3,
    /// crystallographic occupancy
    pub occupancy: f64,
    /// temperature factor
    pub temp_factor: f64,
    /// true when the atom was recorded as `HETATM`
    pub is_hetero_atom: bool,
}

fn parse_field<T: std::str::FromStr>(line: &str, range: std::ops::Range<usize>,
                                     field: &'static str) -> Result<T, StructureError> {
    line[range].trim().parse::<T>()
        .map_err(|_| StructureError::AtomFieldParse { field, line: line.to_string() })
}

impl Atom {
    /// Creates an [`Atom`] by parsing an `ATOM` or `HETATM` record of a PDB-formatted line.
    ///
    /// The method sets the [`is_hetero_atom`](Atom::is_hetero_atom) flag based on the record
    /// tag and resolves the element from the trailing element column when present, falling
    /// back to the atom-name pattern table otherwise.
    ///
    /// ```
    /// use nucpair_structure::Atom;
    /// let a = Atom::from_atom_line("HETATM  199 MG    MG A  25      10.000  10.000  10.000  1.00  0.00          MG").unwrap();
    /// assert!(a.is_hetero_atom);
    /// assert_eq!(a.element, "MG");
    /// ```
    pub fn from_atom_line(line: &str) -> Result<Atom, StructureError> {
        if line.len() < 54 {
            return Err(StructureError::AtomLineTooShort { line: line.to_string(), length: line.len() });
        }
        let name = line[12..16].trim().to_string();
        let res_name = line[17..20].trim().to_string();
        let chain_id = line[21..22].trim().to_string();
        let res_seq = parse_field::<i32>(line, 22..26, "residue number")?;
        let i_code = line[26..27].chars().next().unwrap_or(' ');
        let x = parse_field::<f64>(line, 30..38, "x coordinate")?;
        let y = parse_field::<f64>(line, 38..46, "y coordinate")?;
        let z = parse_field::<f64>(line, 46..54, "z coordinate")?;
        let occupancy = if line.len() >= 60 { line[54..60].trim().parse::<f64>().unwrap_or(1.0) } else { 1.0 };
        let temp_factor = if line.len() >= 66 { line[60..66].trim().parse::<f64>().unwrap_or(0.0) } else { 0.0 };
        let element = if line.len() >= 78 && !line[76..78].trim().is_empty() {
            line[76..78].trim().to_string()
        } else {
            element_symbol(&name).to_string()
        };

        return Ok(Atom {
            name,
            res_name,
            chain_id,
            res_seq,
            i_code,
            element,
            pos: Vec3::new(x, y, z),
            occupancy,
            temp_factor,
            is_hetero_atom: line.starts_with("HETATM"),
        });
    }

    /// Creates an atom from its name and position, with the remaining fields defaulted.
    ///
    /// Used by template construction and tests; the element is derived from the name.
    pub fn new(name: &str, res_name: &str, chain_id: &str, res_seq: i32, pos: Vec3) -> Atom {
        Atom {
            name: name.trim().to_string(),
            res_name: res_name.trim().to_string(),
            chain_id: chain_id.to_string(),
            res_seq,
            i_code: ' ',
            element: element_symbol(name).to_string(),
            pos,
            occupancy: 1.0,
            temp_factor: 0.0,
            is_hetero_atom: false,
        }
    }

    /// Returns true when this atom is named `O2'`, the ribose 2'-hydroxyl oxygen
    pub fn is_o2_prime(&self) -> bool { self.name == "O2'" }
}

/// Returns `true` if two given atoms belong to the very same residue
pub fn same_residue_atoms(ai: &Atom, aj: &Atom) -> bool {
    ai.res_seq == aj.res_seq && ai.i_code == aj.i_code && ai.chain_id == aj.chain_id
}

impl Display for Atom {
    /// Writes this atom back into the fixed-column `ATOM` / `HETATM` format
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tag = if self.is_hetero_atom { "HETATM" } else { "ATOM  " };
        write!(f, "{}{:>5} {} {:>3} {:>1}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}",
               tag, 1, pad_atom_name(&self.name), self.res_name, self.chain_id,
               self.res_seq, self.i_code, self.pos.x, self.pos.y, self.pos.z,
               self.occupancy, self.temp_factor, self.element)
    }
}
