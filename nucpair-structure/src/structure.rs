use crate::{Atom, Chain, LegacyIndex, Residue};
use crate::atom::same_residue_atoms;

/// A biomacromolecular structure composed of chains, residues and atoms.
///
/// A [`Structure`](Structure) exclusively owns its [`Chain`](Chain)s, which exclusively own
/// their [`Residue`](Residue)s. Residues are additionally addressable through their stable,
/// 1-based [`LegacyIndex`](LegacyIndex), assigned in the order residues appear in the
/// coordinate file, across chain transitions. That index is the only identifier used for
/// cross-referencing between analysis stages.
///
/// # Creating a [`Structure`](Structure)
/// ```
/// use nucpair_structure::{Atom, LegacyIndex, Structure};
/// let pdb_lines = ["ATOM      1  N9    A A   1      -1.291   4.498   0.000  1.00  0.00           N",
///                  "ATOM      2  N1    U A   2      -1.284   4.500   0.000  1.00  0.00           N",
///                  "ATOM      3  N1    U B   1      -1.284   4.500   0.000  1.00  0.00           N"];
/// let atoms: Vec<Atom> = pdb_lines.iter().map(|l| Atom::from_atom_line(l).unwrap()).collect();
/// let strctr = Structure::from_atoms("1xyz", atoms);
/// assert_eq!(strctr.count_residues(), 3);
/// assert_eq!(strctr.count_chains(), 2);
/// let res = strctr.residue(LegacyIndex::new(3)).unwrap();
/// assert_eq!(res.chain_id, "B");
/// ```
#[derive(Clone, Debug)]
pub struct Structure {
    /// top-level identifier of this structure, e.g. a PDB code
    pub id: String,
    chains: Vec<Chain>,
    /// legacy index (0-based position) → (chain position, residue position)
    legacy_map: Vec<(usize, usize)>,
}

impl Structure {
    /// Creates a new structure without any chains
    pub fn new(id: &str) -> Structure {
        Structure { id: id.to_string(), chains: vec![], legacy_map: vec![] }
    }

    /// Creates a structure by grouping a flat list of atoms into residues and chains.
    ///
    /// Residue boundaries are detected from the (chain, residue number, insertion code)
    /// identity of consecutive atoms; legacy indices are assigned in input order.
    pub fn from_atoms(id: &str, atoms: Vec<Atom>) -> Structure {
        let mut strctr = Structure::new(id);
        let mut residue_atoms: Vec<Atom> = vec![];
        for atom in atoms {
            if let Some(last) = residue_atoms.last() {
                if !same_residue_atoms(last, &atom) {
                    let done: Vec<Atom> = std::mem::take(&mut residue_atoms);
                    strctr.push_residue(Residue::new(done));
                }
            }
            residue_atoms.push(atom);
        }
        if !residue_atoms.is_empty() {
            strctr.push_residue(Residue::new(residue_atoms));
        }
        return strctr;
    }

    /// Appends a residue, opening a new chain when the chain identifier changes.
    ///
    /// The residue receives the next legacy index.
    pub fn push_residue(&mut self, residue: Residue) {
        let need_new_chain = match self.chains.last() {
            Some(chain) => chain.chain_id != residue.chain_id,
            None => true,
        };
        if need_new_chain {
            self.chains.push(Chain::new(&residue.chain_id));
        }
        let chain_pos = self.chains.len() - 1;
        let chain = &mut self.chains[chain_pos];
        chain.push_residue(residue);
        self.legacy_map.push((chain_pos, chain.count_residues() - 1));
    }

    /// Provides immutable access to the chains of this structure
    pub fn chains(&self) -> &[Chain] { &self.chains }

    /// Counts the chains of this structure
    pub fn count_chains(&self) -> usize { self.chains.len() }

    /// Counts all residues of this structure
    pub fn count_residues(&self) -> usize { self.legacy_map.len() }

    /// Returns the residue assigned to a given legacy index
    pub fn residue(&self, index: LegacyIndex) -> Option<&Residue> {
        let (chain_pos, res_pos) = *self.legacy_map.get(index.zero_based())?;
        return Some(&self.chains[chain_pos].residues()[res_pos]);
    }

    /// Provides mutable access to the residue assigned to a given legacy index.
    ///
    /// Used by the frame fitter for the one-time frame write-back.
    pub fn residue_mut(&mut self, index: LegacyIndex) -> Option<&mut Residue> {
        let (chain_pos, res_pos) = *self.legacy_map.get(index.zero_based())?;
        return Some(&mut self.chains[chain_pos].residues_mut()[res_pos]);
    }

    /// Iterates over (legacy index, residue) in ascending legacy order
    pub fn residues_in_legacy_order(&self) -> impl Iterator<Item = (LegacyIndex, &Residue)> {
        LegacyIndex::up_to(self.count_residues())
            .map(move |idx| {
                let (chain_pos, res_pos) = self.legacy_map[idx.zero_based()];
                (idx, &self.chains[chain_pos].residues()[res_pos])
            })
    }

    /// Detects an RNA structure by scanning for any O2' atom
    ///
    /// # Example
    /// ```
    /// use nucpair_structure::{Atom, Structure};
    /// use nucpair_geometry::Vec3;
    /// use nucpair_structure::Residue;
    /// let mut strctr = Structure::new("rna");
    /// strctr.push_residue(Residue::new(vec![Atom::new("O2'", "G", "A", 1, Vec3::from_float(0.0))]));
    /// assert!(strctr.is_rna());
    /// ```
    pub fn is_rna(&self) -> bool {
        self.chains.iter()
            .flat_map(|c| c.residues())
            .flat_map(|r| r.atoms())
            .any(|a| a.is_o2_prime())
    }

    /// Counts all atoms of this structure
    pub fn count_atoms(&self) -> usize {
        self.chains.iter().flat_map(|c| c.residues()).map(|r| r.atoms().len()).sum()
    }
}
