//! Data model for nucleic-acid structure analysis.
//!
//! The crate holds the [`Structure`](Structure) → [`Chain`](Chain) → [`Residue`](Residue) →
//! [`Atom`](Atom) ownership hierarchy together with atom and residue classification,
//! the modified-nucleotide registry, base reference frames and the standard base
//! template library.
//!
//! # Building a structure
//! A [`Structure`](Structure) is assembled from a flat list of atoms; residue and chain
//! boundaries are detected from the atom identities and every residue receives a stable,
//! 1-based [`LegacyIndex`](LegacyIndex) in file order:
//! ```
//! use nucpair_structure::{Atom, Structure};
//! let lines = ["ATOM      1  N1    G A   1       0.212   4.566   0.000  1.00  0.00           N",
//!              "ATOM      2  C2    G A   1      -1.999   1.087   0.000  1.00  0.00           C",
//!              "ATOM      3  N1    C B   1       1.235   4.557   0.000  1.00  0.00           N"];
//! let atoms: Vec<Atom> = lines.iter().map(|l| Atom::from_atom_line(l).unwrap()).collect();
//! let strctr = Structure::from_atoms("demo", atoms);
//! assert_eq!(strctr.count_chains(), 2);
//! assert_eq!(strctr.count_residues(), 2);
//! ```
//!
//! # Classifying atoms and residues
//! Classification is derived from names alone, so it is available as soon as a structure
//! is built; see the [`typing`](typing) module and the [`KNOWN_NUCLEOTIDES`](KNOWN_NUCLEOTIDES)
//! registry.

mod atom;
mod residue;
mod chain;
mod structure;
mod legacy_index;
mod reference_frame;
mod nucleotides;
mod templates;
mod errors;

pub mod typing;

pub use atom::{same_residue_atoms, Atom};
pub use residue::{Residue, ResidueKind, NucleotideInfo};
pub use chain::Chain;
pub use structure::Structure;
pub use legacy_index::LegacyIndex;
pub use reference_frame::ReferenceFrame;
pub use nucleotides::{BaseIdentity, NucleotideRegistry, KNOWN_NUCLEOTIDES};
pub use templates::{BaseTemplate, TemplateLibrary};
pub use errors::StructureError;
