use std::collections::{HashMap, HashSet};
use once_cell::sync::Lazy;

/// Identity of a nucleobase, after resolving modified nucleotides to their parent base.
///
/// # Example
/// ```
/// use nucpair_structure::BaseIdentity;
/// assert_eq!(BaseIdentity::Adenine.one_letter_code(), 'A');
/// assert!(BaseIdentity::Guanine.is_purine());
/// assert!(!BaseIdentity::Pseudouridine.is_purine());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseIdentity {
    Adenine,
    Cytosine,
    Guanine,
    Thymine,
    Uracil,
    Inosine,
    Pseudouridine,
}

impl BaseIdentity {
    /// All base identities, gathered in an array to iterate over them easily
    pub const ALL: [BaseIdentity; 7] = [
        BaseIdentity::Adenine, BaseIdentity::Cytosine, BaseIdentity::Guanine,
        BaseIdentity::Thymine, BaseIdentity::Uracil, BaseIdentity::Inosine,
        BaseIdentity::Pseudouridine,
    ];

    /// One-letter code of this base
    pub fn one_letter_code(&self) -> char {
        match self {
            BaseIdentity::Adenine => 'A',
            BaseIdentity::Cytosine => 'C',
            BaseIdentity::Guanine => 'G',
            BaseIdentity::Thymine => 'T',
            BaseIdentity::Uracil => 'U',
            BaseIdentity::Inosine => 'I',
            BaseIdentity::Pseudouridine => 'P',
        }
    }

    /// Returns true for the fused-ring bases
    pub fn is_purine(&self) -> bool {
        matches!(self, BaseIdentity::Adenine | BaseIdentity::Guanine | BaseIdentity::Inosine)
    }

    /// Name of the nitrogen that attaches the base to its sugar: N9 for purines, N1 otherwise.
    ///
    /// Pseudouridine is the exception: its sugar is carbon-linked through C5, yet N1 is
    /// still reported as the reference nitrogen the dNN criterion uses.
    pub fn glycosidic_nitrogen(&self) -> &'static str {
        if self.is_purine() { "N9" } else { "N1" }
    }

    /// Returns the base identity for a one-letter code
    pub fn from_one_letter_code(code: char) -> Option<BaseIdentity> {
        match code.to_ascii_uppercase() {
            'A' => Some(BaseIdentity::Adenine),
            'C' => Some(BaseIdentity::Cytosine),
            'G' => Some(BaseIdentity::Guanine),
            'T' => Some(BaseIdentity::Thymine),
            'U' => Some(BaseIdentity::Uracil),
            'I' => Some(BaseIdentity::Inosine),
            'P' => Some(BaseIdentity::Pseudouridine),
            _ => None,
        }
    }
}

/// Entry of the nucleotide registry: the parent base and how the residue relates to it
#[derive(Clone, Copy, Debug)]
pub struct NucleotideEntry {
    /// parent base of this residue type
    pub base: BaseIdentity,
    /// true when the residue is a modification of the parent base
    pub is_modified: bool,
}

/// Maps residue names to their parent nucleobases.
///
/// The standard ribo- and deoxyribonucleotides are registered by default, together with
/// the frequently deposited modified nucleotides. Users can add further residue types
/// into a registry of their own; [`KNOWN_NUCLEOTIDES`](KNOWN_NUCLEOTIDES) holds the
/// shared default instance.
///
/// # Example
/// ```
/// use nucpair_structure::{BaseIdentity, NucleotideRegistry, KNOWN_NUCLEOTIDES};
/// assert_eq!(KNOWN_NUCLEOTIDES.base_of("DG"), Some(BaseIdentity::Guanine));
/// assert_eq!(KNOWN_NUCLEOTIDES.base_of("PSU"), Some(BaseIdentity::Pseudouridine));
/// assert!(KNOWN_NUCLEOTIDES.is_modified("7MG"));
/// assert_eq!(KNOWN_NUCLEOTIDES.base_of("HOH"), None);
///
/// let mut registry = NucleotideRegistry::new();
/// registry.register("XGU", BaseIdentity::Guanine, true);
/// assert_eq!(registry.base_of("XGU"), Some(BaseIdentity::Guanine));
/// ```
pub struct NucleotideRegistry {
    entries: HashMap<String, NucleotideEntry>,
}

impl NucleotideRegistry {
    /// Creates a new registry preloaded with the standard and common modified nucleotides
    pub fn new() -> NucleotideRegistry {
        let mut registry = NucleotideRegistry { entries: HashMap::new() };

        let standard: [(&str, BaseIdentity); 14] = [
            ("A", BaseIdentity::Adenine), ("DA", BaseIdentity::Adenine),
            ("C", BaseIdentity::Cytosine), ("DC", BaseIdentity::Cytosine),
            ("G", BaseIdentity::Guanine), ("DG", BaseIdentity::Guanine),
            ("U", BaseIdentity::Uracil), ("DU", BaseIdentity::Uracil),
            ("T", BaseIdentity::Thymine), ("DT", BaseIdentity::Thymine),
            ("I", BaseIdentity::Inosine), ("DI", BaseIdentity::Inosine),
            ("ADE", BaseIdentity::Adenine), ("GUA", BaseIdentity::Guanine),
        ];
        for (name, base) in standard {
            registry.register(name, base, false);
        }

        let modified: [(&str, BaseIdentity); 21] = [
            ("1MA", BaseIdentity::Adenine), ("MIA", BaseIdentity::Adenine),
            ("M2A", BaseIdentity::Adenine), ("MA6", BaseIdentity::Adenine),
            ("2MG", BaseIdentity::Guanine), ("7MG", BaseIdentity::Guanine),
            ("M2G", BaseIdentity::Guanine), ("OMG", BaseIdentity::Guanine),
            ("YG", BaseIdentity::Guanine), ("1MG", BaseIdentity::Guanine),
            ("5MC", BaseIdentity::Cytosine), ("OMC", BaseIdentity::Cytosine),
            ("4AC", BaseIdentity::Cytosine),
            ("PSU", BaseIdentity::Pseudouridine),
            ("H2U", BaseIdentity::Uracil), ("5MU", BaseIdentity::Uracil),
            ("4SU", BaseIdentity::Uracil), ("DHU", BaseIdentity::Uracil),
            ("OMU", BaseIdentity::Uracil), ("UR3", BaseIdentity::Uracil),
            ("5HT", BaseIdentity::Thymine),
        ];
        for (name, base) in modified {
            registry.register(name, base, true);
        }

        return registry;
    }

    /// Registers a residue name in this registry.
    ///
    /// An already registered name is left untouched and `false` is returned.
    pub fn register(&mut self, residue_name: &str, base: BaseIdentity, is_modified: bool) -> bool {
        let key = residue_name.trim().to_ascii_uppercase();
        if self.entries.contains_key(&key) { return false; }
        self.entries.insert(key, NucleotideEntry { base, is_modified });
        return true;
    }

    /// Looks up the full registry entry for a residue name
    pub fn entry(&self, residue_name: &str) -> Option<NucleotideEntry> {
        self.entries.get(&residue_name.trim().to_ascii_uppercase()).copied()
    }

    /// Returns the parent base of a residue name, or `None` when it is not a known nucleotide
    pub fn base_of(&self, residue_name: &str) -> Option<BaseIdentity> {
        self.entry(residue_name).map(|e| e.base)
    }

    /// Returns true when the residue name denotes a modified nucleotide
    pub fn is_modified(&self, residue_name: &str) -> bool {
        self.entry(residue_name).map(|e| e.is_modified).unwrap_or(false)
    }

    /// Counts the residue names registered in this registry
    pub fn count(&self) -> usize { self.entries.len() }
}

/// The shared, read-only default nucleotide registry
pub static KNOWN_NUCLEOTIDES: Lazy<NucleotideRegistry> = Lazy::new(NucleotideRegistry::new);

/// water residue names
pub(crate) static WATER_NAMES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["HOH", "WAT", "DOD", "H2O", "OH2"]));

/// monoatomic ion residue names
pub(crate) static ION_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "MG", "CA", "NA", "K", "CL", "ZN", "FE", "MN", "CO", "NI", "CU",
    "CD", "HG", "PB", "SR", "BA", "LI", "RB", "CS", "BR", "I", "F",
    "MG2", "CA2", "ZN2", "FE2", "FE3", "MN2", "CO2", "NI2", "CU2", "CU1",
]));

/// the twenty standard amino acids plus frequent modifications
pub(crate) static AMINO_ACID_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "MSE", "SEP", "TPO", "PTR", "CSO", "OCS", "CME", "CSD", "CSX", "MLY",
]));
