use std::fmt;
use std::fmt::{Display, Formatter};

/// Stable, 1-based residue index assigned in coordinate-file order.
///
/// The index runs over all residues of a structure, including chain transitions,
/// and is the only identifier used for cross-referencing between analysis stages
/// and diagnostic records. It is an opaque newtype: arithmetic stays inside this
/// module and [`Structure`](crate::Structure), which owns the index → residue map.
///
/// # Example
/// ```
/// use nucpair_structure::LegacyIndex;
/// let idx = LegacyIndex::new(5);
/// assert_eq!(idx.one_based(), 5);
/// assert_eq!(format!("{}", idx), "5");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegacyIndex(usize);

impl LegacyIndex {
    /// Wraps a 1-based index value.
    ///
    /// # Panics
    /// Panics when `one_based` is zero; legacy indexing starts at 1.
    pub fn new(one_based: usize) -> LegacyIndex {
        assert!(one_based > 0, "legacy residue indices are 1-based");
        LegacyIndex(one_based)
    }

    /// Returns the raw 1-based value, e.g. for diagnostic records
    pub fn one_based(&self) -> usize { self.0 }

    /// Returns the 0-based position in a legacy-ordered array
    pub(crate) fn zero_based(&self) -> usize { self.0 - 1 }

    /// Iterates over all indices from 1 to `count`, in ascending order
    pub fn up_to(count: usize) -> impl Iterator<Item = LegacyIndex> {
        (1..=count).map(LegacyIndex)
    }
}

impl Display for LegacyIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}
