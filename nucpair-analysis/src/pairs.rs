use nucpair_geometry::Vec3;
use nucpair_structure::{LegacyIndex, ReferenceFrame};

use crate::stepwise::base_pair_frame;

/// A selected base pair: two nucleotide residues and snapshots of their frames.
///
/// The residue indices are normalized so the smaller legacy index comes first;
/// [`finding_order_swapped`](BasePair::finding_order_swapped) records whether the pair
/// was found in the opposite order. A pair is never mutated after construction.
#[derive(Clone, Debug)]
pub struct BasePair {
    idx1: LegacyIndex,
    idx2: LegacyIndex,
    finding_order_swapped: bool,
    frame1: ReferenceFrame,
    frame2: ReferenceFrame,
    pair_type: i32,
    quality: f64,
}

impl BasePair {
    /// Creates a base pair from the residues in finding order; the stored order is
    /// normalized to ascending legacy index
    pub fn new(found_first: LegacyIndex, found_second: LegacyIndex,
               frame_first: ReferenceFrame, frame_second: ReferenceFrame,
               pair_type: i32, quality: f64) -> BasePair {
        if found_first <= found_second {
            BasePair { idx1: found_first, idx2: found_second, finding_order_swapped: false,
                       frame1: frame_first, frame2: frame_second, pair_type, quality }
        } else {
            BasePair { idx1: found_second, idx2: found_first, finding_order_swapped: true,
                       frame1: frame_second, frame2: frame_first, pair_type, quality }
        }
    }

    /// Legacy index of the first (smaller-index) residue
    pub fn idx1(&self) -> LegacyIndex { self.idx1 }

    /// Legacy index of the second residue
    pub fn idx2(&self) -> LegacyIndex { self.idx2 }

    /// True when the pair was found as (larger, smaller) before normalization
    pub fn finding_order_swapped(&self) -> bool { self.finding_order_swapped }

    /// Frame snapshot of the first residue
    pub fn frame1(&self) -> &ReferenceFrame { &self.frame1 }

    /// Frame snapshot of the second residue
    pub fn frame2(&self) -> &ReferenceFrame { &self.frame2 }

    /// Categorical pair type: 2 Watson-Crick, 1 wobble, 0 other, -1 out of range
    pub fn pair_type(&self) -> i32 { self.pair_type }

    /// Adjusted quality score this pair was selected with; lower is better
    pub fn quality(&self) -> f64 { self.quality }

    /// Mean of the two frame origins
    pub fn origin(&self) -> Vec3 {
        Vec3::midpoint(self.frame1.origin(), self.frame2.origin())
    }

    /// Direction-corrected mean of the two base normals.
    ///
    /// Anti-parallel pairs have opposing z-axes; the difference vector is taken then,
    /// so the result always represents the common stacking direction.
    pub fn mean_z_axis(&self) -> Vec3 {
        let z1 = self.frame1.z_axis();
        let z2 = self.frame2.z_axis();
        let mut zave = if Vec3::dot(&z1, &z2) < 0.0 { &z2 - &z1 } else { &z2 + &z1 };
        zave.normalize();
        return zave;
    }

    /// Legacy indices of the strand-1 and strand-2 residues.
    ///
    /// The original finding order is restored first, then the five-to-three swap flag
    /// is applied on top; the two reorderings cancel when both are set.
    pub fn strand_residues(&self, swapped: bool) -> (LegacyIndex, LegacyIndex) {
        if self.finding_order_swapped != swapped {
            (self.idx2, self.idx1)
        } else {
            (self.idx1, self.idx2)
        }
    }

    /// Frame of the residue currently assigned to strand 1
    pub fn strand1_frame(&self, swapped: bool) -> &ReferenceFrame {
        if self.finding_order_swapped != swapped { &self.frame2 } else { &self.frame1 }
    }

    /// Frame of the residue currently assigned to strand 2
    pub fn strand2_frame(&self, swapped: bool) -> &ReferenceFrame {
        if self.finding_order_swapped != swapped { &self.frame1 } else { &self.frame2 }
    }

    /// The base-pair reference frame: mid-frame of the two base frames, with the
    /// strand-2 frame y/z-corrected when anti-parallel
    pub fn pair_frame(&self, swapped: bool) -> ReferenceFrame {
        base_pair_frame(self.strand1_frame(swapped), self.strand2_frame(swapped))
    }
}

/// A contiguous run of base pairs within the reordered pair list.
///
/// The index range is half-open: `[start, end)` into the pair order produced by the
/// helix organizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HelixSegment {
    /// first pair position of this helix
    pub start: usize,
    /// one past the last pair position of this helix
    pub end: usize,
    /// true when the helix closes onto itself
    pub is_circular: bool,
    /// true when two adjacent pairs lack any backbone linkage
    pub has_break: bool,
    /// true when the mean twist along the helix is negative
    pub is_z_form: bool,
}

impl HelixSegment {
    /// Number of base pairs in this helix
    pub fn len(&self) -> usize { self.end - self.start }

    /// True for a segment holding no pairs
    pub fn is_empty(&self) -> bool { self.end == self.start }
}
