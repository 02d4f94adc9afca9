use std::collections::BTreeMap;

use nucpair_geometry::Vec3;
use nucpair_structure::{LegacyIndex, Structure};

/// The backbone data the strand-direction checks need for one residue
#[derive(Clone, Debug, Default)]
pub struct BackboneAtoms {
    /// position of the phosphorus atom, when present
    pub p: Option<Vec3>,
    /// position of the O3' atom, when present
    pub o3_prime: Option<Vec3>,
    /// chain the residue belongs to
    pub chain_id: String,
}

/// Backbone data per legacy residue index
pub type BackboneMap = BTreeMap<LegacyIndex, BackboneAtoms>;

/// Collects P and O3' positions plus the chain identifier of every residue
pub fn backbone_map(structure: &Structure) -> BackboneMap {
    let mut map = BackboneMap::new();
    for (idx, res) in structure.residues_in_legacy_order() {
        map.insert(idx, BackboneAtoms {
            p: res.atom_position("P"),
            o3_prime: res.atom_position("O3'"),
            chain_id: res.chain_id.clone(),
        });
    }
    return map;
}

/// Direction of a backbone linkage between two residues
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkDirection {
    /// O3' of the first residue bonds the P of the second: 5'→3'
    Forward,
    /// O3' of the second residue bonds the P of the first
    Reverse,
    /// no covalent linkage either way
    None,
}

/// Answers O3'-P linkage queries over a backbone map
pub struct BackboneLinkageChecker<'a> {
    map: &'a BackboneMap,
    o3p_cutoff: f64,
}

impl<'a> BackboneLinkageChecker<'a> {
    /// Creates a checker with the given O3'-P distance cutoff
    pub fn new(map: &'a BackboneMap, o3p_cutoff: f64) -> BackboneLinkageChecker<'a> {
        BackboneLinkageChecker { map, o3p_cutoff }
    }

    /// True when the underlying map carries at least one backbone atom
    pub fn has_backbone(&self) -> bool {
        self.map.values().any(|a| a.p.is_some() || a.o3_prime.is_some())
    }

    /// Chain identifier of a residue, when the map knows it
    pub fn chain_of(&self, idx: LegacyIndex) -> Option<&str> {
        self.map.get(&idx).map(|a| a.chain_id.as_str())
    }

    /// Checks the linkage direction between two residues
    pub fn check_linkage(&self, res_i: LegacyIndex, res_j: LegacyIndex) -> LinkDirection {
        let (Some(atoms_i), Some(atoms_j)) = (self.map.get(&res_i), self.map.get(&res_j)) else {
            return LinkDirection::None;
        };

        if let (Some(o3), Some(p)) = (atoms_i.o3_prime, atoms_j.p) {
            if o3.distance_to(&p) <= self.o3p_cutoff { return LinkDirection::Forward; }
        }
        if let (Some(o3), Some(p)) = (atoms_j.o3_prime, atoms_i.p) {
            if o3.distance_to(&p) <= self.o3p_cutoff { return LinkDirection::Reverse; }
        }
        return LinkDirection::None;
    }

    /// O3'-O3' distance between two residues, when both atoms exist
    pub fn o3_distance(&self, res_i: LegacyIndex, res_j: LegacyIndex) -> Option<f64> {
        let o3_i = self.map.get(&res_i)?.o3_prime?;
        let o3_j = self.map.get(&res_j)?.o3_prime?;
        return Some(o3_i.distance_to(&o3_j));
    }

    /// True when any strand of the two pairs is backbone-linked, in either direction.
    ///
    /// A map without backbone atoms answers true: no break can be diagnosed then.
    pub fn residues_connected(&self, pair1: (LegacyIndex, LegacyIndex),
                              pair2: (LegacyIndex, LegacyIndex)) -> bool {
        if !self.has_backbone() { return true; }
        let (i1, j1) = pair1;
        let (i2, j2) = pair2;
        return self.check_linkage(i1, i2) != LinkDirection::None
            || self.check_linkage(j1, j2) != LinkDirection::None
            || self.check_linkage(i1, j2) != LinkDirection::None
            || self.check_linkage(j1, i2) != LinkDirection::None;
    }
}
