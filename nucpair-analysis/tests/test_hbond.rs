mod common;

#[cfg(test)]
mod test_hbond {
    use nucpair_analysis::hbond::{HBondClassification, HBondContext, HBondFinder, SlotOptimizer};
    use nucpair_analysis::AnalysisConfig;
    use nucpair_geometry::{Matrix3, Vec3};
    use nucpair_structure::{BaseIdentity, LegacyIndex, Residue, ReferenceFrame};

    use crate::common::{load_templates, place_base, strand2_frame};

    /// an ideal Watson-Crick pair of the two bases, as (residue1, residue2)
    fn wc_pair(base1: BaseIdentity, name1: &str, base2: BaseIdentity, name2: &str) -> (Residue, Residue) {
        let templates = load_templates();
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let res1 = Residue::new(place_base(&templates, base1, false, &frame, name1, "A", 1));
        let res2 = Residue::new(place_base(&templates, base2, false, &strand2_frame(&frame), name2, "B", 1));
        return (res1, res2);
    }

    #[test]
    fn gc_pair_has_three_standard_bonds() {
        let (g, c) = wc_pair(BaseIdentity::Guanine, "DG", BaseIdentity::Cytosine, "DC");
        let config = AnalysisConfig::default();
        let finder = HBondFinder::new(&config);
        let result = finder.find_detailed(LegacyIndex::new(1), &g, LegacyIndex::new(2), &c);

        let standard: Vec<_> = result.final_bonds.iter()
            .filter(|b| b.classification == HBondClassification::Standard)
            .collect();
        assert_eq!(standard.len(), 3, "G-C must form three standard bonds");
        assert_eq!(result.num_good, 3);

        let mut bonded: Vec<(String, String)> = standard.iter()
            .map(|b| (b.donor_atom.clone(), b.acceptor_atom.clone()))
            .collect();
        bonded.sort();
        assert_eq!(bonded, vec![
            (String::from("N1"), String::from("N3")),
            (String::from("N2"), String::from("O2")),
            (String::from("N4"), String::from("O6")),
        ]);
        // every G-C bond sits on the Watson edge of both bases except the
        // N2-O2 pair, which uses the sugar edges
        for bond in &standard {
            assert_eq!(bond.context, HBondContext::BaseBase);
        }
    }

    #[test]
    fn at_pair_has_two_standard_bonds() {
        let (a, t) = wc_pair(BaseIdentity::Adenine, "DA", BaseIdentity::Thymine, "DT");
        let config = AnalysisConfig::default();
        let finder = HBondFinder::new(&config);
        let result = finder.find_detailed(LegacyIndex::new(1), &a, LegacyIndex::new(2), &t);
        assert_eq!(result.num_good, 2);

        // orientation: N6 of adenine donates to O4, N3 of thymine donates to N1
        let n6 = result.final_bonds.iter().find(|b| b.donor_atom == "N6").unwrap();
        assert_eq!(n6.acceptor_atom, "O4");
        assert_eq!(n6.donor_residue, LegacyIndex::new(1));
        let n3 = result.final_bonds.iter().find(|b| b.donor_atom == "N3").unwrap();
        assert_eq!(n3.acceptor_atom, "N1");
        assert_eq!(n3.donor_residue, LegacyIndex::new(2));
    }

    #[test]
    fn enumeration_is_order_independent() {
        let (g, c) = wc_pair(BaseIdentity::Guanine, "G", BaseIdentity::Cytosine, "C");
        let config = AnalysisConfig::default();
        let finder = HBondFinder::new(&config);

        let fwd = finder.find_detailed(LegacyIndex::new(1), &g, LegacyIndex::new(2), &c);
        let rev = finder.find_detailed(LegacyIndex::new(2), &c, LegacyIndex::new(1), &g);

        let as_set = |bonds: &[nucpair_analysis::hbond::HydrogenBond]| -> Vec<(String, String, i64)> {
            let mut set: Vec<_> = bonds.iter().map(|b| {
                let mut atoms = [b.donor_atom.clone(), b.acceptor_atom.clone()];
                atoms.sort();
                (atoms[0].clone(), atoms[1].clone(), (b.distance * 1e6).round() as i64)
            }).collect();
            set.sort();
            set
        };
        assert_eq!(as_set(&fwd.initial), as_set(&rev.initial));
        assert_eq!(as_set(&fwd.final_bonds), as_set(&rev.final_bonds));
        assert_eq!(fwd.num_good, rev.num_good);
    }

    #[test]
    fn no_surviving_bonds_share_an_atom() {
        let (g, c) = wc_pair(BaseIdentity::Guanine, "G", BaseIdentity::Cytosine, "C");
        let config = AnalysisConfig::default();
        let finder = HBondFinder::new(&config);
        let result = finder.find_detailed(LegacyIndex::new(1), &g, LegacyIndex::new(2), &c);

        let survivors: Vec<_> = result.after_conflict.iter()
            .filter(|b| b.conflict.survives())
            .collect();
        for (i, a) in survivors.iter().enumerate() {
            for b in survivors.iter().skip(i + 1) {
                assert!(a.donor_atom != b.donor_atom,
                        "two surviving bonds share donor {}", a.donor_atom);
                assert!(a.acceptor_atom != b.acceptor_atom,
                        "two surviving bonds share acceptor {}", a.acceptor_atom);
            }
        }
    }

    #[test]
    fn counting_variant_splits_base_and_sugar_contacts() {
        let (g, c) = wc_pair(BaseIdentity::Guanine, "G", BaseIdentity::Cytosine, "C");
        let config = AnalysisConfig::default();
        let finder = HBondFinder::new(&config);
        let (n_base, n_o2) = finder.count_simple(&g, &c);
        assert!(n_base >= 3, "the three WC contacts must be counted, got {}", n_base);
        // templates carry no O2' atoms
        assert_eq!(n_o2, 0);
        // symmetric under swapping the residues
        let (n_base_rev, n_o2_rev) = finder.count_simple(&c, &g);
        assert_eq!(n_base, n_base_rev);
        assert_eq!(n_o2, n_o2_rev);
    }

    #[test]
    fn quality_scores_grade_the_wc_bonds() {
        let (g, c) = wc_pair(BaseIdentity::Guanine, "G", BaseIdentity::Cytosine, "C");
        let config = AnalysisConfig::default();
        let finder = HBondFinder::new(&config);
        let result = finder.find_detailed(LegacyIndex::new(1), &g, LegacyIndex::new(2), &c);
        for bond in &result.final_bonds {
            if bond.classification != HBondClassification::Standard { continue; }
            let quality = bond.quality.as_ref().expect("surviving bonds are scored");
            assert!(quality.failure.is_none());
            assert!(quality.total > 30.0, "WC bond scored {}", quality.total);
        }
    }

    #[test]
    fn slot_optimizer_respects_capacities() {
        let (g, c) = wc_pair(BaseIdentity::Guanine, "G", BaseIdentity::Cytosine, "C");
        let config = AnalysisConfig::default();
        let finder = HBondFinder::new(&config);
        let idx1 = LegacyIndex::new(1);
        let idx2 = LegacyIndex::new(2);
        let candidates = finder.find_detailed(idx1, &g, idx2, &c).initial;

        let selected = SlotOptimizer::optimize(&candidates, (idx1, &g), (idx2, &c));
        assert!(!selected.is_empty());
        // no donor atom may exceed its hydrogen count
        for bond in &selected {
            let at_donor = selected.iter().filter(|b| b.donor_atom == bond.donor_atom).count();
            assert!(at_donor <= 2, "donor {} used {} times", bond.donor_atom, at_donor);
        }
    }

    #[test]
    fn distant_residues_have_no_bonds() {
        let templates = load_templates();
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let f2 = ReferenceFrame::new(Matrix3::identity(), Vec3::new(50.0, 0.0, 0.0));
        let res1 = Residue::new(place_base(&templates, BaseIdentity::Adenine, false, &f1, "A", "A", 1));
        let res2 = Residue::new(place_base(&templates, BaseIdentity::Uracil, false, &f2, "U", "A", 2));
        let config = AnalysisConfig::default();
        let finder = HBondFinder::new(&config);
        let result = finder.find_detailed(LegacyIndex::new(1), &res1, LegacyIndex::new(2), &res2);
        assert!(result.initial.is_empty());
        assert_eq!(result.num_good, 0);
    }
}
