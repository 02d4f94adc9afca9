mod common;

#[cfg(test)]
mod test_helix {
    use nucpair_analysis::helix::{BackboneAtoms, BackboneLinkageChecker, BackboneMap,
                                  HelixOrganizer, LinkDirection};
    use nucpair_analysis::{AnalysisConfig, BasePair};
    use nucpair_geometry::{Matrix3, Vec3};
    use nucpair_structure::{LegacyIndex, ReferenceFrame};

    use crate::common::{advance_frame, StepSpec};

    fn entry(chain: &str, p: Option<Vec3>, o3: Option<Vec3>) -> BackboneAtoms {
        BackboneAtoms { p, o3_prime: o3, chain_id: chain.to_string() }
    }

    #[test]
    fn linkage_directions() {
        let mut map = BackboneMap::new();
        map.insert(LegacyIndex::new(1), entry("A", Some(Vec3::new(-5.0, 0.0, 0.0)), Some(Vec3::new(0.0, 0.0, 0.0))));
        map.insert(LegacyIndex::new(2), entry("A", Some(Vec3::new(0.0, 0.0, 1.5)), Some(Vec3::new(4.0, 0.0, 0.0))));
        map.insert(LegacyIndex::new(3), entry("A", Some(Vec3::new(20.0, 0.0, 0.0)), Some(Vec3::new(24.0, 0.0, 0.0))));
        let checker = BackboneLinkageChecker::new(&map, 2.5);

        assert_eq!(checker.check_linkage(LegacyIndex::new(1), LegacyIndex::new(2)), LinkDirection::Forward);
        assert_eq!(checker.check_linkage(LegacyIndex::new(2), LegacyIndex::new(1)), LinkDirection::Reverse);
        assert_eq!(checker.check_linkage(LegacyIndex::new(2), LegacyIndex::new(3)), LinkDirection::None);
        assert_eq!(checker.o3_distance(LegacyIndex::new(1), LegacyIndex::new(2)), Some(4.0));
        assert_eq!(checker.chain_of(LegacyIndex::new(1)), Some("A"));
    }

    /// four stacked pairs with residues (1,8), (2,7), (3,6), (4,5)
    fn stacked_pairs(twist_deg: f64) -> Vec<BasePair> {
        let step = StepSpec { twist_deg, roll_deg: 0.0, shift: 0.0, slide: 0.0, rise: 3.4 };
        let mut frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let mut pairs = vec![];
        for i in 0..4usize {
            let frame2 = frame.with_flipped_yz();
            pairs.push(BasePair::new(LegacyIndex::new(i + 1), LegacyIndex::new(8 - i),
                                     frame, frame2, 2, -5.0));
            frame = advance_frame(&frame, &step);
        }
        return pairs;
    }

    #[test]
    fn missing_linkage_flags_a_break() {
        let pairs = stacked_pairs(36.0);

        // strand 1 chains 1→2→3→4 with the 2→3 linkage missing;
        // strand 2 chains 5→6→7→8 with the 6→7 linkage missing
        let mut map = BackboneMap::new();
        let link = |x: f64| (Some(Vec3::new(x, 0.0, 1.0)), Some(Vec3::new(x, 0.0, 0.0)));
        let (p1, o1) = link(0.0);
        map.insert(LegacyIndex::new(1), entry("A", p1, o1));
        map.insert(LegacyIndex::new(2), entry("A", Some(Vec3::new(0.0, 0.0, 1.0)), Some(Vec3::new(10.0, 0.0, 0.0))));
        map.insert(LegacyIndex::new(3), entry("A", Some(Vec3::new(20.0, 0.0, 0.0)), Some(Vec3::new(30.0, 0.0, 0.0))));
        map.insert(LegacyIndex::new(4), entry("A", Some(Vec3::new(30.0, 0.0, 1.0)), None));
        map.insert(LegacyIndex::new(5), entry("B", Some(Vec3::new(50.0, 0.0, 1.0)), Some(Vec3::new(50.0, 0.0, 0.0))));
        map.insert(LegacyIndex::new(6), entry("B", Some(Vec3::new(50.0, 0.0, 1.0)), Some(Vec3::new(60.0, 0.0, 0.0))));
        map.insert(LegacyIndex::new(7), entry("B", Some(Vec3::new(70.0, 0.0, 0.0)), Some(Vec3::new(80.0, 0.0, 0.0))));
        map.insert(LegacyIndex::new(8), entry("B", Some(Vec3::new(80.0, 0.0, 1.0)), None));

        let config = AnalysisConfig::default();
        let organizer = HelixOrganizer::new(&config, &map);
        let ordering = organizer.organize(&pairs);

        assert_eq!(ordering.helices.len(), 1);
        assert!(ordering.helices[0].has_break);
    }

    #[test]
    fn two_separated_stacks_give_two_helices() {
        let mut pairs = stacked_pairs(36.0);
        // move the last two pairs far away: two stacks of two
        let offset = Vec3::new(100.0, 0.0, 0.0);
        for pair in pairs.iter_mut().skip(2) {
            let f1 = *pair.frame1();
            let f2 = *pair.frame2();
            let mut o1 = *f1.origin();
            o1 += &offset;
            let mut o2 = *f2.origin();
            o2 += &offset;
            *pair = BasePair::new(pair.idx1(), pair.idx2(),
                                  ReferenceFrame::new(*f1.rotation(), o1),
                                  ReferenceFrame::new(*f2.rotation(), o2),
                                  pair.pair_type(), pair.quality());
        }

        let map = BackboneMap::new();
        let config = AnalysisConfig::default();
        let ordering = HelixOrganizer::new(&config, &map).organize(&pairs);
        assert_eq!(ordering.helices.len(), 2);
        assert_eq!(ordering.helices[0].len(), 2);
        assert_eq!(ordering.helices[1].len(), 2);
        assert!(!ordering.helices[0].is_circular);
    }

    #[test]
    fn negative_twist_marks_z_form() {
        let pairs = stacked_pairs(-30.0);
        let map = BackboneMap::new();
        let config = AnalysisConfig::default();
        let ordering = HelixOrganizer::new(&config, &map).organize(&pairs);
        assert_eq!(ordering.helices.len(), 1);
        assert!(ordering.helices[0].is_z_form);

        let b_form = HelixOrganizer::new(&config, &map).organize(&stacked_pairs(36.0));
        assert!(!b_form.helices[0].is_z_form);
    }

    #[test]
    fn straight_duplex_keeps_strand_order() {
        let pairs = stacked_pairs(36.0);
        let map = BackboneMap::new();
        let config = AnalysisConfig::default();
        let ordering = HelixOrganizer::new(&config, &map).organize(&pairs);
        assert_eq!(ordering.pair_order, vec![0, 1, 2, 3]);
        assert!(ordering.strand_swapped.iter().all(|s| !s),
                "an already canonical duplex needs no swaps");
    }
}
