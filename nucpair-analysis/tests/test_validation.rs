mod common;

#[cfg(test)]
mod test_validation {
    use nucpair_analysis::validate::PairValidator;
    use nucpair_analysis::pair_type::{adjusted_quality, pair_type_id};
    use nucpair_analysis::{AnalysisConfig, FrameFitter};
    use nucpair_geometry::assert_delta;
    use nucpair_structure::{BaseIdentity, LegacyIndex, Residue, ReferenceFrame};
    use nucpair_geometry::{Matrix3, Vec3};

    use crate::common::{advance_frame, load_templates, place_base, strand2_frame, StepSpec};

    /// residues of an ideal pair at `frame`, with frames fitted and stored
    fn fitted_pair(base1: BaseIdentity, base2: BaseIdentity, frame: &ReferenceFrame) -> (Residue, Residue) {
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let fitter = FrameFitter::new(&templates, false, &config);
        let name1 = format!("D{}", base1.one_letter_code());
        let name2 = format!("D{}", base2.one_letter_code());
        let mut res1 = Residue::new(place_base(&templates, base1, false, frame, &name1, "A", 1));
        let mut res2 = Residue::new(place_base(&templates, base2, false, &strand2_frame(frame), &name2, "B", 1));
        let fit1 = fitter.fit_residue(&res1);
        let fit2 = fitter.fit_residue(&res2);
        res1.set_frame(fit1.frame.expect("fixture bases must fit"));
        res2.set_frame(fit2.frame.expect("fixture bases must fit"));
        return (res1, res2);
    }

    #[test]
    fn ideal_wc_pair_passes_all_gates() {
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let (g, c) = fitted_pair(BaseIdentity::Guanine, BaseIdentity::Cytosine, &frame);
        let config = AnalysisConfig::default();
        let validator = PairValidator::new(&config);
        let result = validator.validate(LegacyIndex::new(1), &g, LegacyIndex::new(2), &c);

        assert!(result.is_valid);
        assert_delta!(result.dorg, 0.0, 1e-6);
        assert_delta!(result.d_v, 0.0, 1e-6);
        assert_delta!(result.plane_angle, 0.0, 1e-6);
        assert!(result.dnn > 8.0 && result.dnn < 10.0, "dnn = {}", result.dnn);
        assert_delta!(result.overlap_area, 0.0, 1e-6);
        assert!(result.n_base_hbonds >= 3);
        // anti-parallel frames: x-axes agree, y and z axes oppose
        assert!(result.dir_x > 0.99);
        assert!(result.dir_y < -0.99);
        assert!(result.dir_z < -0.99);
        assert_delta!(result.quality, 0.0, 1e-6);
        assert_eq!(result.hbonds.len(), 3);
    }

    #[test]
    fn validation_is_symmetric() {
        let frame = ReferenceFrame::new(
            Matrix3::rotation_about_axis(&Vec3::new(0.2, 0.9, 0.1), 0.7),
            Vec3::new(3.0, -2.0, 8.0));
        let (a, u) = fitted_pair(BaseIdentity::Adenine, BaseIdentity::Uracil, &frame);
        let config = AnalysisConfig::default();
        let validator = PairValidator::new(&config);

        let fwd = validator.validate(LegacyIndex::new(1), &a, LegacyIndex::new(2), &u);
        let rev = validator.validate(LegacyIndex::new(2), &u, LegacyIndex::new(1), &a);

        assert_eq!(fwd.is_valid, rev.is_valid);
        assert_delta!(fwd.dorg, rev.dorg, 1e-9);
        assert_delta!(fwd.d_v, rev.d_v, 1e-9);
        assert_delta!(fwd.plane_angle, rev.plane_angle, 1e-9);
        assert_delta!(fwd.dnn, rev.dnn, 1e-9);
        assert_delta!(fwd.overlap_area, rev.overlap_area, 1e-6);
        assert_delta!(fwd.dir_x, rev.dir_x, 1e-12);
        assert_delta!(fwd.dir_y, rev.dir_y, 1e-12);
        assert_delta!(fwd.dir_z, rev.dir_z, 1e-12);
        assert_eq!(fwd.n_base_hbonds, rev.n_base_hbonds);
        assert_delta!(fwd.quality, rev.quality, 1e-12);
    }

    #[test]
    fn stacked_bases_fail_the_vertical_gate() {
        // two bases of adjacent steps on the same strand: separated by one rise
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let fitter = FrameFitter::new(&templates, false, &config);
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let f2 = advance_frame(&f1, &StepSpec::b_dna());
        let mut res1 = Residue::new(place_base(&templates, BaseIdentity::Guanine, false, &f1, "DG", "A", 1));
        let mut res2 = Residue::new(place_base(&templates, BaseIdentity::Adenine, false, &f2, "DA", "A", 2));
        res1.set_frame(fitter.fit_residue(&res1).frame.unwrap());
        res2.set_frame(fitter.fit_residue(&res2).frame.unwrap());

        let validator = PairValidator::new(&config);
        let result = validator.validate(LegacyIndex::new(1), &res1, LegacyIndex::new(2), &res2);
        assert!(!result.is_valid);
        assert!(!result.dv_ok, "stacked bases sit one rise apart vertically");
        assert_delta!(result.d_v, 3.38, 0.05);
    }

    #[test]
    fn missing_frame_fails_validation_quietly() {
        let templates = load_templates();
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let res1 = Residue::new(place_base(&templates, BaseIdentity::Guanine, false, &frame, "G", "A", 1));
        let res2 = Residue::new(place_base(&templates, BaseIdentity::Cytosine, false, &strand2_frame(&frame), "C", "B", 1));
        let config = AnalysisConfig::default();
        let validator = PairValidator::new(&config);
        let result = validator.validate(LegacyIndex::new(1), &res1, LegacyIndex::new(2), &res2);
        assert!(!result.is_valid);
    }

    #[test]
    fn wc_pair_type_and_adjusted_quality() {
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let (g, c) = fitted_pair(BaseIdentity::Guanine, BaseIdentity::Cytosine, &frame);
        let config = AnalysisConfig::default();
        let validator = PairValidator::new(&config);
        let result = validator.validate(LegacyIndex::new(1), &g, LegacyIndex::new(2), &c);

        let pair_type = pair_type_id(&g, &c, g.frame().unwrap(), c.frame().unwrap());
        assert_eq!(pair_type, 2, "an ideal G-C pair is Watson-Crick");

        // raw quality 0, the WC bonus and the three good bonds give -5
        let score = adjusted_quality(&result, pair_type);
        assert_delta!(score, -5.0, 1e-6);
    }

    #[test]
    fn gu_wobble_is_not_watson_crick() {
        // G-U with the uracil shifted by a wobble shear along the pair y-axis
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let fitter = FrameFitter::new(&templates, false, &config);
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let mut res1 = Residue::new(place_base(&templates, BaseIdentity::Guanine, false, &frame, "G", "A", 1));
        let flipped = strand2_frame(&frame);
        let shifted = ReferenceFrame::new(*flipped.rotation(), Vec3::new(0.0, -2.2, 0.0));
        let mut res2 = Residue::new(place_base(&templates, BaseIdentity::Uracil, false, &shifted, "U", "B", 1));
        res1.set_frame(fitter.fit_residue(&res1).frame.unwrap());
        res2.set_frame(fitter.fit_residue(&res2).frame.unwrap());

        let pair_type = pair_type_id(&res1, &res2, res1.frame().unwrap(), res2.frame().unwrap());
        assert_eq!(pair_type, 1, "a 2.2 Angstrom shear is wobble-class");
    }

    #[test]
    fn validation_is_deterministic() {
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::new(1.0, 1.0, 1.0));
        let (g, c) = fitted_pair(BaseIdentity::Guanine, BaseIdentity::Cytosine, &frame);
        let config = AnalysisConfig::default();
        let validator = PairValidator::new(&config);
        let r1 = validator.validate(LegacyIndex::new(1), &g, LegacyIndex::new(2), &c);
        let r2 = validator.validate(LegacyIndex::new(1), &g, LegacyIndex::new(2), &c);
        assert_eq!(r1.quality.to_bits(), r2.quality.to_bits(), "scores must be bit-identical");
        assert_eq!(r1.dorg.to_bits(), r2.dorg.to_bits());
        assert_eq!(r1.overlap_area.to_bits(), r2.overlap_area.to_bits());
    }

    #[test]
    fn far_apart_pair_fails_the_distance_gate() {
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let fitter = FrameFitter::new(&templates, false, &config);
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let f2 = ReferenceFrame::new(Matrix3::identity(), Vec3::new(20.0, 0.0, 0.0));
        let mut res1 = Residue::new(place_base(&templates, BaseIdentity::Adenine, false, &f1, "A", "A", 1));
        let mut res2 = Residue::new(place_base(&templates, BaseIdentity::Uracil, false, &strand2_frame(&f2), "U", "B", 1));
        res1.set_frame(fitter.fit_residue(&res1).frame.unwrap());
        res2.set_frame(fitter.fit_residue(&res2).frame.unwrap());

        let validator = PairValidator::new(&config);
        let result = validator.validate(LegacyIndex::new(1), &res1, LegacyIndex::new(2), &res2);
        assert!(!result.is_valid);
        assert!(!result.dorg_ok);
        assert!(!result.hbond_ok);
    }
}
