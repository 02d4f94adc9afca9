mod common;

#[cfg(test)]
mod test_frames {
    use nucpair_analysis::{classify_ring_by_rmsd, AnalysisConfig, FrameFitter};
    use nucpair_geometry::{assert_delta, assert_vec3_eq, Matrix3, Vec3};
    use nucpair_structure::{BaseIdentity, Residue, ReferenceFrame};

    use crate::common::{load_templates, place_base};

    fn ideal_residue(base: BaseIdentity, res_name: &str) -> Residue {
        let templates = load_templates();
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        Residue::new(place_base(&templates, base, false, &frame, res_name, "A", 1))
    }

    fn transformed_residue(base: BaseIdentity, res_name: &str, rot: &Matrix3, shift: &Vec3) -> Residue {
        let templates = load_templates();
        let frame = ReferenceFrame::new(*rot, *shift);
        Residue::new(place_base(&templates, base, false, &frame, res_name, "A", 1))
    }

    #[test]
    fn ideal_base_fits_with_zero_rmsd() {
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let fitter = FrameFitter::new(&templates, false, &config);

        let res = ideal_residue(BaseIdentity::Guanine, "DG");
        let fit = fitter.fit_residue(&res);
        assert!(fit.is_valid);
        assert_delta!(fit.rmsd, 0.0, 1e-9);
        assert_eq!(fit.matched_atoms.len(), 9);
        assert_eq!(fit.base_code, 'G');

        let frame = fit.frame.unwrap();
        assert!(frame.is_orthonormal(1e-6));
        assert_vec3_eq!(frame.origin(), &Vec3::from_float(0.0), 1e-9, "origin must be at the template origin");
    }

    #[test]
    fn fit_recovers_the_placement_transform() {
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let fitter = FrameFitter::new(&templates, false, &config);

        let rot = Matrix3::rotation_about_axis(&Vec3::new(0.3, -1.0, 2.0), 0.9);
        let shift = Vec3::new(5.0, -3.0, 12.0);
        let res = transformed_residue(BaseIdentity::Adenine, "DA", &rot, &shift);
        let fit = fitter.fit_residue(&res);
        assert!(fit.is_valid);
        assert_delta!(fit.rmsd, 0.0, 1e-9);

        let frame = fit.frame.unwrap();
        assert_vec3_eq!(frame.origin(), &shift, 1e-8, "origin");
        for row in 0..3 {
            for col in 0..3 {
                assert_delta!(frame.rotation().elem(row, col), rot.elem(row, col), 1e-8);
            }
        }
    }

    #[test]
    fn fit_is_rotation_equivariant() {
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let fitter = FrameFitter::new(&templates, false, &config);

        let base_rot = Matrix3::rotation_about_axis(&Vec3::new(1.0, 1.0, 0.0), 0.4);
        let base_shift = Vec3::new(1.0, 2.0, 3.0);
        let res = transformed_residue(BaseIdentity::Cytosine, "DC", &base_rot, &base_shift);
        let fit0 = fitter.fit_residue(&res);

        let extra_rot = Matrix3::rotation_about_axis(&Vec3::new(0.0, 0.0, 1.0), 1.3);
        let extra_shift = Vec3::new(-4.0, 0.5, 9.0);
        let combined = extra_rot.mul_mtx(&base_rot);
        let mut combined_shift = extra_rot.mul_vec(&base_shift);
        combined_shift += &extra_shift;
        let moved = transformed_residue(BaseIdentity::Cytosine, "DC", &combined, &combined_shift);
        let fit1 = fitter.fit_residue(&moved);

        // frame transforms with the structure, rmsd does not change
        assert_delta!(fit0.rmsd, fit1.rmsd, 1e-10);
        let f0 = fit0.frame.unwrap();
        let f1 = fit1.frame.unwrap();
        let expected_rot = extra_rot.mul_mtx(f0.rotation());
        for row in 0..3 {
            for col in 0..3 {
                assert_delta!(f1.rotation().elem(row, col), expected_rot.elem(row, col), 1e-8);
            }
        }
        let mut expected_origin = extra_rot.mul_vec(f0.origin());
        expected_origin += &extra_shift;
        assert_vec3_eq!(f1.origin(), &expected_origin, 1e-8, "moved origin");
    }

    #[test]
    fn rna_flag_adds_c1_prime_to_the_match() {
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let res = ideal_residue(BaseIdentity::Uracil, "U");

        let dna_fit = FrameFitter::new(&templates, false, &config).fit_residue(&res);
        assert_eq!(dna_fit.matched_atoms.len(), 6);
        let rna_fit = FrameFitter::new(&templates, true, &config).fit_residue(&res);
        assert_eq!(rna_fit.matched_atoms.len(), 7);
        assert!(rna_fit.matched_atoms.iter().any(|n| n == "C1'"));
    }

    #[test]
    fn legacy_mode_drops_c4() {
        let templates = load_templates();
        let config = AnalysisConfig { legacy_mode: true, ..AnalysisConfig::default() };
        let res = ideal_residue(BaseIdentity::Guanine, "G");
        let fit = FrameFitter::new(&templates, false, &config).fit_residue(&res);
        assert!(fit.is_valid);
        assert_eq!(fit.matched_atoms.len(), 8);
        assert!(!fit.matched_atoms.iter().any(|n| n == "C4"));
    }

    #[test]
    fn modified_nucleotide_uses_the_lowercase_template() {
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let res = Residue::new(place_base(&templates, BaseIdentity::Pseudouridine, true,
                                          &frame, "PSU", "A", 1));
        let fit = FrameFitter::new(&templates, false, &config).fit_residue(&res);
        assert!(fit.is_valid);
        assert_eq!(fit.template, Some((BaseIdentity::Pseudouridine, true)));
        assert_eq!(fit.base_code, 'P');
    }

    #[test]
    fn too_few_ring_atoms_is_degenerate_not_fatal() {
        use nucpair_structure::Atom;
        let res = Residue::new(vec![
            Atom::new("N1", "G", "A", 1, Vec3::new(-0.700, 0.641, 0.0)),
            Atom::new("C2", "G", "A", 1, Vec3::new(-1.999, 1.087, 0.0)),
        ]);
        let templates = load_templates();
        let config = AnalysisConfig::default();
        let fit = FrameFitter::new(&templates, false, &config).fit_residue(&res);
        assert!(!fit.is_valid);
        assert!(fit.frame.is_none());
        assert_eq!(fit.matched_atoms.len(), 2);
    }

    #[test]
    fn ring_fallback_separates_purines_from_pyrimidines() {
        let templates = load_templates();
        let frame = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));

        // an unknown residue name with guanine geometry: the registry misses it,
        // the ring classifier must call it a purine
        let purine = Residue::new(place_base(&templates, BaseIdentity::Guanine, false,
                                             &frame, "XXG", "A", 1));
        let ring = classify_ring_by_rmsd(&purine);
        assert!(ring.is_purine);
        assert!(ring.rmsd.is_some());
        assert!(ring.rmsd.unwrap() < 0.1);

        let pyrimidine = Residue::new(place_base(&templates, BaseIdentity::Cytosine, false,
                                                 &frame, "XXC", "A", 1));
        let ring = classify_ring_by_rmsd(&pyrimidine);
        assert!(!ring.is_purine);
        assert_eq!(ring.matched_atoms.len(), 6);

        // the full fitter still produces a frame for the unknown purine
        let config = AnalysisConfig::default();
        let fit = FrameFitter::new(&templates, false, &config).fit_residue(&purine);
        assert!(fit.is_valid);
        assert_eq!(fit.template, Some((BaseIdentity::Adenine, true)));
    }
}
