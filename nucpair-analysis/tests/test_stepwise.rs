mod common;

#[cfg(test)]
mod test_stepwise {
    use nucpair_analysis::stepwise::{helical_parameters, step_parameters, step_series};
    use nucpair_geometry::{assert_delta, Matrix3, Vec3};
    use nucpair_structure::ReferenceFrame;

    use crate::common::{advance_frame, duplex_frames, StepSpec};

    fn b_dna_step() -> (ReferenceFrame, ReferenceFrame) {
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let f2 = advance_frame(&f1, &StepSpec::b_dna());
        return (f1, f2);
    }

    #[test]
    fn ideal_b_dna_step() {
        let (f1, f2) = b_dna_step();
        let step = step_parameters(&f1, &f2);
        assert_delta!(step.parameters.twist, 36.0, 1e-9);
        assert_delta!(step.parameters.rise, 3.38, 1e-9);
        assert_delta!(step.parameters.shift, 0.0, 1e-9);
        assert_delta!(step.parameters.slide, 0.0, 1e-9);
        assert_delta!(step.parameters.tilt, 0.0, 1e-9);
        assert_delta!(step.parameters.roll, 0.0, 1e-9);
        assert!(!step.flipped_second);
        assert!(step.mid_frame.is_orthonormal(1e-9));
    }

    #[test]
    fn generated_roll_and_slide_are_recovered() {
        let spec = StepSpec { twist_deg: 30.0, roll_deg: 6.0, shift: 0.4, slide: -1.2, rise: 3.1 };
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::new(2.0, -1.0, 5.0));
        let f2 = advance_frame(&f1, &spec);
        let step = step_parameters(&f1, &f2);
        assert_delta!(step.parameters.twist, 30.0, 1e-6);
        assert_delta!(step.parameters.roll, 6.0, 1e-6);
        assert_delta!(step.parameters.tilt, 0.0, 1e-6);
        assert_delta!(step.parameters.shift, 0.4, 1e-6);
        assert_delta!(step.parameters.slide, -1.2, 1e-6);
        assert_delta!(step.parameters.rise, 3.1, 1e-6);
    }

    #[test]
    fn swapping_the_frames_inverts_the_step() {
        let spec = StepSpec { twist_deg: 33.0, roll_deg: 5.0, shift: 0.3, slide: -1.0, rise: 3.2 };
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let f2 = advance_frame(&f1, &spec);
        let forward = step_parameters(&f1, &f2).parameters;
        let backward = step_parameters(&f2, &f1).parameters;
        // the inverse motion in the shared mid-frame negates every component
        assert_delta!(backward.shift, -forward.shift, 1e-9);
        assert_delta!(backward.slide, -forward.slide, 1e-9);
        assert_delta!(backward.rise, -forward.rise, 1e-9);
        assert_delta!(backward.tilt, -forward.tilt, 1e-9);
        assert_delta!(backward.roll, -forward.roll, 1e-9);
        assert_delta!(backward.twist, -forward.twist, 1e-9);
    }

    #[test]
    fn strand_reversal_flips_shift_and_tilt_only() {
        let spec = StepSpec { twist_deg: 33.0, roll_deg: 5.0, shift: 0.3, slide: -1.0, rise: 3.2 };
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let f2 = advance_frame(&f1, &spec);
        let forward = step_parameters(&f1, &f2).parameters;
        // reading the step from the complementary strand conjugates both frames
        // by the y/z flip and reverses their order
        let reversed = step_parameters(&f2.with_flipped_yz(), &f1.with_flipped_yz()).parameters;
        assert_delta!(reversed.shift, -forward.shift, 1e-9);
        assert_delta!(reversed.tilt, -forward.tilt, 1e-9);
        assert_delta!(reversed.slide, forward.slide, 1e-9);
        assert_delta!(reversed.rise, forward.rise, 1e-9);
        assert_delta!(reversed.roll, forward.roll, 1e-9);
        assert_delta!(reversed.twist, forward.twist, 1e-9);
    }

    #[test]
    fn anti_parallel_second_frame_is_flipped_and_reported() {
        let (f1, f2) = b_dna_step();
        let step = step_parameters(&f1, &f2.with_flipped_yz());
        assert!(step.flipped_second);
        assert_delta!(step.parameters.twist, 36.0, 1e-9);
        assert_delta!(step.parameters.rise, 3.38, 1e-9);
    }

    #[test]
    fn step_sequence_is_invariant_under_a_global_rigid_transform() {
        let frames = duplex_frames(5, &vec![StepSpec::a_rna(); 4]);
        let rot = Matrix3::rotation_about_axis(&Vec3::new(1.0, -2.0, 0.5), 1.1);
        let shift = Vec3::new(13.0, -4.0, 7.5);
        let moved: Vec<ReferenceFrame> = frames.iter().map(|f| {
            let mut origin = rot.mul_vec(f.origin());
            origin += &shift;
            ReferenceFrame::new(rot.mul_mtx(f.rotation()), origin)
        }).collect();

        let original = step_series(&frames, 0, 1);
        let transformed = step_series(&moved, 0, 1);
        assert_eq!(original.len(), transformed.len());
        for (a, b) in original.iter().zip(&transformed) {
            assert_delta!(a.parameters.shift, b.parameters.shift, 1e-9);
            assert_delta!(a.parameters.slide, b.parameters.slide, 1e-9);
            assert_delta!(a.parameters.rise, b.parameters.rise, 1e-9);
            assert_delta!(a.parameters.tilt, b.parameters.tilt, 1e-9);
            assert_delta!(a.parameters.roll, b.parameters.roll, 1e-9);
            assert_delta!(a.parameters.twist, b.parameters.twist, 1e-9);
            assert_delta!(a.helical.h_rise, b.helical.h_rise, 1e-9);
            assert_delta!(a.helical.h_twist, b.helical.h_twist, 1e-9);
            assert_delta!(a.helical.inclination, b.helical.inclination, 1e-9);
            assert_delta!(a.helical.x_displacement, b.helical.x_displacement, 1e-9);
        }
    }

    #[test]
    fn pure_twist_helical_parameters() {
        let (f1, f2) = b_dna_step();
        let helical = helical_parameters(&f1, &f2);
        assert_delta!(helical.h_twist, 36.0, 1e-6);
        assert_delta!(helical.h_rise, 3.38, 1e-6);
        assert_delta!(helical.inclination, 0.0, 1e-6);
        assert_delta!(helical.tip, 0.0, 1e-6);
        assert_delta!(helical.x_displacement, 0.0, 1e-6);
        assert_delta!(helical.y_displacement, 0.0, 1e-6);
    }

    #[test]
    fn a_form_helical_parameters() {
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let f2 = advance_frame(&f1, &StepSpec::a_rna());
        let helical = helical_parameters(&f1, &f2);
        // positive roll inclines the base pairs; negative slide displaces them
        // away from the axis along their short axis
        assert!(helical.inclination > 5.0 && helical.inclination < 25.0,
                "inclination = {}", helical.inclination);
        assert!(helical.x_displacement < -0.5, "x_displacement = {}", helical.x_displacement);
        assert!(helical.h_twist > 30.0 && helical.h_twist < 36.0,
                "h_twist = {}", helical.h_twist);
        assert!(helical.h_rise > 2.0 && helical.h_rise < 3.0, "h_rise = {}", helical.h_rise);
    }

    #[test]
    fn step_series_start_and_stride() {
        let frames = duplex_frames(7, &vec![StepSpec::b_dna(); 6]);
        let all = step_series(&frames, 0, 1);
        assert_eq!(all.len(), 6);
        let strided = step_series(&frames, 1, 2);
        let indices: Vec<usize> = strided.iter().map(|r| r.step_index).collect();
        assert_eq!(indices, vec![1, 3, 5]);
        assert!(step_series(&frames[..1], 0, 1).is_empty());
    }

    #[test]
    fn zero_bend_degeneracy() {
        // identical orientations: twist comes straight from the x-axes, bend terms vanish
        let f1 = ReferenceFrame::new(Matrix3::identity(), Vec3::from_float(0.0));
        let f2 = ReferenceFrame::new(Matrix3::identity(), Vec3::new(0.2, 0.1, 3.4));
        let step = step_parameters(&f1, &f2);
        assert_delta!(step.parameters.twist, 0.0, 1e-9);
        assert_delta!(step.parameters.tilt, 0.0, 1e-9);
        assert_delta!(step.parameters.roll, 0.0, 1e-9);
        assert_delta!(step.parameters.shift, 0.2, 1e-9);
        assert_delta!(step.parameters.slide, 0.1, 1e-9);
        assert_delta!(step.parameters.rise, 3.4, 1e-9);
    }
}
