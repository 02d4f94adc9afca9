//! Pair-type classification and the adjusted quality score used by selection.

use nucpair_structure::{Residue, ReferenceFrame};

use crate::hbond::HydrogenBond;
use crate::stepwise::step_parameters;
use crate::validate::ValidationResult;

/// quality bonus of a Watson-Crick pair
const WC_PAIR_BONUS: f64 = -2.0;
/// quality bonus for two or more good hydrogen bonds
const TWO_GOOD_HBONDS_BONUS: f64 = -3.0;
/// quality bonus for exactly one good hydrogen bond
const ONE_GOOD_HBOND_BONUS: f64 = -1.0;
/// shear magnitude up to which a listed pair is Watson-Crick
const WC_SHEAR_MAX: f64 = 1.8;
/// shear window of a wobble pair
const WOBBLE_SHEAR_MIN: f64 = 1.8;
const WOBBLE_SHEAR_MAX: f64 = 2.8;
/// stretch magnitude beyond which no pair type is assigned
const STRETCH_LIMIT: f64 = 2.0;
/// opening magnitude beyond which no pair type is assigned, in degrees
const OPENING_LIMIT: f64 = 60.0;

/// base combinations that form canonical Watson-Crick pairs
const WC_COMBINATIONS: [(char, char); 6] =
    [('A', 'T'), ('T', 'A'), ('A', 'U'), ('U', 'A'), ('G', 'C'), ('C', 'G')];

/// Classifies the categorical pair type of two paired bases.
///
/// The single-pair step parameters between the two frames give the pair's shear
/// (slide), stretch (rise) and opening (twist):
/// * `-1` when stretch exceeds 2.0 Angstroms or opening exceeds 60 degrees,
/// * `2` for a canonical Watson-Crick combination with shear within 1.8 Angstroms,
/// * `1` for the wobble shear window of 1.8 to 2.8 Angstroms,
/// * `0` otherwise.
pub fn pair_type_id(res1: &Residue, res2: &Residue,
                    frame1: &ReferenceFrame, frame2: &ReferenceFrame) -> i32 {
    let step = step_parameters(frame2, frame1);
    let shear = step.parameters.slide;
    let stretch = step.parameters.rise;
    let opening = step.parameters.twist;

    if stretch.abs() > STRETCH_LIMIT || opening.abs() > OPENING_LIMIT {
        return -1;
    }

    let bases = (res1.one_letter_code().unwrap_or('?'), res2.one_letter_code().unwrap_or('?'));
    let is_wc_combination = WC_COMBINATIONS.contains(&bases);
    if is_wc_combination && shear.abs() <= WC_SHEAR_MAX {
        return 2;
    }
    if shear.abs() >= WOBBLE_SHEAR_MIN && shear.abs() <= WOBBLE_SHEAR_MAX {
        return 1;
    }
    return 0;
}

/// Counts the good hydrogen bonds of a pair: standard-classified with a
/// donor-acceptor distance in the [2.5, 3.5] Angstrom window
pub fn count_good_hbonds(bonds: &[HydrogenBond]) -> usize {
    bonds.iter().filter(|b| b.is_good()).count()
}

/// The score pair selection minimizes: the raw geometric quality plus the
/// Watson-Crick and hydrogen-bond bonuses.
///
/// # Example
/// ```
/// use nucpair_analysis::pair_type::adjusted_quality;
/// use nucpair_analysis::validate::ValidationResult;
/// let result = ValidationResult { quality: 5.0, ..Default::default() };
/// // a Watson-Crick pair without scored hydrogen bonds
/// assert_eq!(adjusted_quality(&result, 2), 3.0);
/// ```
pub fn adjusted_quality(result: &ValidationResult, pair_type: i32) -> f64 {
    let mut score = result.quality;
    if pair_type == 2 { score += WC_PAIR_BONUS; }
    match count_good_hbonds(&result.hbonds) {
        0 => {}
        1 => score += ONE_GOOD_HBOND_BONUS,
        _ => score += TWO_GOOD_HBONDS_BONUS,
    }
    return score;
}
