//! Informational geometric quality scoring of hydrogen bonds.
//!
//! Scores never gate detection; they grade each surviving bond on a 0-100 scale from
//! its distance (45%), donor angle (30%) and acceptor angle (25%), with hard failures
//! for geometry no real hydrogen bond can have.

/// Parameters of the quality score
#[derive(Clone, Debug)]
pub struct HBondScoringParams {
    /// ideal donor-acceptor distance, in Angstroms
    pub ideal_distance: f64,
    /// width of the Gaussian distance term
    pub distance_sigma: f64,
    /// below this distance the bond is a steric clash
    pub min_distance: f64,
    /// above this distance the bond is too far
    pub max_distance: f64,
    /// ideal X-D...A angle, in degrees
    pub ideal_donor_angle: f64,
    /// donor angles below this are impossible geometry
    pub min_donor_angle: f64,
    /// ideal D...A-Y angle for an sp2 acceptor, in degrees
    pub ideal_acceptor_sp2: f64,
    /// ideal D...A-Y angle for an sp3 acceptor, in degrees
    pub ideal_acceptor_sp3: f64,
    /// acceptor angles below this are impossible geometry
    pub min_acceptor_angle: f64,
    /// weight of the distance term
    pub weight_distance: f64,
    /// weight of the donor-angle term
    pub weight_donor_angle: f64,
    /// weight of the acceptor-angle term
    pub weight_acceptor_angle: f64,
}

impl Default for HBondScoringParams {
    fn default() -> HBondScoringParams {
        HBondScoringParams {
            ideal_distance: 2.9,
            distance_sigma: 0.3,
            min_distance: 2.0,
            max_distance: 4.0,
            ideal_donor_angle: 165.0,
            min_donor_angle: 90.0,
            ideal_acceptor_sp2: 130.0,
            ideal_acceptor_sp3: 110.0,
            min_acceptor_angle: 70.0,
            weight_distance: 0.45,
            weight_donor_angle: 0.30,
            weight_acceptor_angle: 0.25,
        }
    }
}

/// Quality tier of a scored bond
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualityTier {
    /// 90-100: ideal geometry
    Excellent,
    /// 70-89: good geometry, reliable
    Standard,
    /// 50-69: minor deviations
    Acceptable,
    /// 30-49: marginal, use with caution
    Questionable,
    /// below 30: clearly wrong geometry
    Invalid,
}

impl QualityTier {
    /// Maps a 0-100 score to its tier
    pub fn from_score(score: f64) -> QualityTier {
        if score >= 90.0 { return QualityTier::Excellent; }
        if score >= 70.0 { return QualityTier::Standard; }
        if score >= 50.0 { return QualityTier::Acceptable; }
        if score >= 30.0 { return QualityTier::Questionable; }
        return QualityTier::Invalid;
    }
}

/// Complete quality assessment of one hydrogen bond
#[derive(Clone, Debug)]
pub struct HBondQualityScore {
    /// combined weighted score, 0-100
    pub total: f64,
    /// distance component, 0-100
    pub distance_score: f64,
    /// donor-angle component, 0-100, when the angle was measurable
    pub donor_angle_score: Option<f64>,
    /// acceptor-angle component, 0-100, when the angle was measurable
    pub acceptor_angle_score: Option<f64>,
    /// tier the total falls into
    pub tier: QualityTier,
    /// set when a hard geometric failure zeroed the score
    pub failure: Option<&'static str>,
}

/// True for acceptor atoms in an sp2 environment: carbonyl oxygens and aromatic
/// ring nitrogens. Hydroxyl and ester oxygens are sp3.
pub fn is_sp2_acceptor(atom_name: &str) -> bool {
    matches!(atom_name.trim(), "O2" | "O4" | "O6" | "N1" | "N3" | "N7" | "OP1" | "OP2" | "O1P" | "O2P")
}

/// Reference neighbor atom used for angle calculations at a bonded atom
pub(crate) fn neighbor_of(atom_name: &str) -> Option<&'static str> {
    match atom_name.trim() {
        "N6" | "O6" => Some("C6"),
        "N1" | "N2" | "O2" => Some("C2"),
        "N3" => Some("C2"),
        "N7" => Some("C5"),
        "N9" => Some("C4"),
        "N4" | "O4" => Some("C4"),
        "OP1" | "OP2" | "O1P" | "O2P" => Some("P"),
        "O5'" => Some("C5'"),
        "O3'" => Some("C3'"),
        "O4'" => Some("C4'"),
        "O2'" => Some("C2'"),
        _ => None,
    }
}

/// Scores hydrogen bonds from their geometry.
///
/// # Example
/// ```
/// use nucpair_analysis::hbond::{HBondQualityScorer, QualityTier};
/// let scorer = HBondQualityScorer::default();
/// let ideal = scorer.score(2.9, Some(165.0), Some(130.0), "O6");
/// assert_eq!(ideal.tier, QualityTier::Excellent);
/// let clash = scorer.score(1.7, Some(165.0), Some(130.0), "O6");
/// assert_eq!(clash.tier, QualityTier::Invalid);
/// assert!(clash.failure.is_some());
/// ```
#[derive(Clone, Debug, Default)]
pub struct HBondQualityScorer {
    params: HBondScoringParams,
}

impl HBondQualityScorer {
    /// Creates a scorer with custom parameters
    pub fn new(params: HBondScoringParams) -> HBondQualityScorer {
        HBondQualityScorer { params }
    }

    /// The scoring parameters in use
    pub fn params(&self) -> &HBondScoringParams { &self.params }

    /// Scores one bond from its distance and angles.
    ///
    /// Missing angles are left out of the weighted combination; the remaining weights
    /// are renormalized so a distance-only score still spans 0-100.
    pub fn score(&self, distance: f64, donor_angle: Option<f64>, acceptor_angle: Option<f64>,
                 acceptor_atom: &str) -> HBondQualityScore {
        let p = &self.params;

        if let Some(reason) = self.hard_failure(distance, donor_angle, acceptor_angle) {
            return HBondQualityScore {
                total: 0.0,
                distance_score: 0.0,
                donor_angle_score: None,
                acceptor_angle_score: None,
                tier: QualityTier::Invalid,
                failure: Some(reason),
            };
        }

        let dev = (distance - p.ideal_distance) / p.distance_sigma;
        let distance_score = 100.0 * (-0.5 * dev * dev).exp();

        let donor_angle_score = donor_angle.map(|angle| {
            let span = p.ideal_donor_angle - p.min_donor_angle;
            100.0 * (1.0 - (angle - p.ideal_donor_angle).abs() / span).max(0.0)
        });

        let acceptor_angle_score = acceptor_angle.map(|angle| {
            let ideal = if is_sp2_acceptor(acceptor_atom) { p.ideal_acceptor_sp2 } else { p.ideal_acceptor_sp3 };
            let span = ideal - p.min_acceptor_angle;
            100.0 * (1.0 - (angle - ideal).abs() / span).max(0.0)
        });

        let mut total = p.weight_distance * distance_score;
        let mut weight_sum = p.weight_distance;
        if let Some(s) = donor_angle_score {
            total += p.weight_donor_angle * s;
            weight_sum += p.weight_donor_angle;
        }
        if let Some(s) = acceptor_angle_score {
            total += p.weight_acceptor_angle * s;
            weight_sum += p.weight_acceptor_angle;
        }
        total /= weight_sum;

        return HBondQualityScore {
            total,
            distance_score,
            donor_angle_score,
            acceptor_angle_score,
            tier: QualityTier::from_score(total),
            failure: None,
        };
    }

    fn hard_failure(&self, distance: f64, donor_angle: Option<f64>,
                    acceptor_angle: Option<f64>) -> Option<&'static str> {
        let p = &self.params;
        if distance < p.min_distance { return Some("steric clash"); }
        if distance > p.max_distance { return Some("distance beyond limit"); }
        if donor_angle.is_some_and(|a| a < p.min_donor_angle) {
            return Some("donor angle below limit");
        }
        if acceptor_angle.is_some_and(|a| a < p.min_acceptor_angle) {
            return Some("acceptor angle below limit");
        }
        return None;
    }
}
