/// Tunable parameters of the analysis, threaded explicitly through protocol calls.
///
/// The defaults are the values the analysis was validated with; construct with
/// [`AnalysisConfig::default()`](Default::default) and override single fields as needed:
/// ```
/// use nucpair_analysis::AnalysisConfig;
/// let config = AnalysisConfig { max_dv: 2.0, ..AnalysisConfig::default() };
/// assert_eq!(config.max_dorg, 15.0);
/// ```
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    /// lower bound on the distance between pair frame origins, in Angstroms
    pub min_dorg: f64,
    /// upper bound on the distance between pair frame origins, in Angstroms
    pub max_dorg: f64,
    /// lower bound on the vertical displacement between bases, in Angstroms
    pub min_dv: f64,
    /// upper bound on the vertical displacement between bases, in Angstroms
    pub max_dv: f64,
    /// lower bound on the distance between glycosidic nitrogens, in Angstroms
    pub min_dnn: f64,
    /// lower bound on the angle between base normals, in degrees
    pub min_plane_angle: f64,
    /// upper bound on the angle between base normals, in degrees
    pub max_plane_angle: f64,
    /// largest projected base-ring overlap a pair may have, in square Angstroms;
    /// bases overlapping beyond this are stacked, not paired
    pub overlap_threshold: f64,
    /// pair-origin distance that terminates a helix, in Angstroms
    pub helix_break: f64,
    /// lower hydrogen-bond distance limit, in Angstroms
    pub hb_lower: f64,
    /// upper hydrogen-bond distance limit, in Angstroms
    pub hb_upper: f64,
    /// elements allowed in hydrogen bonds, as a dot-separated list
    pub hb_elements: String,
    /// smallest number of base-base hydrogen bonds a pair must have
    pub min_base_hbonds: usize,
    /// largest combined x-axis angle at which two Watson-Crick pairs still count
    /// as stacked during strand-direction checks, in degrees
    pub end_stack_xangle: f64,
    /// largest O3'-P distance that counts as a backbone linkage, in Angstroms
    pub o3p_cutoff: f64,
    /// reproduce legacy quirks; currently excludes C4 from the frame-fit match set
    pub legacy_mode: bool,
}

impl Default for AnalysisConfig {
    fn default() -> AnalysisConfig {
        AnalysisConfig {
            min_dorg: 0.0,
            max_dorg: 15.0,
            min_dv: 0.0,
            max_dv: 2.5,
            min_dnn: 4.5,
            min_plane_angle: 0.0,
            max_plane_angle: 65.0,
            overlap_threshold: 0.01,
            helix_break: 7.5,
            hb_lower: 1.8,
            hb_upper: 4.0,
            hb_elements: String::from(".N.O"),
            min_base_hbonds: 1,
            end_stack_xangle: 125.0,
            o3p_cutoff: 2.5,
            legacy_mode: false,
        }
    }
}

impl AnalysisConfig {
    /// Checks whether an element symbol belongs to the allowed hydrogen-bond set.
    ///
    /// # Example
    /// ```
    /// use nucpair_analysis::AnalysisConfig;
    /// let config = AnalysisConfig::default();
    /// assert!(config.allows_element("N"));
    /// assert!(config.allows_element("O"));
    /// assert!(!config.allows_element("C"));
    /// ```
    pub fn allows_element(&self, symbol: &str) -> bool {
        self.hb_elements.split('.').any(|e| !e.is_empty() && e.eq_ignore_ascii_case(symbol))
    }
}
