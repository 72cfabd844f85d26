use serde::Serialize;

/// Default cutoff, in percent of the population, above which exposure counts
/// as elevated.
pub const DEFAULT_RISK_CUTOFF: f64 = 30.0;

/// Qualitative reading of a resolved exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Elevated,
    Low,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Elevated => "elevated risk of health impact",
            RiskLabel::Low => "comparatively low risk",
        }
    }
}

/// Maps a percentage to a [`RiskLabel`] against a single cutoff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskClassifier {
    cutoff: f64,
}

impl Default for RiskClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_CUTOFF)
    }
}

impl RiskClassifier {
    pub fn new(cutoff: f64) -> Self {
        Self { cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Strictly above the cutoff is elevated; unavailable yields no label.
    pub fn classify(&self, percent: Option<f64>) -> Option<RiskLabel> {
        let p = percent?;
        if p > self.cutoff {
            Some(RiskLabel::Elevated)
        } else {
            Some(RiskLabel::Low)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_cutoff_is_elevated() {
        let c = RiskClassifier::default();
        assert_eq!(c.classify(Some(42.0)), Some(RiskLabel::Elevated));
        assert_eq!(c.classify(Some(30.0001)), Some(RiskLabel::Elevated));
    }

    #[test]
    fn at_or_below_cutoff_is_low() {
        let c = RiskClassifier::default();
        assert_eq!(c.classify(Some(30.0)), Some(RiskLabel::Low));
        assert_eq!(c.classify(Some(0.0)), Some(RiskLabel::Low));
    }

    #[test]
    fn unavailable_has_no_label() {
        assert_eq!(RiskClassifier::default().classify(None), None);
    }

    #[test]
    fn custom_cutoff_moves_the_boundary() {
        let c = RiskClassifier::new(10.0);
        assert_eq!(c.cutoff(), 10.0);
        assert_eq!(c.classify(Some(12.0)), Some(RiskLabel::Elevated));
        assert_eq!(c.classify(Some(10.0)), Some(RiskLabel::Low));
    }

    #[test]
    fn label_texts() {
        assert_eq!(RiskLabel::Elevated.as_str(), "elevated risk of health impact");
        assert_eq!(RiskLabel::Low.as_str(), "comparatively low risk");
    }
}
