use serde::{Deserialize, Serialize};

/// Sales temperature bands derived from the rule-based score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LeadTemperature {
    Hot,
    Warm,
    Cool,
    Cold,
}

impl LeadTemperature {
    /// Maps a clamped score onto its temperature band. Thresholds are
    /// inclusive lower bounds: 80 is hot, 60 is warm, 40 is cool.
    pub const fn for_score(score: u8) -> Self {
        if score >= 80 {
            Self::Hot
        } else if score >= 60 {
            Self::Warm
        } else if score >= 40 {
            Self::Cool
        } else {
            Self::Cold
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            LeadTemperature::Hot => "HOT",
            LeadTemperature::Warm => "WARM",
            LeadTemperature::Cool => "COOL",
            LeadTemperature::Cold => "COLD",
        }
    }

    /// Parses a display label back into a temperature. Accepts any casing
    /// and surrounding whitespace; unknown labels yield `None`.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "HOT" => Some(Self::Hot),
            "WARM" => Some(Self::Warm),
            "COOL" => Some(Self::Cool),
            "COLD" => Some(Self::Cold),
            _ => None,
        }
    }

    /// Bands ordered hottest first, the order reports and dashboards use.
    pub const fn ordered() -> [Self; 4] {
        [Self::Hot, Self::Warm, Self::Cool, Self::Cold]
    }
}
