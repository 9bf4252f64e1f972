use serde::Serialize;

/// Quality band of a 0-100 composite score.
///
/// | Range       | Band      | Label   |
/// |-------------|-----------|---------|
/// | >= 90       | Excellent | `90+`   |
/// | >= 75       | Good      | `75-90` |
/// | >= 60       | Fair      | `60-75` |
/// | >= 40       | Weak      | `40-60` |
/// | < 40        | Poor      | `40-`   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Weak,
    Poor,
}

impl ScoreBand {
    /// Highest band first.
    pub const ALL: [ScoreBand; 5] = [
        ScoreBand::Excellent,
        ScoreBand::Good,
        ScoreBand::Fair,
        ScoreBand::Weak,
        ScoreBand::Poor,
    ];

    /// NaN lands in `Poor`, so every value has exactly one band.
    pub fn classify(score: f64) -> Self {
        match score {
            s if s >= 90.0 => ScoreBand::Excellent,
            s if s >= 75.0 => ScoreBand::Good,
            s if s >= 60.0 => ScoreBand::Fair,
            s if s >= 40.0 => ScoreBand::Weak,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "90+",
            ScoreBand::Good => "75-90",
            ScoreBand::Fair => "60-75",
            ScoreBand::Weak => "40-60",
            ScoreBand::Poor => "40-",
        }
    }
}
